use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::path::Path;

use gl::types::*;
use gl::*;
use log::{error, info};

use crate::config::Profile;
use crate::error::BackendError;

/// Proof that the OpenGL entry points were resolved for the current context.
///
/// Every GL helper in this crate takes a `&Gl`, so no GL call can happen
/// before [`Gl::load_with`] succeeded. `Gl` is `!Send`: GL calls belong to the
/// thread that created the context.
#[derive(Debug, Clone, Copy)]
pub struct Gl {
    _thread_bound: PhantomData<*const ()>,
}

impl Gl {
    /// Loads the `gl` function table through `loader` and checks that the
    /// entry points the helpers rely on could be found.
    pub fn load_with<F>(loader: F) -> Result<Gl, BackendError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let required = [
            ("glGetIntegerv", gl::GetIntegerv::is_loaded()),
            ("glGetString", gl::GetString::is_loaded()),
            ("glClear", gl::Clear::is_loaded()),
            ("glGenBuffers", gl::GenBuffers::is_loaded()),
            ("glBufferData", gl::BufferData::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glDrawArrays", gl::DrawArrays::is_loaded()),
            ("glDrawElements", gl::DrawElements::is_loaded()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, loaded)| !loaded)
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(BackendError::ExtensionResolution(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        Ok(Gl {
            _thread_bound: PhantomData,
        })
    }

    /// Version of the current context as the driver reports it.
    pub fn context_version(&self) -> Option<(u8, u8)> {
        let (mut major, mut minor) = (0, 0);
        unsafe {
            gl::GetIntegerv(MAJOR_VERSION, &mut major);
            gl::GetIntegerv(MINOR_VERSION, &mut minor);
        }
        if major > 0 {
            return Some((u8::try_from(major).ok()?, u8::try_from(minor).ok()?));
        }
        // pre-3.0 contexts reject the integer queries
        unsafe { gl::GetError() };
        parse_gl_version_string(&gl_string(VERSION))
    }

    pub fn context_profile(&self, version: (u8, u8)) -> Profile {
        let mut mask = 0;
        if version >= (3, 2) {
            unsafe { gl::GetIntegerv(CONTEXT_PROFILE_MASK, &mut mask) };
        }
        profile_from_mask(version, mask as GLbitfield)
    }
}

/// Leading `MAJOR.MINOR` of a `GL_VERSION` string such as
/// `"4.1 Metal - 88"` or `"2.1 Mesa 23.0.4"`.
pub fn parse_gl_version_string(version: &str) -> Option<(u8, u8)> {
    let mut numbers = version
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty());
    let major = numbers.next()?.parse().ok()?;
    let minor = numbers.next()?.parse().ok()?;
    Some((major, minor))
}

/// Profiles only exist from 3.2 on; anything older is a compatibility context.
pub fn profile_from_mask(version: (u8, u8), mask: GLbitfield) -> Profile {
    if version >= (3, 2) && mask & CONTEXT_CORE_PROFILE_BIT != 0 {
        Profile::Core
    } else {
        Profile::Compatibility
    }
}

/// Logs and returns the pending GL error, if any.
pub fn check_gl_err(_gl: &Gl, what: &str) -> Option<GLenum> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return None;
    }
    error!("{what}: GL error 0x{:04x}", err);
    Some(err)
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_gl_info(_gl: &Gl) {
    info!("GL_VENDOR = {}", gl_string(VENDOR));
    info!("GL_RENDERER = {}", gl_string(RENDERER));
    info!("GL_VERSION = {}", gl_string(VERSION));
    info!("GL_SHADING_LANGUAGE_VERSION = {}", gl_string(SHADING_LANGUAGE_VERSION));

    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_IMAGE_UNITS, &mut mtu) };
    info!("MAX_TEXTURE_IMAGE_UNITS = {}", mtu);

    unsafe { gl::GetIntegerv(MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut mtu) };
    info!("MAX_COMBINED_TEXTURE_IMAGE_UNITS = {}", mtu);
}

pub fn clear_screen(_gl: &Gl, r: f32, g: f32, b: f32) {
    unsafe {
        gl::ClearColor(r, g, b, 1.0);
        gl::Clear(gl::COLOR_BUFFER_BIT);
    }
}

pub fn viewport(_gl: &Gl, (w, h): (u32, u32)) {
    unsafe { gl::Viewport(0, 0, w as i32, h as i32) };
}

pub fn draw_triangles(_gl: &Gl, first: i32, count: i32) {
    unsafe { gl::DrawArrays(TRIANGLES, first, count) };
}

/// Draws `count` indices of the bound element buffer as triangles.
pub fn draw_indexed_triangles(_gl: &Gl, count: i32) {
    unsafe { gl::DrawElements(TRIANGLES, count, UNSIGNED_INT, std::ptr::null()) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    Element,
}

impl BufferTarget {
    fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Array => ARRAY_BUFFER,
            BufferTarget::Element => ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A buffer object, deleted on drop.
pub struct Buffer<'gl> {
    _gl: &'gl Gl,
    id: GLuint,
    target: BufferTarget,
}

impl<'gl> Buffer<'gl> {
    pub fn new(gl: &'gl Gl, target: BufferTarget) -> Buffer<'gl> {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        Buffer {
            _gl: gl,
            id,
            target,
        }
    }

    /// Creates the buffer, binds it and uploads `data` with `STATIC_DRAW`.
    pub fn with_static_data<T: Sized>(gl: &'gl Gl, target: BufferTarget, data: &[T]) -> Buffer<'gl> {
        let buffer = Buffer::new(gl, target);
        buffer.bind();
        buffer.upload_static(data);
        buffer
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(self.target.gl_enum(), self.id) };
    }

    /// Uploads to whatever buffer is bound to this buffer's target.
    pub fn upload_static<T: Sized>(&self, data: &[T]) {
        unsafe {
            gl::BufferData(
                self.target.gl_enum(),
                std::mem::size_of_val(data) as isize,
                data.as_ptr().cast(),
                STATIC_DRAW,
            )
        };
    }
}

impl Drop for Buffer<'_> {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}

pub struct VertexArray<'gl> {
    _gl: &'gl Gl,
    id: GLuint,
}

impl<'gl> VertexArray<'gl> {
    pub fn new(gl: &'gl Gl) -> VertexArray<'gl> {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        VertexArray { _gl: gl, id }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) };
    }
}

impl Drop for VertexArray<'_> {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) };
    }
}

/// Describes `size` floats at float offset `pointer` within vertices that are
/// `stride` floats apart, and enables the attribute.
pub fn vertex_attrib_f32(_gl: &Gl, index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

pub struct Texture2d<'gl> {
    _gl: &'gl Gl,
    id: GLuint,
}

impl<'gl> Texture2d<'gl> {
    const DEFAULT_PARAMS: [(GLenum, GLenum); 4] = [
        (TEXTURE_WRAP_S, REPEAT),
        (TEXTURE_WRAP_T, REPEAT),
        (TEXTURE_MIN_FILTER, LINEAR),
        (TEXTURE_MAG_FILTER, LINEAR),
    ];

    pub fn from_file(gl: &'gl Gl, filename: &Path) -> Result<Texture2d<'gl>, BackendError> {
        unsafe {
            stb_image::stb_image::stbi_set_flip_vertically_on_load(1);
        }
        let img = match stb_image::image::load(filename) {
            stb_image::image::LoadResult::ImageF32(_) => {
                return Err(BackendError::Texture(format!(
                    "{}: 32-bit images not supported here",
                    filename.display()
                )));
            }
            stb_image::image::LoadResult::ImageU8(img) => img,
            stb_image::image::LoadResult::Error(e) => {
                return Err(BackendError::Texture(format!(
                    "loading image {} error: {}",
                    filename.display(),
                    e
                )))
            }
        };

        Self::from_pixels(gl, img.width as u32, img.height as u32, img.depth as u32, &img.data)
    }

    /// Uploads tightly packed 8-bit pixels with `channels` components each.
    pub fn from_pixels(
        gl: &'gl Gl,
        width: u32,
        height: u32,
        channels: u32,
        data: &[u8],
    ) -> Result<Texture2d<'gl>, BackendError> {
        let format = match channels {
            1 => RED,
            3 => RGB,
            4 => RGBA,
            n => return Err(BackendError::Texture(format!("{n} channels per pixel not supported"))),
        };
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(BackendError::Texture(format!(
                "{}x{}x{} image needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                data.len()
            )));
        }

        let mut id = 0;
        unsafe { gl::GenTextures(1, &mut id) };
        let texture = Texture2d { _gl: gl, id };
        texture.bind(0);

        for (name, param) in Self::DEFAULT_PARAMS {
            unsafe { gl::TexParameteri(TEXTURE_2D, name, param as i32) };
        }

        unsafe {
            gl::PixelStorei(UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                TEXTURE_2D,
                0,
                RGBA as i32,
                width as i32,
                height as i32,
                0,
                format,
                UNSIGNED_BYTE,
                data.as_ptr().cast(),
            )
        };
        if let Some(err) = check_gl_err(gl, "glTexImage2D") {
            return Err(BackendError::Texture(format!("upload failed with 0x{:04x}", err)));
        }
        unsafe { gl::GenerateMipmap(TEXTURE_2D) };

        Ok(texture)
    }

    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(TEXTURE0 + unit);
            gl::BindTexture(TEXTURE_2D, self.id);
        }
    }
}

impl Drop for Texture2d<'_> {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

/// RGB checkerboard of `cells`x`cells` squares, `cell_size` pixels each.
pub fn checkerboard(cells: u32, cell_size: u32, a: [u8; 3], b: [u8; 3]) -> (u32, Vec<u8>) {
    let side = cells * cell_size;
    let mut data = Vec::with_capacity((side * side * 3) as usize);
    for y in 0..side {
        for x in 0..side {
            let color = if (x / cell_size + y / cell_size) % 2 == 0 { a } else { b };
            data.extend_from_slice(&color);
        }
    }
    (side, data)
}
