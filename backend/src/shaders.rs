use std::ffi::CString;
use std::fmt;

use gl::types::*;
use gl::*;
use log::debug;

use crate::error::BackendError;
use crate::glutils::Gl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// The shader and program object calls needed to build a [`ShaderProgram`].
pub trait ShaderApi {
    /// `None` when the driver hands out object 0.
    fn create_shader(&self, stage: ShaderStage) -> Option<u32>;
    /// Uploads and compiles `source`; the error carries the info log.
    fn compile_shader(&self, shader: u32, source: &str) -> Result<(), String>;
    fn delete_shader(&self, shader: u32);
    fn create_program(&self) -> Option<u32>;
    fn attach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32) -> Result<(), String>;
    fn delete_program(&self, program: u32);
    fn use_program(&self, program: u32);
}

/// Shader object that is deleted when it goes out of scope, including on
/// every early return while a program is being built.
struct ShaderObject<'a, A: ShaderApi> {
    api: &'a A,
    id: u32,
}

impl<'a, A: ShaderApi> ShaderObject<'a, A> {
    fn compile(api: &'a A, stage: ShaderStage, source: &str) -> Result<Self, BackendError> {
        let id = api
            .create_shader(stage)
            .ok_or(BackendError::ShaderCreation(stage))?;
        let shader = ShaderObject { api, id };

        if let Err(log) = api.compile_shader(id, source) {
            let log = if log.trim().is_empty() {
                "compilation failed without an info log".to_string()
            } else {
                log
            };
            return Err(BackendError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }
}

impl<A: ShaderApi> Drop for ShaderObject<'_, A> {
    fn drop(&mut self) {
        self.api.delete_shader(self.id);
    }
}

/// A linked vertex + fragment program, deleted on drop.
pub struct ShaderProgram<'a, A: ShaderApi> {
    api: &'a A,
    program_id: u32,
}

impl<'a, A: ShaderApi> ShaderProgram<'a, A> {
    /// Compiles both stages and links them. Nothing is linked unless both
    /// stages compiled.
    pub fn from_str(
        api: &'a A,
        vertex_code: &str,
        fragment_code: &str,
    ) -> Result<ShaderProgram<'a, A>, BackendError> {
        let vertex_shader = ShaderObject::compile(api, ShaderStage::Vertex, vertex_code)?;
        let fragment_shader = ShaderObject::compile(api, ShaderStage::Fragment, fragment_code)?;

        let program_id = api.create_program().ok_or_else(|| BackendError::ProgramLink {
            log: "glCreateProgram failed".to_string(),
        })?;
        let program = ShaderProgram { api, program_id };

        api.attach_shader(program_id, vertex_shader.id);
        api.attach_shader(program_id, fragment_shader.id);
        api.link_program(program_id)
            .map_err(|log| BackendError::ProgramLink { log })?;

        debug!("linked program {}", program_id);
        // shader objects are released here; the program keeps its own copy
        Ok(program)
    }

    pub fn id(&self) -> u32 {
        self.program_id
    }

    pub fn use_program(&self) {
        self.api.use_program(self.program_id);
    }
}

impl<A: ShaderApi> Drop for ShaderProgram<'_, A> {
    fn drop(&mut self) {
        self.api.delete_program(self.program_id);
    }
}

fn info_log(len: i32, read: impl FnOnce(i32, &mut i32, *mut GLchar)) -> String {
    let capacity = len.max(1);
    let mut v: Vec<u8> = vec![0; capacity as usize];
    let mut log_len = 0_i32;
    read(capacity, &mut log_len, v.as_mut_ptr().cast());
    v.truncate(log_len.clamp(0, capacity) as usize);
    String::from_utf8_lossy(&v).trim_end().to_string()
}

impl ShaderApi for Gl {
    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        let id = unsafe { gl::CreateShader(stage.gl_enum()) };
        (id != 0).then_some(id)
    }

    fn compile_shader(&self, shader_id: u32, shader_code: &str) -> Result<(), String> {
        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &(shader_code.len() as GLint),
            );
            gl::CompileShader(shader_id);
        }

        // check if there are compilation errors
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success) };
        if success != 0 {
            return Ok(());
        }

        let mut len = 0;
        unsafe { gl::GetShaderiv(shader_id, INFO_LOG_LENGTH, &mut len) };
        Err(info_log(len, |cap, log_len, buf| unsafe {
            gl::GetShaderInfoLog(shader_id, cap, log_len, buf)
        }))
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> Option<u32> {
        let id = unsafe { gl::CreateProgram() };
        (id != 0).then_some(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&self, program: u32) -> Result<(), String> {
        unsafe { gl::LinkProgram(program) };

        let mut success = 0;
        unsafe { gl::GetProgramiv(program, LINK_STATUS, &mut success) };
        if success != 0 {
            return Ok(());
        }

        let mut len = 0;
        unsafe { gl::GetProgramiv(program, INFO_LOG_LENGTH, &mut len) };
        Err(info_log(len, |cap, log_len, buf| unsafe {
            gl::GetProgramInfoLog(program, cap, log_len, buf)
        }))
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }
}

impl ShaderProgram<'_, Gl> {
    pub fn attrib_location(&self, name: &str) -> Result<u32, BackendError> {
        let c_name =
            CString::new(name).map_err(|_| BackendError::UnknownAttribute(name.to_string()))?;
        let location = unsafe { gl::GetAttribLocation(self.program_id, c_name.as_ptr().cast()) };
        u32::try_from(location).map_err(|_| BackendError::UnknownAttribute(name.to_string()))
    }

    fn uniform_location(&self, name: &str) -> Result<i32, BackendError> {
        let c_name =
            CString::new(name).map_err(|_| BackendError::UnknownUniform(name.to_string()))?;
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr().cast()) };
        if location == -1 {
            return Err(BackendError::UnknownUniform(name.to_string()));
        }
        Ok(location)
    }

    pub fn set_i32(&self, name: &str, value: i32) -> Result<(), BackendError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform1i(location, value) };
        Ok(())
    }

    pub fn set_f32(&self, name: &str, value: f32) -> Result<(), BackendError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform1f(location, value) };
        Ok(())
    }

    pub fn set_vec3(&self, name: &str, v0: f32, v1: f32, v2: f32) -> Result<(), BackendError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform3f(location, v0, v1, v2) };
        Ok(())
    }

    pub fn set_vec4(&self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) -> Result<(), BackendError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform4f(location, v0, v1, v2, v3) };
        Ok(())
    }
}
