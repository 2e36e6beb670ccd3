use log::{debug, info, warn};
use sdl2::event::{Event, EventType};
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};

use crate::config::{ContextAttributes, Profile, WindowConfig};
use crate::error::BackendError;
use crate::events::InputEvent;
use crate::glutils::Gl;
use crate::platform::Platform;

pub struct SdlPlatform {
    // fields drop in declaration order, the Sdl handle last
    event_pump: sdl2::EventPump,
    video_subsystem: sdl2::VideoSubsystem,
    _sdl_context: sdl2::Sdl,
}

impl SdlPlatform {
    fn set_gl_attributes(&self, requested: &ContextAttributes) {
        let gl_attr = self.video_subsystem.gl_attr();
        gl_attr.set_context_profile(match requested.profile {
            Profile::Core => GLProfile::Core,
            Profile::Compatibility => GLProfile::Compatibility,
        });
        gl_attr.set_context_version(requested.gl_major, requested.gl_minor);
        gl_attr.set_stencil_size(requested.stencil_bits);
    }
}

impl Platform for SdlPlatform {
    type Window = Window;
    type Context = GLContext;
    type RawEvent = Event;
    type Functions = Gl;

    fn init() -> Result<Self, BackendError> {
        let sdl_context = sdl2::init().map_err(BackendError::Init)?;
        let video_subsystem = sdl_context.video().map_err(BackendError::Init)?;
        let event_pump = sdl_context.event_pump().map_err(BackendError::Init)?;
        debug!("SDL video driver: {}", video_subsystem.current_video_driver());

        Ok(SdlPlatform {
            event_pump,
            video_subsystem,
            _sdl_context: sdl_context,
        })
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<Window, BackendError> {
        // pixel format attributes must be in place before the window exists
        self.set_gl_attributes(&config.attributes());

        let mut builder = self
            .video_subsystem
            .window(&config.title, config.width, config.height);
        builder.opengl();
        if config.centered {
            builder.position_centered();
        }
        if config.resizable {
            builder.resizable();
        }

        builder
            .build()
            .map_err(|e| BackendError::WindowCreation(format!("{e}: {}", sdl2::get_error())))
    }

    fn create_context(
        &mut self,
        window: &Window,
        requested: &ContextAttributes,
        vsync: bool,
    ) -> Result<GLContext, BackendError> {
        self.set_gl_attributes(requested);

        let gl_ctx = window
            .gl_create_context()
            .map_err(BackendError::ContextCreation)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(BackendError::ContextCreation)?;

        let interval = if vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = self.video_subsystem.gl_set_swap_interval(interval) {
            warn!("could not set swap interval {:?}: {e}", interval);
        }

        Ok(gl_ctx)
    }

    fn resolve(&self, _context: &GLContext) -> Result<Gl, BackendError> {
        let video_subsystem = &self.video_subsystem;
        Gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _)
    }

    fn negotiated(
        &self,
        _window: &Window,
        _context: &GLContext,
        functions: &Gl,
    ) -> Result<ContextAttributes, BackendError> {
        // SDL only echoes the requested version and profile back, so ask the driver
        let (gl_major, gl_minor) = functions.context_version().ok_or_else(|| {
            BackendError::ContextCreation("driver did not report a GL version".to_string())
        })?;
        let profile = functions.context_profile((gl_major, gl_minor));

        Ok(ContextAttributes {
            gl_major,
            gl_minor,
            profile,
            stencil_bits: self.video_subsystem.gl_attr().stencil_size(),
        })
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.event_pump.poll_event()
    }

    fn classify(event: &Event) -> InputEvent {
        match event {
            Event::Quit { .. } => InputEvent::Quit,
            Event::KeyDown { keycode, .. } => {
                InputEvent::KeyDown(keycode.map_or(0, |k| k.into_i32()))
            }
            Event::MouseButtonDown { mouse_btn, .. } => InputEvent::MouseButtonDown(*mouse_btn as u8),
            other => InputEvent::Other(raw_event_type(other)),
        }
    }

    fn swap_buffers(&self, window: &Window) {
        window.gl_swap_window();
    }

    fn drawable_size(&self, window: &Window) -> (u32, u32) {
        window.drawable_size()
    }

    fn destroy_context(&mut self, context: GLContext) {
        drop(context);
    }

    fn destroy_window(&mut self, window: Window) {
        drop(window);
    }

    fn shutdown(self) {
        info!("shutting down SDL");
        drop(self);
    }
}

/// SDL event type number for events the loop does not classify.
fn raw_event_type(event: &Event) -> u32 {
    let event_type = match event {
        Event::Unknown { type_, .. } | Event::User { type_, .. } => return *type_,
        Event::Window { .. } => EventType::Window,
        Event::KeyUp { .. } => EventType::KeyUp,
        Event::TextEditing { .. } => EventType::TextEditing,
        Event::TextInput { .. } => EventType::TextInput,
        Event::MouseMotion { .. } => EventType::MouseMotion,
        Event::MouseButtonUp { .. } => EventType::MouseButtonUp,
        Event::MouseWheel { .. } => EventType::MouseWheel,
        Event::ControllerAxisMotion { .. } => EventType::ControllerAxisMotion,
        Event::ControllerButtonDown { .. } => EventType::ControllerButtonDown,
        Event::ControllerButtonUp { .. } => EventType::ControllerButtonUp,
        Event::FingerDown { .. } => EventType::FingerDown,
        Event::FingerUp { .. } => EventType::FingerUp,
        Event::FingerMotion { .. } => EventType::FingerMotion,
        Event::ClipboardUpdate { .. } => EventType::ClipboardUpdate,
        Event::DropFile { .. } => EventType::DropFile,
        _ => return 0,
    };
    event_type as u32
}
