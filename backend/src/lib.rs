pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod glutils;
pub mod platform;
pub mod sdl;
pub mod shaders;

pub use config::{ContextAttributes, Profile, WindowConfig};
pub use context::GraphicsContext;
pub use error::BackendError;
pub use events::{EventLoop, EventObserver, ExitPolicy, FrameInfo, InputEvent, LogObserver, LoopState};
pub use glutils::Gl;
pub use platform::Platform;
pub use sdl::SdlPlatform;
pub use shaders::{ShaderApi, ShaderProgram, ShaderStage};
