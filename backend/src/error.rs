use thiserror::Error;

use crate::shaders::ShaderStage;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("windowing subsystem initialization failed: {0}")]
    Init(String),

    #[error("could not open the window: {0}")]
    WindowCreation(String),

    #[error("could not create the OpenGL context: {0}")]
    ContextCreation(String),

    #[error("could not resolve OpenGL entry points: {0}")]
    ExtensionResolution(String),

    #[error("glCreateShader({0}) failed")]
    ShaderCreation(ShaderStage),

    #[error("{stage} shader compilation error: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("program link error: {log}")]
    ProgramLink { log: String },

    #[error("'{0}' is not an active attribute of the program")]
    UnknownAttribute(String),

    #[error("'{0}' is not an active uniform of the program")]
    UnknownUniform(String),

    #[error("texture error: {0}")]
    Texture(String),
}
