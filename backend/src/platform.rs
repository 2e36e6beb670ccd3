use crate::config::{ContextAttributes, WindowConfig};
use crate::error::BackendError;
use crate::events::InputEvent;

/// The windowing and GL-loading layer underneath a [`GraphicsContext`].
///
/// Implementations only have to perform each step; ordering, rollback on
/// failure and teardown order are handled by the context.
///
/// [`GraphicsContext`]: crate::context::GraphicsContext
pub trait Platform: Sized {
    type Window;
    type Context;
    type RawEvent;
    /// Capability handed out once GPU entry points are resolved.
    type Functions;

    fn init() -> Result<Self, BackendError>;

    fn create_window(&mut self, config: &WindowConfig) -> Result<Self::Window, BackendError>;

    fn create_context(
        &mut self,
        window: &Self::Window,
        requested: &ContextAttributes,
        vsync: bool,
    ) -> Result<Self::Context, BackendError>;

    fn resolve(&self, context: &Self::Context) -> Result<Self::Functions, BackendError>;

    /// Attributes the driver actually gave the context, queried through the
    /// resolved entry points rather than the stored request.
    fn negotiated(
        &self,
        window: &Self::Window,
        context: &Self::Context,
        functions: &Self::Functions,
    ) -> Result<ContextAttributes, BackendError>;

    /// Never blocks.
    fn poll_event(&mut self) -> Option<Self::RawEvent>;

    fn classify(event: &Self::RawEvent) -> InputEvent;

    fn swap_buffers(&self, window: &Self::Window);

    fn drawable_size(&self, window: &Self::Window) -> (u32, u32);

    fn destroy_context(&mut self, context: Self::Context);

    fn destroy_window(&mut self, window: Self::Window);

    fn shutdown(self);
}
