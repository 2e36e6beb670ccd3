use log::{debug, info, warn};

use crate::config::{ContextAttributes, WindowConfig};
use crate::error::BackendError;
use crate::platform::Platform;

struct Live<P: Platform> {
    platform: P,
    window: P::Window,
    context: P::Context,
    functions: P::Functions,
}

/// A window with a current OpenGL context and resolved entry points.
///
/// Teardown runs when the value is dropped or passed to
/// [`destroy`](GraphicsContext::destroy): the context is released first,
/// then the window, then the windowing subsystem.
pub struct GraphicsContext<P: Platform> {
    // only `None` while `drop` runs
    live: Option<Live<P>>,
    attributes: ContextAttributes,
}

impl<P: Platform> GraphicsContext<P> {
    pub fn create(config: WindowConfig) -> Result<Self, BackendError> {
        config.validate()?;
        let platform = P::init()?;
        Self::with_platform(platform, config)
    }

    /// Same as [`create`](Self::create) on an already initialized platform.
    /// The platform is shut down if any later step fails.
    pub fn with_platform(mut platform: P, config: WindowConfig) -> Result<Self, BackendError> {
        if let Err(e) = config.validate() {
            platform.shutdown();
            return Err(e);
        }

        let window = match platform.create_window(&config) {
            Ok(w) => w,
            Err(e) => {
                platform.shutdown();
                return Err(e);
            }
        };

        let requested = config.attributes();
        let context = match platform.create_context(&window, &requested, config.vsync) {
            Ok(c) => c,
            Err(e) => {
                platform.destroy_window(window);
                platform.shutdown();
                return Err(e);
            }
        };

        // the driver can only be asked what it negotiated once its entry points exist
        let negotiated = platform.resolve(&context).and_then(|functions| {
            let attributes = platform.negotiated(&window, &context, &functions)?;
            if attributes.satisfies(&requested) {
                Ok((attributes, functions))
            } else {
                Err(BackendError::ContextCreation(format!(
                    "requested {:?} but the driver negotiated {:?}",
                    requested, attributes
                )))
            }
        });

        match negotiated {
            Ok((attributes, functions)) => {
                debug!("negotiated context {:?}", attributes);
                info!(
                    "'{}' {}x{} ready with OpenGL {}.{} {:?}",
                    config.title,
                    config.width,
                    config.height,
                    attributes.gl_major,
                    attributes.gl_minor,
                    attributes.profile
                );
                Ok(GraphicsContext {
                    live: Some(Live {
                        platform,
                        window,
                        context,
                        functions,
                    }),
                    attributes,
                })
            }
            Err(e) => {
                warn!("context setup failed, releasing window: {e}");
                platform.destroy_context(context);
                platform.destroy_window(window);
                platform.shutdown();
                Err(e)
            }
        }
    }

    fn live(&self) -> &Live<P> {
        match &self.live {
            Some(live) => live,
            None => unreachable!("graphics context used during teardown"),
        }
    }

    fn live_mut(&mut self) -> &mut Live<P> {
        match &mut self.live {
            Some(live) => live,
            None => unreachable!("graphics context used during teardown"),
        }
    }

    pub fn attributes(&self) -> ContextAttributes {
        self.attributes
    }

    pub fn functions(&self) -> &P::Functions {
        &self.live().functions
    }

    pub fn drawable_size(&self) -> (u32, u32) {
        let live = self.live();
        live.platform.drawable_size(&live.window)
    }

    pub fn swap_buffers(&self) {
        let live = self.live();
        live.platform.swap_buffers(&live.window);
    }

    pub fn poll_event(&mut self) -> Option<P::RawEvent> {
        self.live_mut().platform.poll_event()
    }

    pub fn destroy(self) {
        drop(self);
    }
}

impl<P: Platform> Drop for GraphicsContext<P> {
    fn drop(&mut self) {
        if let Some(Live {
            mut platform,
            window,
            context,
            functions,
        }) = self.live.take()
        {
            debug!("releasing context, window and windowing subsystem");
            drop(functions);
            platform.destroy_context(context);
            platform.destroy_window(window);
            platform.shutdown();
        }
    }
}
