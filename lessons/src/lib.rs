pub mod cli;
pub mod logging;

use backend::{GraphicsContext, SdlPlatform};
use log::error;

pub use cli::LessonArgs;

/// Installs logging and opens the lesson window with its GL context.
pub fn open_window(args: &LessonArgs) -> anyhow::Result<GraphicsContext<SdlPlatform>> {
    logging::set_up_logging(args.log_level())?;
    let ctx = GraphicsContext::create(args.window_config())?;
    if args.verbose > 0 {
        backend::glutils::log_gl_info(ctx.functions());
    }
    Ok(ctx)
}

/// Reports a failed lesson and exits with a non-zero status.
pub fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        if log::log_enabled!(log::Level::Error) {
            error!("{e:#}");
        } else {
            eprintln!("{e:#}");
        }
        std::process::exit(1);
    }
}
