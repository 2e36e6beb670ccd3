//! Opens the lesson window, presents empty frames until the loop stops, then
//! creates a single buffer object to prove the context is usable.

use backend::glutils::{Buffer, BufferTarget};
use backend::EventLoop;
use clap::Parser;
use lessons::LessonArgs;
use log::info;

fn run() -> anyhow::Result<()> {
    let args = LessonArgs::parse();
    let mut ctx = lessons::open_window(&args)?;

    {
        let mut event_loop = EventLoop::new(&mut ctx).with_policy(args.exit_policy());
        event_loop.run(|_| {});
    }

    let gl = *ctx.functions();
    {
        let vertex_buffer = Buffer::new(&gl, BufferTarget::Array);
        info!("generated vertex buffer {}", vertex_buffer.id());
    }

    ctx.destroy();
    Ok(())
}

fn main() {
    lessons::exit_on_error(run());
}
