//! The triangle again, colored through a uniform that pulses over time.

use std::time::Instant;

use backend::glutils::*;
use backend::{EventLoop, GraphicsContext, SdlPlatform, ShaderProgram};
use clap::Parser;
use lessons::LessonArgs;
use log::warn;

const VERTEX_SOURCE: &str = r#"
#version 150 core

in vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"
#version 150 core

uniform vec3 triangleColor;

out vec4 outColor;

void main() {
    outColor = vec4(triangleColor, 1.0);
}
"#;

#[rustfmt::skip]
const VERTICES: [f32; 6] = [
     0.0,  0.5,
     0.5, -0.5,
    -0.5, -0.5,
];

fn draw(ctx: &mut GraphicsContext<SdlPlatform>, args: &LessonArgs) -> anyhow::Result<()> {
    let gl = *ctx.functions();

    let vao = VertexArray::new(&gl);
    vao.bind();
    let _vbo = Buffer::with_static_data(&gl, BufferTarget::Array, &VERTICES);

    let program = ShaderProgram::from_str(&gl, VERTEX_SOURCE, FRAGMENT_SOURCE)?;
    program.use_program();
    let position = program.attrib_location("position")?;
    vertex_attrib_f32(&gl, position, 2, 2, 0);
    program.set_vec3("triangleColor", 1.0, 0.0, 0.0)?;

    let start = Instant::now();
    let mut event_loop = EventLoop::new(ctx).with_policy(args.exit_policy());
    event_loop.run(|frame| {
        let t = start.elapsed().as_secs_f32();
        if let Err(e) = program.set_vec3("triangleColor", ((t * 4.0).sin() + 1.0) / 2.0, 0.0, 0.0) {
            warn!("{e}");
        }

        viewport(frame.functions, frame.drawable_size);
        clear_screen(frame.functions, 0.0, 0.0, 0.0);
        draw_triangles(frame.functions, 0, 3);
    });
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let args = LessonArgs::parse();
    let mut ctx = lessons::open_window(&args)?;
    let result = draw(&mut ctx, &args);
    ctx.destroy();
    result
}

fn main() {
    lessons::exit_on_error(run());
}
