//! One white triangle from a vertex buffer and a minimal shader program.

use backend::glutils::*;
use backend::{EventLoop, GraphicsContext, SdlPlatform, ShaderProgram};
use clap::Parser;
use lessons::LessonArgs;

const VERTEX_SOURCE: &str = r#"
#version 150 core

in vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"
#version 150 core

out vec4 outColor;

void main() {
    outColor = vec4(0.8, 0.8, 0.8, 0.8);
}
"#;

#[rustfmt::skip]
const VERTICES: [f32; 6] = [
     0.0,  0.5, // Vertex 1
     0.5, -0.5, // Vertex 2
    -0.5, -0.5, // Vertex 3
];

fn draw(ctx: &mut GraphicsContext<SdlPlatform>, args: &LessonArgs) -> anyhow::Result<()> {
    let gl = *ctx.functions();

    // the attribute layout below is recorded into this array
    let vao = VertexArray::new(&gl);
    vao.bind();
    let _vbo = Buffer::with_static_data(&gl, BufferTarget::Array, &VERTICES);

    let program = ShaderProgram::from_str(&gl, VERTEX_SOURCE, FRAGMENT_SOURCE)?;
    program.use_program();
    let position = program.attrib_location("position")?;
    vertex_attrib_f32(&gl, position, 2, 2, 0);

    let mut event_loop = EventLoop::new(ctx).with_policy(args.exit_policy());
    event_loop.run(|frame| {
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
