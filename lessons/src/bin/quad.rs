//! A textured quad made of two triangles sharing vertices through an element
//! buffer. Vertex colors are interpolated across the face and tint the texture.

use std::path::PathBuf;

use backend::glutils::*;
use backend::{EventLoop, GraphicsContext, SdlPlatform, ShaderProgram};
use clap::Parser;
use lessons::LessonArgs;
use log::info;

#[derive(Debug, Parser)]
struct QuadArgs {
    #[command(flatten)]
    lesson: LessonArgs,

    /// Image to put on the quad; a checkerboard is generated when omitted
    #[arg(long)]
    texture: Option<PathBuf>,
}

const VERTEX_SOURCE: &str = r#"
#version 150 core

in vec2 position;
in vec3 color;
in vec2 texcoord;

out vec3 Color;
out vec2 Texcoord;

void main() {
    Color = color;
    Texcoord = texcoord;
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"
#version 150 core

in vec3 Color;
in vec2 Texcoord;

out vec4 outColor;

uniform sampler2D tex;

void main() {
    outColor = texture(tex, Texcoord) * vec4(Color, 1.0);
}
"#;

// position (2), color (3), texcoord (2)
const STRIDE: u32 = 7;

#[rustfmt::skip]
const VERTICES: [f32; 28] = [
    -0.5,  0.5, 1.0, 0.0, 0.0, 0.0, 0.0, // top-left
     0.5,  0.5, 0.0, 1.0, 0.0, 1.0, 0.0, // top-right
     0.5, -0.5, 0.0, 0.0, 1.0, 1.0, 1.0, // bottom-right
    -0.5, -0.5, 1.0, 1.0, 1.0, 0.0, 1.0, // bottom-left
];

#[rustfmt::skip]
const ELEMENTS: [u32; 6] = [
    0, 1, 2,
    2, 3, 0,
];

fn draw(ctx: &mut GraphicsContext<SdlPlatform>, args: &QuadArgs) -> anyhow::Result<()> {
    let gl = *ctx.functions();

    let vao = VertexArray::new(&gl);
    vao.bind();
    let _vbo = Buffer::with_static_data(&gl, BufferTarget::Array, &VERTICES);
    // the element binding is stored in the bound vertex array
    let _ebo = Buffer::with_static_data(&gl, BufferTarget::Element, &ELEMENTS);

    let program = ShaderProgram::from_str(&gl, VERTEX_SOURCE, FRAGMENT_SOURCE)?;
    program.use_program();
    vertex_attrib_f32(&gl, program.attrib_location("position")?, 2, STRIDE, 0);
    vertex_attrib_f32(&gl, program.attrib_location("color")?, 3, STRIDE, 2);
    vertex_attrib_f32(&gl, program.attrib_location("texcoord")?, 2, STRIDE, 5);

    let texture = match &args.texture {
        Some(path) => {
            info!("loading texture {}", path.display());
            Texture2d::from_file(&gl, path)?
        }
        None => {
            let (side, pixels) = checkerboard(8, 16, [255, 255, 255], [64, 64, 64]);
            Texture2d::from_pixels(&gl, side, side, 3, &pixels)?
        }
    };
    texture.bind(0);
    program.set_i32("tex", 0)?;

    let mut event_loop = EventLoop::new(ctx).with_policy(args.lesson.exit_policy());
    event_loop.run(|frame| {
        viewport(frame.functions, frame.drawable_size);
        clear_screen(frame.functions, 0.0, 0.0, 0.0);
        draw_indexed_triangles(frame.functions, ELEMENTS.len() as i32);
    });
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let args = QuadArgs::parse();
    let mut ctx = lessons::open_window(&args.lesson)?;
    let result = draw(&mut ctx, &args);
    ctx.destroy();
    result
}

fn main() {
    lessons::exit_on_error(run());
}
