//! Checkerboard texture on a quad; exercises the byte upload path.

use glcanvas::{gl, shader, ClearMask, Color, Context, ContextKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

const VERTEX: &str = r#"
attribute vec2 a_position;
attribute vec2 a_texcoord;
varying vec2 v_texcoord;

void main() {
    v_texcoord = a_texcoord;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

const FRAGMENT: &str = r#"
precision mediump float;
varying vec2 v_texcoord;
uniform sampler2D u_sampler;

void main() {
    gl_FragColor = texture2D(u_sampler, v_texcoord);
}
"#;

const CHECKER_SIZE: i32 = 8;

fn checkerboard() -> Vec<u8> {
    let mut pixels = Vec::with_capacity((CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
    for y in 0..CHECKER_SIZE {
        for x in 0..CHECKER_SIZE {
            let on = (x + y) % 2 == 0;
            let v = if on { 0xE0 } else { 0x30 };
            pixels.extend_from_slice(&[v, v, if on { 0xFF } else { 0x60 }, 0xFF]);
        }
    }
    pixels
}

fn create_canvas(width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas)?;
    Ok(canvas)
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let canvas = create_canvas(600, 600)?;
    let ctx = Context::from_canvas(canvas.as_ref(), ContextKind::WebGl, None)?;

    let program = shader::link_program(&ctx, VERTEX, FRAGMENT)?;
    ctx.use_program(Some(&program))?;

    // positions and texcoords interleaved, one quad as a triangle strip
    #[rustfmt::skip]
    let vertices: [f32; 16] = [
        -0.8, -0.8,   0., 1.,
         0.8, -0.8,   1., 1.,
        -0.8,  0.8,   0., 0.,
         0.8,  0.8,   1., 0.,
    ];

    let buffer = ctx.create_buffer()?;
    ctx.bind_buffer(gl::ARRAY_BUFFER, Some(&buffer))?;
    ctx.buffer_data_f32(gl::ARRAY_BUFFER, &vertices, gl::STATIC_DRAW)?;

    let stride = 4 * std::mem::size_of::<f32>() as i32;
    let a_position = ctx.get_attrib_location(&program, "a_position")? as u32;
    ctx.enable_vertex_attrib_array(a_position)?;
    ctx.vertex_attrib_pointer(a_position, 2, gl::FLOAT, false, stride, 0)?;
    let a_texcoord = ctx.get_attrib_location(&program, "a_texcoord")? as u32;
    ctx.enable_vertex_attrib_array(a_texcoord)?;
    ctx.vertex_attrib_pointer(a_texcoord, 2, gl::FLOAT, false, stride, 8)?;

    let texture = ctx.create_texture()?;
    ctx.active_texture(gl::TEXTURE0)?;
    ctx.bind_texture(gl::TEXTURE_2D, Some(&texture))?;
    let pixels = checkerboard();
    ctx.tex_image_2d(
        gl::TEXTURE_2D,
        0,
        gl::RGBA,
        CHECKER_SIZE,
        CHECKER_SIZE,
        0,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        Some(&pixels),
    )?;
    ctx.tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32)?;
    ctx.tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32)?;
    ctx.tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32)?;
    ctx.tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32)?;

    let u_sampler = ctx.get_uniform_location(&program, "u_sampler")?;
    ctx.uniform1i(&u_sampler, 0)?;

    ctx.viewport(0, 0, 600, 600)?;
    ctx.clear_color(Color::new(0.15, 0.15, 0.15, 1.))?;
    ctx.clear(ClearMask::COLOR)?;
    ctx.draw_arrays(gl::TRIANGLE_STRIP, 0, 4)?;

    log::info!("textured quad drawn");
    Ok(())
}
