//! Colored triangle from one interleaved vertex buffer.

use glcanvas::{gl, shader, ClearMask, Color, Context, ContextKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

const VERTEX: &str = r#"
attribute vec2 a_position;
attribute vec3 a_color;
varying vec3 v_color;

void main() {
    v_color = a_color;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

const FRAGMENT: &str = r#"
precision mediump float;
varying vec3 v_color;

void main() {
    gl_FragColor = vec4(v_color, 1.0);
}
"#;

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

    #[rustfmt::skip]
    let vertices: [f32; 15] = [
        //   x     y     r    g    b
         0.0,  0.6,   1.0, 0.2, 0.2,
        -0.6, -0.5,   0.2, 1.0, 0.2,
         0.6, -0.5,   0.2, 0.2, 1.0,
    ];

    let buffer = ctx.create_buffer()?;
    ctx.bind_buffer(gl::ARRAY_BUFFER, Some(&buffer))?;
    ctx.buffer_data_f32(gl::ARRAY_BUFFER, &vertices, gl::STATIC_DRAW)?;

    let stride = 5 * std::mem::size_of::<f32>() as i32;
    let a_position = ctx.get_attrib_location(&program, "a_position")? as u32;
    ctx.enable_vertex_attrib_array(a_position)?;
    ctx.vertex_attrib_pointer(a_position, 2, gl::FLOAT, false, stride, 0)?;
    let a_color = ctx.get_attrib_location(&program, "a_color")? as u32;
    ctx.enable_vertex_attrib_array(a_color)?;
    ctx.vertex_attrib_pointer(a_color, 3, gl::FLOAT, false, stride, 8)?;

    ctx.viewport(0, 0, 600, 600)?;
    ctx.clear_color(Color::BLACK)?;
    ctx.clear(ClearMask::COLOR)?;
    ctx.draw_arrays(gl::TRIANGLES, 0, 3)?;

    log::info!("triangle drawn");
    Ok(())
}
