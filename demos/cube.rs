//! Indexed, depth-tested cube spun by a requestAnimationFrame loop.

use glcanvas::{gl, shader, ClearMask, Color, Context, ContextKind, UniformLocation};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

const VERTEX: &str = r#"
attribute vec3 a_position;
attribute vec3 a_color;
uniform mat4 u_mvp;
varying vec3 v_color;

void main() {
    v_color = a_color;
    gl_Position = u_mvp * vec4(a_position, 1.0);
}
"#;

const FRAGMENT: &str = r#"
precision mediump float;
varying vec3 v_color;

void main() {
    gl_FragColor = vec4(v_color, 1.0);
}
"#;

// column-major 4x4, the layout uniformMatrix4fv expects

type Mat4 = [f32; 16];

#[rustfmt::skip]
const IDENTITY: Mat4 = [
    1., 0., 0., 0.,
    0., 1., 0., 0.,
    0., 0., 1., 0.,
    0., 0., 0., 1.,
];

fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.; 16];
    for col in 0..4 {
        for row in 0..4 {
            let mut sum = 0.;
            for k in 0..4 {
                sum += a[k * 4 + row] * b[col * 4 + k];
            }
            out[col * 4 + row] = sum;
        }
    }
    out
}

fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1. / (fovy / 2.).tan();
    let mut out = [0.; 16];
    out[0] = f / aspect;
    out[5] = f;
    out[10] = (far + near) / (near - far);
    out[11] = -1.;
    out[14] = 2. * far * near / (near - far);
    out
}

fn rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut out = IDENTITY;
    out[5] = c;
    out[6] = s;
    out[9] = -s;
    out[10] = c;
    out
}

fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut out = IDENTITY;
    out[0] = c;
    out[2] = -s;
    out[8] = s;
    out[10] = c;
    out
}

fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut out = IDENTITY;
    out[12] = x;
    out[13] = y;
    out[14] = z;
    out
}

fn create_canvas(width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas)?;
    Ok(canvas)
}

fn request_animation_frame(f: &Closure<dyn FnMut()>) {
    web_sys::window()
        .unwrap()
        .request_animation_frame(f.as_ref().unchecked_ref())
        .expect("requestAnimationFrame");
}

fn upload_geometry(ctx: &Context, program: &glcanvas::Program) -> Result<(), JsValue> {
    // 4 vertices per face so each face keeps a flat color
    #[rustfmt::skip]
    let positions: [f32; 72] = [
        // front
        -1., -1.,  1.,   1., -1.,  1.,   1.,  1.,  1.,  -1.,  1.,  1.,
        // back
        -1., -1., -1.,  -1.,  1., -1.,   1.,  1., -1.,   1., -1., -1.,
        // top
        -1.,  1., -1.,  -1.,  1.,  1.,   1.,  1.,  1.,   1.,  1., -1.,
        // bottom
        -1., -1., -1.,   1., -1., -1.,   1., -1.,  1.,  -1., -1.,  1.,
        // right
         1., -1., -1.,   1.,  1., -1.,   1.,  1.,  1.,   1., -1.,  1.,
        // left
        -1., -1., -1.,  -1., -1.,  1.,  -1.,  1.,  1.,  -1.,  1., -1.,
    ];

    let face_colors: [[f32; 3]; 6] = [
        [1.0, 0.3, 0.3],
        [0.3, 1.0, 0.3],
        [0.3, 0.3, 1.0],
        [1.0, 1.0, 0.3],
        [1.0, 0.3, 1.0],
        [0.3, 1.0, 1.0],
    ];
    let mut colors = Vec::with_capacity(72);
    for face in &face_colors {
        for _ in 0..4 {
            colors.extend_from_slice(face);
        }
    }

    #[rustfmt::skip]
    let indices: [u16; 36] = [
         0,  1,  2,   0,  2,  3,
         4,  5,  6,   4,  6,  7,
         8,  9, 10,   8, 10, 11,
        12, 13, 14,  12, 14, 15,
        16, 17, 18,  16, 18, 19,
        20, 21, 22,  20, 22, 23,
    ];

    let position_buffer = ctx.create_buffer()?;
    ctx.bind_buffer(gl::ARRAY_BUFFER, Some(&position_buffer))?;
    ctx.buffer_data_f32(gl::ARRAY_BUFFER, &positions, gl::STATIC_DRAW)?;
    let a_position = ctx.get_attrib_location(program, "a_position")? as u32;
    ctx.enable_vertex_attrib_array(a_position)?;
    ctx.vertex_attrib_pointer(a_position, 3, gl::FLOAT, false, 0, 0)?;

    let color_buffer = ctx.create_buffer()?;
    ctx.bind_buffer(gl::ARRAY_BUFFER, Some(&color_buffer))?;
    ctx.buffer_data_f32(gl::ARRAY_BUFFER, &colors, gl::STATIC_DRAW)?;
    let a_color = ctx.get_attrib_location(program, "a_color")? as u32;
    ctx.enable_vertex_attrib_array(a_color)?;
    ctx.vertex_attrib_pointer(a_color, 3, gl::FLOAT, false, 0, 0)?;

    let index_buffer = ctx.create_buffer()?;
    ctx.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, Some(&index_buffer))?;
    ctx.buffer_data_u16(gl::ELEMENT_ARRAY_BUFFER, &indices, gl::STATIC_DRAW)?;
    Ok(())
}

fn draw(ctx: &Context, u_mvp: &UniformLocation, angle: f32) -> Result<(), JsValue> {
    let model = mul(&rotation_y(angle), &rotation_x(angle * 0.7));
    let view = translation(0., 0., -5.);
    let projection = perspective(std::f32::consts::FRAC_PI_4, 1., 0.1, 100.);
    let mvp = mul(&projection, &mul(&view, &model));

    ctx.uniform_matrix4fv(u_mvp, false, &mvp)?;
    ctx.clear(ClearMask::COLOR | ClearMask::DEPTH)?;
    ctx.draw_elements(gl::TRIANGLES, 36, gl::UNSIGNED_SHORT, 0)?;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let canvas = create_canvas(600, 600)?;
    let ctx = Context::from_canvas(canvas.as_ref(), ContextKind::WebGl, None)?;

    let program = shader::link_program(&ctx, VERTEX, FRAGMENT)?;
    ctx.use_program(Some(&program))?;
    upload_geometry(&ctx, &program)?;
    let u_mvp = ctx.get_uniform_location(&program, "u_mvp")?;

    ctx.enable(gl::DEPTH_TEST)?;
    ctx.depth_func(gl::LEQUAL)?;
    ctx.viewport(0, 0, 600, 600)?;
    ctx.clear_color(Color::new(0.1, 0.1, 0.12, 1.))?;

    let handle = Rc::new(RefCell::new(None));
    let kickoff = handle.clone();
    let mut angle = 0.0f32;
    *kickoff.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        angle += 0.01;
        // the demo has no recovery path; abort the loop on any failure
        draw(&ctx, &u_mvp, angle).expect("draw");
        request_animation_frame(handle.borrow().as_ref().unwrap());
    }) as Box<dyn FnMut()>));
    request_animation_frame(kickoff.borrow().as_ref().unwrap());

    log::info!("cube loop started");
    Ok(())
}
