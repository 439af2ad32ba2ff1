//! Browser-side behavior of the marshalling layer and context
//! acquisition. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use glcanvas::{
    gl, Arg, ClearMask, Color, Context, ContextAttributes, ContextKind, Error, JsHandle,
    ShaderError, ShaderStage,
};
use js_sys::{Array, Float32Array, Function, Object, Reflect, Uint16Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// An object whose `probe` method hands back its arguments array.
fn probe_object() -> JsHandle {
    let target = Object::new();
    let probe = Function::new_no_args("return Array.prototype.slice.call(arguments);");
    Reflect::set(target.as_ref(), &"probe".into(), probe.as_ref()).unwrap();
    JsHandle::new(target.into())
}

fn probe(args: &[Arg]) -> Array {
    probe_object()
        .call("probe", args)
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn test_canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn webgl_context() -> Context {
    let canvas = test_canvas();
    Context::from_canvas(canvas.as_ref(), ContextKind::WebGl, None).unwrap()
}

#[wasm_bindgen_test]
fn float_slice_crosses_as_float32_array() {
    let data = [1., 2., 3., 4., 5., 6., 7., 8., 9.0f32];
    let seen = probe(&[Arg::Floats(&data)]);
    assert_eq!(seen.length(), 1);
    let view: Float32Array = seen.get(0).dyn_into().unwrap();
    assert_eq!(view.length(), 9);
    assert_eq!(view.to_vec(), data);
}

#[wasm_bindgen_test]
fn byte_slice_crosses_as_uint8_array() {
    let data = [7u8, 0, 255, 13];
    let seen = probe(&[Arg::Bytes(&data)]);
    let view: Uint8Array = seen.get(0).dyn_into().unwrap();
    assert_eq!(view.length(), 4);
    assert_eq!(view.to_vec(), data);
}

#[wasm_bindgen_test]
fn short_slice_crosses_as_uint16_array() {
    let data = [1u16, 2, 3, 65535];
    let seen = probe(&[Arg::Shorts(&data)]);
    let view: Uint16Array = seen.get(0).dyn_into().unwrap();
    assert_eq!(view.length(), 4);
    assert_eq!(view.to_vec(), data);
}

#[wasm_bindgen_test]
fn handle_arg_passes_the_stored_reference_untouched() {
    let marker = Object::new();
    let handle = JsHandle::new(marker.clone().into());
    let seen = probe(&[Arg::Object(&handle)]);
    assert!(Object::is(&seen.get(0), marker.as_ref()));
    assert!(!handle.is_released());
}

#[wasm_bindgen_test]
fn handle_slice_crosses_as_array_in_order() {
    let a = JsHandle::new(JsValue::from_str("a"));
    let b = JsHandle::new(JsValue::from_str("b"));
    let c = JsHandle::new(JsValue::from_str("c"));
    let seen = probe(&[Arg::Objects(&[&a, &b, &c])]);
    let array: Array = seen.get(0).dyn_into().unwrap();
    assert_eq!(array.length(), 3);
    assert_eq!(array.get(0).as_string().as_deref(), Some("a"));
    assert_eq!(array.get(1).as_string().as_deref(), Some("b"));
    assert_eq!(array.get(2).as_string().as_deref(), Some("c"));
}

#[wasm_bindgen_test]
fn null_and_scalars_pass_through() {
    let seen = probe(&[Arg::Null, 2.5f64.into(), true.into(), "hi".into()]);
    assert_eq!(seen.length(), 4);
    assert!(seen.get(0).is_null());
    assert_eq!(seen.get(1).as_f64(), Some(2.5));
    assert_eq!(seen.get(2).as_bool(), Some(true));
    assert_eq!(seen.get(3).as_string().as_deref(), Some("hi"));
}

#[wasm_bindgen_test]
fn release_is_idempotent_and_reads_null() {
    let mut handle = JsHandle::new(Object::new().into());
    handle.release();
    assert!(handle.is_released());
    handle.release();
    assert!(handle.is_released());
    assert!(handle.raw().is_null());
}

#[wasm_bindgen_test]
fn webgl_is_supported_in_a_browser() {
    assert!(Context::is_supported(ContextKind::WebGl));
}

#[wasm_bindgen_test]
fn missing_global_interface_fails_before_get_context() {
    let global = js_sys::global();
    let key = JsValue::from_str("WebGL2RenderingContext");
    let saved = Reflect::get(&global, &key).unwrap();
    Reflect::delete_property(&global, &key).unwrap();

    assert!(!Context::is_supported(ContextKind::WebGl2));

    // a canvas stand-in that records whether getContext ever ran
    let canvas = Object::new();
    let spy = Function::new_no_args("this.touched = true; return null;");
    Reflect::set(canvas.as_ref(), &"getContext".into(), spy.as_ref()).unwrap();

    let err = Context::from_canvas(canvas.as_ref(), ContextKind::WebGl2, None).unwrap_err();
    assert!(matches!(err, Error::NotSupported(kind) if kind == "webgl2"));
    assert!(Reflect::get(canvas.as_ref(), &"touched".into())
        .unwrap()
        .is_undefined());

    Reflect::set(&global, &key, &saved).unwrap();
    assert!(Context::is_supported(ContextKind::WebGl2));
}

#[wasm_bindgen_test]
fn acquires_a_webgl_context_and_clears() {
    let ctx = webgl_context();
    assert_eq!(ctx.kind(), ContextKind::WebGl);
    ctx.clear_color(Color::BLACK).unwrap();
    ctx.clear(ClearMask::COLOR).unwrap();
    assert_eq!(ctx.get_error().unwrap(), gl::NO_ERROR);
}

#[wasm_bindgen_test]
fn buffer_upload_observes_nine_floats() {
    let ctx = webgl_context();
    let buffer = ctx.create_buffer().unwrap();
    ctx.bind_buffer(gl::ARRAY_BUFFER, Some(&buffer)).unwrap();

    let data = [0.5f32; 9];
    ctx.buffer_data_f32(gl::ARRAY_BUFFER, &data, gl::STATIC_DRAW)
        .unwrap();

    let size = ctx
        .get_buffer_parameter(gl::ARRAY_BUFFER, gl::BUFFER_SIZE)
        .unwrap();
    assert_eq!(size.as_f64(), Some(9. * 4.));
    assert!(!buffer.is_released());
}

#[wasm_bindgen_test]
fn context_attributes_reach_get_context() {
    let canvas = test_canvas();
    let attrs = ContextAttributes {
        alpha: false,
        ..Default::default()
    };
    let ctx = Context::from_canvas(canvas.as_ref(), ContextKind::WebGl, Some(&attrs)).unwrap();
    let effective = ctx.call("getContextAttributes", &[]).unwrap();
    let alpha = Reflect::get(&effective, &"alpha".into()).unwrap();
    assert_eq!(alpha.as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn scalar_mismatch_is_an_invalid_cast() {
    let ctx = webgl_context();
    let err = ctx
        .call_scalar::<bool>("getSupportedExtensions", &[])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCast { expected: "boolean", .. }));
}

#[wasm_bindgen_test]
fn missing_method_is_an_invalid_cast() {
    let ctx = webgl_context();
    let err = ctx.call("noSuchMethod", &[]).unwrap_err();
    assert!(matches!(err, Error::InvalidCast { expected: "function", .. }));
}

#[wasm_bindgen_test]
fn links_a_minimal_program() {
    let ctx = webgl_context();
    let program = glcanvas::link_program(
        &ctx,
        "void main() { gl_Position = vec4(0.0, 0.0, 0.0, 1.0); }",
        "precision mediump float; void main() { gl_FragColor = vec4(1.0); }",
    )
    .unwrap();
    assert!(ctx.get_program_link_status(&program).unwrap());
    assert_eq!(ctx.get_attached_shaders(&program).unwrap().len(), 2);
}

#[wasm_bindgen_test]
fn broken_shader_surfaces_the_info_log() {
    let ctx = webgl_context();
    let err = glcanvas::compile_shader(&ctx, ShaderStage::Fragment, "not glsl").unwrap_err();
    assert!(matches!(err, ShaderError::Compile { .. }));
}
