use crate::context::{Context, ContextAttributes, ContextKind};
use crate::error::Error;
use crate::marshal::Arg;
use crate::objects::VertexArray;
use std::ops::Deref;
use wasm_bindgen::JsValue;

/// A WebGL 2 rendering context.
///
/// Derefs to [`Context`] for the whole WebGL 1 surface and adds the
/// operations that only exist on `WebGL2RenderingContext`.
#[derive(Debug)]
pub struct Context2 {
    inner: Context,
}

impl Context2 {
    pub fn is_supported() -> bool {
        Context::is_supported(ContextKind::WebGl2)
    }

    pub fn from_canvas(
        canvas: &JsValue,
        attributes: Option<&ContextAttributes>,
    ) -> Result<Self, Error> {
        Context::from_canvas(canvas, ContextKind::WebGl2, attributes)
            .map(|inner| Self { inner })
    }

    pub fn create_vertex_array(&self) -> Result<VertexArray, Error> {
        self.call_object("createVertexArray", &[])
    }

    pub fn bind_vertex_array(&self, vao: Option<&VertexArray>) -> Result<(), Error> {
        self.call(
            "bindVertexArray",
            &[vao.map_or(Arg::Null, |v| Arg::Object(v))],
        )
        .map(drop)
    }

    pub fn delete_vertex_array(&self, vao: &VertexArray) -> Result<(), Error> {
        self.call("deleteVertexArray", &[Arg::Object(vao)]).map(drop)
    }

    pub fn vertex_attrib_divisor(&self, index: u32, divisor: u32) -> Result<(), Error> {
        self.call("vertexAttribDivisor", &[index.into(), divisor.into()])
            .map(drop)
    }

    pub fn draw_arrays_instanced(
        &self,
        mode: u32,
        first: i32,
        count: i32,
        instances: i32,
    ) -> Result<(), Error> {
        self.call(
            "drawArraysInstanced",
            &[mode.into(), first.into(), count.into(), instances.into()],
        )
        .map(drop)
    }

    pub fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        kind: u32,
        offset: i32,
        instances: i32,
    ) -> Result<(), Error> {
        self.call(
            "drawElementsInstanced",
            &[
                mode.into(),
                count.into(),
                kind.into(),
                offset.into(),
                instances.into(),
            ],
        )
        .map(drop)
    }

    pub fn read_buffer(&self, src: u32) -> Result<(), Error> {
        self.call("readBuffer", &[src.into()]).map(drop)
    }
}

impl Deref for Context2 {
    type Target = Context;

    fn deref(&self) -> &Context {
        &self.inner
    }
}
