use crate::color::Color;
use crate::error::Error;
use crate::gl::{self, ClearMask};
use crate::handle::{FromJs, FromRaw, JsHandle};
use crate::marshal::{self, Arg};
use crate::objects::{
    Buffer, Framebuffer, Program, Renderbuffer, Shader, Texture, UniformLocation,
};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};

/// Which rendering context to ask a canvas for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextKind {
    WebGl,
    WebGl2,
}

impl ContextKind {
    /// The id string `getContext` takes.
    pub fn context_id(self) -> &'static str {
        match self {
            ContextKind::WebGl => "webgl",
            ContextKind::WebGl2 => "webgl2",
        }
    }

    /// The global interface whose presence signals support.
    pub fn global_interface(self) -> &'static str {
        match self {
            ContextKind::WebGl => "WebGLRenderingContext",
            ContextKind::WebGl2 => "WebGL2RenderingContext",
        }
    }
}

/// Mirror of `WebGLContextAttributes`. Converted to a JS object only at
/// acquisition time; afterwards the browser owns the effective values.
#[derive(Clone, Copy, Debug)]
pub struct ContextAttributes {
    pub alpha: bool,
    pub depth: bool,
    pub stencil: bool,
    pub antialias: bool,
    pub premultiplied_alpha: bool,
    pub preserve_drawing_buffer: bool,
    /// `"low-power"` or `"high-performance"`; `None` leaves it to the
    /// browser default.
    pub power_preference: Option<&'static str>,
}

impl Default for ContextAttributes {
    fn default() -> Self {
        Self {
            alpha: true,
            depth: true,
            stencil: false,
            antialias: true,
            premultiplied_alpha: true,
            preserve_drawing_buffer: false,
            power_preference: None,
        }
    }
}

impl ContextAttributes {
    fn to_object(&self) -> Result<js_sys::Object, Error> {
        let obj = js_sys::Object::new();
        for (key, value) in [
            ("alpha", self.alpha),
            ("depth", self.depth),
            ("stencil", self.stencil),
            ("antialias", self.antialias),
            ("premultipliedAlpha", self.premultiplied_alpha),
            ("preserveDrawingBuffer", self.preserve_drawing_buffer),
        ] {
            Reflect::set(&obj, &JsValue::from_str(key), &JsValue::from(value))
                .map_err(Error::Js)?;
        }
        if let Some(preference) = self.power_preference {
            Reflect::set(
                &obj,
                &JsValue::from_str("powerPreference"),
                &JsValue::from_str(preference),
            )
            .map_err(Error::Js)?;
        }
        Ok(obj)
    }
}

fn global_has(name: &str) -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str(name)).unwrap_or(false)
}

/// A WebGL 1 rendering context bound to one canvas.
///
/// Every method is a thin relay: arguments are marshalled, the matching
/// context method is invoked by name, per-call scratch values are freed,
/// and the result is shaped for the caller. Failures are never caught or
/// retried here.
#[derive(Debug)]
pub struct Context {
    handle: JsHandle,
    kind: ContextKind,
}

impl Context {
    /// Whether the current environment exposes `kind` at global scope.
    ///
    /// Pure query; safe to call before any context exists.
    pub fn is_supported(kind: ContextKind) -> bool {
        global_has(kind.global_interface())
    }

    /// Acquires a `kind` context from `canvas` (any canvas-like JS
    /// object).
    ///
    /// Fails with [`Error::NotSupported`] before touching the canvas when
    /// the environment lacks the matching global interface.
    pub fn from_canvas(
        canvas: &JsValue,
        kind: ContextKind,
        attributes: Option<&ContextAttributes>,
    ) -> Result<Self, Error> {
        if !Self::is_supported(kind) {
            return Err(Error::NotSupported(kind.context_id().to_owned()));
        }
        let raw = match attributes {
            Some(attrs) => marshal::invoke(
                canvas,
                "getContext",
                &[
                    Arg::from(kind.context_id()),
                    Arg::Value(attrs.to_object()?.into()),
                ],
            )?,
            None => marshal::invoke(canvas, "getContext", &[Arg::from(kind.context_id())])?,
        };
        log::debug!("acquired {} context", kind.context_id());
        Ok(Self {
            handle: JsHandle::new(raw),
            kind,
        })
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn handle(&self) -> &JsHandle {
        &self.handle
    }

    // invocation shapes

    /// Invokes `method` on the context, returning the raw JS result.
    pub fn call(&self, method: &str, args: &[Arg]) -> Result<JsValue, Error> {
        self.handle.call(method, args)
    }

    /// Invokes `method` and wraps the returned handle in a fresh `T`.
    pub fn call_object<T: FromRaw>(&self, method: &str, args: &[Arg]) -> Result<T, Error> {
        self.call(method, args).map(T::from_raw)
    }

    /// Invokes `method`, reads the result as a JS array, and casts every
    /// element to `T` in order.
    pub fn call_vec<T: FromJs>(&self, method: &str, args: &[Arg]) -> Result<Vec<T>, Error> {
        let raw = self.call(method, args)?;
        let array: js_sys::Array = raw.dyn_into().map_err(|value| Error::InvalidCast {
            expected: "Array",
            value,
        })?;
        array
            .iter()
            .map(|element| {
                T::from_js(&element).ok_or(Error::InvalidCast {
                    expected: T::EXPECTED,
                    value: element,
                })
            })
            .collect()
    }

    /// Invokes `method` and converts the result to the basic type `T`.
    pub fn call_scalar<T: FromJs>(&self, method: &str, args: &[Arg]) -> Result<T, Error> {
        let raw = self.call(method, args)?;
        T::from_js(&raw).ok_or(Error::InvalidCast {
            expected: T::EXPECTED,
            value: raw,
        })
    }

    // shaders and programs

    pub fn create_shader(&self, kind: u32) -> Result<Shader, Error> {
        self.call_object("createShader", &[kind.into()])
    }

    pub fn shader_source(&self, shader: &Shader, source: &str) -> Result<(), Error> {
        self.call("shaderSource", &[Arg::Object(shader), source.into()])
            .map(drop)
    }

    pub fn compile_shader(&self, shader: &Shader) -> Result<(), Error> {
        self.call("compileShader", &[Arg::Object(shader)]).map(drop)
    }

    pub fn get_shader_compile_status(&self, shader: &Shader) -> Result<bool, Error> {
        self.call_scalar(
            "getShaderParameter",
            &[Arg::Object(shader), gl::COMPILE_STATUS.into()],
        )
    }

    pub fn get_shader_info_log(&self, shader: &Shader) -> Result<String, Error> {
        self.call_scalar("getShaderInfoLog", &[Arg::Object(shader)])
    }

    pub fn delete_shader(&self, shader: &Shader) -> Result<(), Error> {
        self.call("deleteShader", &[Arg::Object(shader)]).map(drop)
    }

    pub fn create_program(&self) -> Result<Program, Error> {
        self.call_object("createProgram", &[])
    }

    pub fn attach_shader(&self, program: &Program, shader: &Shader) -> Result<(), Error> {
        self.call("attachShader", &[Arg::Object(program), Arg::Object(shader)])
            .map(drop)
    }

    pub fn link_program(&self, program: &Program) -> Result<(), Error> {
        self.call("linkProgram", &[Arg::Object(program)]).map(drop)
    }

    pub fn get_program_link_status(&self, program: &Program) -> Result<bool, Error> {
        self.call_scalar(
            "getProgramParameter",
            &[Arg::Object(program), gl::LINK_STATUS.into()],
        )
    }

    pub fn get_program_info_log(&self, program: &Program) -> Result<String, Error> {
        self.call_scalar("getProgramInfoLog", &[Arg::Object(program)])
    }

    pub fn get_attached_shaders(&self, program: &Program) -> Result<Vec<Shader>, Error> {
        self.call_vec("getAttachedShaders", &[Arg::Object(program)])
    }

    pub fn use_program(&self, program: Option<&Program>) -> Result<(), Error> {
        self.call(
            "useProgram",
            &[program.map_or(Arg::Null, |p| Arg::Object(p))],
        )
        .map(drop)
    }

    pub fn delete_program(&self, program: &Program) -> Result<(), Error> {
        self.call("deleteProgram", &[Arg::Object(program)])
            .map(drop)
    }

    pub fn get_attrib_location(&self, program: &Program, name: &str) -> Result<i32, Error> {
        self.call_scalar("getAttribLocation", &[Arg::Object(program), name.into()])
    }

    pub fn get_uniform_location(
        &self,
        program: &Program,
        name: &str,
    ) -> Result<UniformLocation, Error> {
        self.call_object("getUniformLocation", &[Arg::Object(program), name.into()])
    }

    // buffers

    pub fn create_buffer(&self) -> Result<Buffer, Error> {
        self.call_object("createBuffer", &[])
    }

    pub fn bind_buffer(&self, target: u32, buffer: Option<&Buffer>) -> Result<(), Error> {
        self.call(
            "bindBuffer",
            &[target.into(), buffer.map_or(Arg::Null, |b| Arg::Object(b))],
        )
        .map(drop)
    }

    pub fn buffer_data_f32(&self, target: u32, data: &[f32], usage: u32) -> Result<(), Error> {
        self.call("bufferData", &[target.into(), data.into(), usage.into()])
            .map(drop)
    }

    pub fn buffer_data_u16(&self, target: u32, data: &[u16], usage: u32) -> Result<(), Error> {
        self.call("bufferData", &[target.into(), data.into(), usage.into()])
            .map(drop)
    }

    pub fn buffer_data_u8(&self, target: u32, data: &[u8], usage: u32) -> Result<(), Error> {
        self.call("bufferData", &[target.into(), data.into(), usage.into()])
            .map(drop)
    }

    /// Uploads any plain-old-data slice as raw bytes.
    pub fn buffer_data<T: bytemuck::Pod>(
        &self,
        target: u32,
        data: &[T],
        usage: u32,
    ) -> Result<(), Error> {
        self.call(
            "bufferData",
            &[target.into(), Arg::pod(data), usage.into()],
        )
        .map(drop)
    }

    pub fn get_buffer_parameter(&self, target: u32, pname: u32) -> Result<JsValue, Error> {
        self.call("getBufferParameter", &[target.into(), pname.into()])
    }

    pub fn delete_buffer(&self, buffer: &Buffer) -> Result<(), Error> {
        self.call("deleteBuffer", &[Arg::Object(buffer)]).map(drop)
    }

    // vertex state

    pub fn enable_vertex_attrib_array(&self, index: u32) -> Result<(), Error> {
        self.call("enableVertexAttribArray", &[index.into()])
            .map(drop)
    }

    pub fn disable_vertex_attrib_array(&self, index: u32) -> Result<(), Error> {
        self.call("disableVertexAttribArray", &[index.into()])
            .map(drop)
    }

    pub fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) -> Result<(), Error> {
        self.call(
            "vertexAttribPointer",
            &[
                index.into(),
                size.into(),
                kind.into(),
                normalized.into(),
                stride.into(),
                offset.into(),
            ],
        )
        .map(drop)
    }

    // uniforms

    pub fn uniform1i(&self, location: &UniformLocation, x: i32) -> Result<(), Error> {
        self.call("uniform1i", &[Arg::Object(location), x.into()])
            .map(drop)
    }

    pub fn uniform1f(&self, location: &UniformLocation, x: f32) -> Result<(), Error> {
        self.call("uniform1f", &[Arg::Object(location), x.into()])
            .map(drop)
    }

    pub fn uniform2f(&self, location: &UniformLocation, x: f32, y: f32) -> Result<(), Error> {
        self.call("uniform2f", &[Arg::Object(location), x.into(), y.into()])
            .map(drop)
    }

    pub fn uniform3f(
        &self,
        location: &UniformLocation,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<(), Error> {
        self.call(
            "uniform3f",
            &[Arg::Object(location), x.into(), y.into(), z.into()],
        )
        .map(drop)
    }

    pub fn uniform4f(
        &self,
        location: &UniformLocation,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    ) -> Result<(), Error> {
        self.call(
            "uniform4f",
            &[
                Arg::Object(location),
                x.into(),
                y.into(),
                z.into(),
                w.into(),
            ],
        )
        .map(drop)
    }

    pub fn uniform3fv(&self, location: &UniformLocation, data: &[f32]) -> Result<(), Error> {
        self.call("uniform3fv", &[Arg::Object(location), data.into()])
            .map(drop)
    }

    pub fn uniform4fv(&self, location: &UniformLocation, data: &[f32]) -> Result<(), Error> {
        self.call("uniform4fv", &[Arg::Object(location), data.into()])
            .map(drop)
    }

    pub fn uniform_matrix4fv(
        &self,
        location: &UniformLocation,
        transpose: bool,
        data: &[f32],
    ) -> Result<(), Error> {
        self.call(
            "uniformMatrix4fv",
            &[Arg::Object(location), transpose.into(), data.into()],
        )
        .map(drop)
    }

    // textures

    pub fn create_texture(&self) -> Result<Texture, Error> {
        self.call_object("createTexture", &[])
    }

    pub fn bind_texture(&self, target: u32, texture: Option<&Texture>) -> Result<(), Error> {
        self.call(
            "bindTexture",
            &[
                target.into(),
                texture.map_or(Arg::Null, |t| Arg::Object(t)),
            ],
        )
        .map(drop)
    }

    pub fn active_texture(&self, unit: u32) -> Result<(), Error> {
        self.call("activeTexture", &[unit.into()]).map(drop)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: u32,
        width: i32,
        height: i32,
        border: i32,
        format: u32,
        kind: u32,
        pixels: Option<&[u8]>,
    ) -> Result<(), Error> {
        self.call(
            "texImage2D",
            &[
                target.into(),
                level.into(),
                internal_format.into(),
                width.into(),
                height.into(),
                border.into(),
                format.into(),
                kind.into(),
                pixels.map_or(Arg::Null, Arg::Bytes),
            ],
        )
        .map(drop)
    }

    pub fn tex_parameteri(&self, target: u32, pname: u32, param: i32) -> Result<(), Error> {
        self.call(
            "texParameteri",
            &[target.into(), pname.into(), param.into()],
        )
        .map(drop)
    }

    pub fn generate_mipmap(&self, target: u32) -> Result<(), Error> {
        self.call("generateMipmap", &[target.into()]).map(drop)
    }

    pub fn pixel_storei(&self, pname: u32, param: i32) -> Result<(), Error> {
        self.call("pixelStorei", &[pname.into(), param.into()])
            .map(drop)
    }

    pub fn delete_texture(&self, texture: &Texture) -> Result<(), Error> {
        self.call("deleteTexture", &[Arg::Object(texture)])
            .map(drop)
    }

    // render targets

    pub fn create_framebuffer(&self) -> Result<Framebuffer, Error> {
        self.call_object("createFramebuffer", &[])
    }

    pub fn bind_framebuffer(
        &self,
        target: u32,
        framebuffer: Option<&Framebuffer>,
    ) -> Result<(), Error> {
        self.call(
            "bindFramebuffer",
            &[
                target.into(),
                framebuffer.map_or(Arg::Null, |f| Arg::Object(f)),
            ],
        )
        .map(drop)
    }

    pub fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        tex_target: u32,
        texture: &Texture,
        level: i32,
    ) -> Result<(), Error> {
        self.call(
            "framebufferTexture2D",
            &[
                target.into(),
                attachment.into(),
                tex_target.into(),
                Arg::Object(texture),
                level.into(),
            ],
        )
        .map(drop)
    }

    pub fn check_framebuffer_status(&self, target: u32) -> Result<u32, Error> {
        self.call_scalar("checkFramebufferStatus", &[target.into()])
    }

    pub fn delete_framebuffer(&self, framebuffer: &Framebuffer) -> Result<(), Error> {
        self.call("deleteFramebuffer", &[Arg::Object(framebuffer)])
            .map(drop)
    }

    pub fn create_renderbuffer(&self) -> Result<Renderbuffer, Error> {
        self.call_object("createRenderbuffer", &[])
    }

    pub fn bind_renderbuffer(
        &self,
        target: u32,
        renderbuffer: Option<&Renderbuffer>,
    ) -> Result<(), Error> {
        self.call(
            "bindRenderbuffer",
            &[
                target.into(),
                renderbuffer.map_or(Arg::Null, |r| Arg::Object(r)),
            ],
        )
        .map(drop)
    }

    pub fn renderbuffer_storage(
        &self,
        target: u32,
        internal_format: u32,
        width: i32,
        height: i32,
    ) -> Result<(), Error> {
        self.call(
            "renderbufferStorage",
            &[
                target.into(),
                internal_format.into(),
                width.into(),
                height.into(),
            ],
        )
        .map(drop)
    }

    pub fn framebuffer_renderbuffer(
        &self,
        target: u32,
        attachment: u32,
        rb_target: u32,
        renderbuffer: &Renderbuffer,
    ) -> Result<(), Error> {
        self.call(
            "framebufferRenderbuffer",
            &[
                target.into(),
                attachment.into(),
                rb_target.into(),
                Arg::Object(renderbuffer),
            ],
        )
        .map(drop)
    }

    pub fn delete_renderbuffer(&self, renderbuffer: &Renderbuffer) -> Result<(), Error> {
        self.call("deleteRenderbuffer", &[Arg::Object(renderbuffer)])
            .map(drop)
    }

    // state and drawing

    pub fn enable(&self, cap: u32) -> Result<(), Error> {
        self.call("enable", &[cap.into()]).map(drop)
    }

    pub fn disable(&self, cap: u32) -> Result<(), Error> {
        self.call("disable", &[cap.into()]).map(drop)
    }

    pub fn depth_func(&self, func: u32) -> Result<(), Error> {
        self.call("depthFunc", &[func.into()]).map(drop)
    }

    pub fn blend_func(&self, sfactor: u32, dfactor: u32) -> Result<(), Error> {
        self.call("blendFunc", &[sfactor.into(), dfactor.into()])
            .map(drop)
    }

    pub fn cull_face(&self, mode: u32) -> Result<(), Error> {
        self.call("cullFace", &[mode.into()]).map(drop)
    }

    pub fn front_face(&self, mode: u32) -> Result<(), Error> {
        self.call("frontFace", &[mode.into()]).map(drop)
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) -> Result<(), Error> {
        self.call(
            "viewport",
            &[x.into(), y.into(), width.into(), height.into()],
        )
        .map(drop)
    }

    pub fn clear_color(&self, color: impl Into<Color>) -> Result<(), Error> {
        let Color { r, g, b, a } = color.into();
        self.call(
            "clearColor",
            &[r.into(), g.into(), b.into(), a.into()],
        )
        .map(drop)
    }

    pub fn clear(&self, mask: ClearMask) -> Result<(), Error> {
        self.call("clear", &[mask.bits().into()]).map(drop)
    }

    pub fn draw_arrays(&self, mode: u32, first: i32, count: i32) -> Result<(), Error> {
        self.call(
            "drawArrays",
            &[mode.into(), first.into(), count.into()],
        )
        .map(drop)
    }

    pub fn draw_elements(
        &self,
        mode: u32,
        count: i32,
        kind: u32,
        offset: i32,
    ) -> Result<(), Error> {
        self.call(
            "drawElements",
            &[mode.into(), count.into(), kind.into(), offset.into()],
        )
        .map(drop)
    }

    pub fn get_error(&self) -> Result<u32, Error> {
        self.call_scalar("getError", &[])
    }

    pub fn get_parameter(&self, pname: u32) -> Result<JsValue, Error> {
        self.call("getParameter", &[pname.into()])
    }

    pub fn get_supported_extensions(&self) -> Result<Vec<String>, Error> {
        self.call_vec("getSupportedExtensions", &[])
    }

    pub fn drawing_buffer_width(&self) -> Result<i32, Error> {
        let value = self.handle.get("drawingBufferWidth")?;
        i32::from_js(&value).ok_or(Error::InvalidCast {
            expected: i32::EXPECTED,
            value,
        })
    }

    pub fn drawing_buffer_height(&self) -> Result<i32, Error> {
        let value = self.handle.get("drawingBufferHeight")?;
        i32::from_js(&value).ok_or(Error::InvalidCast {
            expected: i32::EXPECTED,
            value,
        })
    }

    pub fn finish(&self) -> Result<(), Error> {
        self.call("finish", &[]).map(drop)
    }

    pub fn flush(&self) -> Result<(), Error> {
        self.call("flush", &[]).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_match_get_context_ids() {
        assert_eq!(ContextKind::WebGl.context_id(), "webgl");
        assert_eq!(ContextKind::WebGl2.context_id(), "webgl2");
    }

    #[test]
    fn kind_maps_to_global_interface() {
        assert_eq!(
            ContextKind::WebGl.global_interface(),
            "WebGLRenderingContext"
        );
        assert_eq!(
            ContextKind::WebGl2.global_interface(),
            "WebGL2RenderingContext"
        );
    }

    #[test]
    fn attribute_defaults_match_the_browser_defaults() {
        let attrs = ContextAttributes::default();
        assert!(attrs.alpha && attrs.depth && attrs.antialias && attrs.premultiplied_alpha);
        assert!(!attrs.stencil && !attrs.preserve_drawing_buffer);
        assert!(attrs.power_preference.is_none());
    }
}
