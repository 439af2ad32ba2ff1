//! Typed wrappers for the object handles WebGL calls hand back.
//!
//! Each is a newtype over [`JsHandle`]; the context's typed-handle
//! invocation shape builds them through [`FromRaw`].

use crate::handle::{FromJs, FromRaw, JsHandle};
use std::ops::{Deref, DerefMut};
use wasm_bindgen::JsValue;

macro_rules! gl_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name(JsHandle);

        impl Deref for $name {
            type Target = JsHandle;

            fn deref(&self) -> &JsHandle {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut JsHandle {
                &mut self.0
            }
        }

        impl FromRaw for $name {
            fn from_raw(raw: JsValue) -> Self {
                Self(JsHandle::new(raw))
            }
        }

        impl FromJs for $name {
            const EXPECTED: &'static str = stringify!($name);

            fn from_js(value: &JsValue) -> Option<Self> {
                if value.is_object() {
                    Some(Self::from_raw(value.clone()))
                } else {
                    None
                }
            }
        }
    };
}

gl_object! {
    /// A shader stage object.
    Shader
}

gl_object! {
    /// A linked (or linkable) shader program.
    Program
}

gl_object! {
    /// A data buffer on the GL side.
    Buffer
}

gl_object! {
    /// A texture object.
    Texture
}

gl_object! {
    /// The location of one uniform in a linked program.
    ///
    /// `getUniformLocation` answers `null` for uniforms the compiler
    /// optimized out; that null is wrapped as-is, and WebGL treats it as
    /// a no-op location.
    UniformLocation
}

gl_object! {
    /// An off-screen render target.
    Framebuffer
}

gl_object! {
    /// Storage attachable to a framebuffer.
    Renderbuffer
}

gl_object! {
    /// A WebGL2 vertex array object.
    VertexArray
}
