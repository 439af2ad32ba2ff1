//! Dynamic WebGL/WebGL2 bindings for the browser.
//!
//! Calls cross the wasm-bindgen bridge by method name instead of through
//! generated per-method imports: [`Context`] owns the JS context handle,
//! marshals each call's arguments, invokes the named method, and frees
//! the per-call scratch values before returning.

pub mod color;
pub mod context;
pub mod error;
pub mod gl;
pub mod handle;
pub mod marshal;
pub mod objects;
pub mod shader;
pub mod webgl2;

pub use color::Color;
pub use context::{Context, ContextAttributes, ContextKind};
pub use error::Error;
pub use gl::ClearMask;
pub use handle::{FromJs, FromRaw, JsHandle};
pub use marshal::Arg;
pub use objects::{
    Buffer, Framebuffer, Program, Renderbuffer, Shader, Texture, UniformLocation, VertexArray,
};
pub use shader::{compile_shader, link_program, ShaderError, ShaderStage};
pub use webgl2::Context2;
