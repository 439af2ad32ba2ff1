use crate::context::Context;
use crate::error::Error;
use crate::gl;
use crate::objects::{Program, Shader};
use wasm_bindgen::JsValue;

#[derive(Clone, Copy, Debug)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Compile or link failure, with the driver's info log attached.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage:?} shader failed to compile: {info_log}")]
    Compile {
        stage: ShaderStage,
        info_log: String,
    },

    #[error("program failed to link: {0}")]
    Link(String),

    #[error(transparent)]
    Context(#[from] Error),
}

impl From<ShaderError> for JsValue {
    fn from(err: ShaderError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Compiles one shader stage, surfacing the info log on failure.
pub fn compile_shader(
    ctx: &Context,
    stage: ShaderStage,
    source: &str,
) -> Result<Shader, ShaderError> {
    let kind = match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    };
    let shader = ctx.create_shader(kind)?;
    ctx.shader_source(&shader, source)?;
    ctx.compile_shader(&shader)?;

    if !ctx.get_shader_compile_status(&shader)? {
        let info_log = ctx.get_shader_info_log(&shader)?;
        log::error!("{:?} shader: {}", stage, info_log);
        return Err(ShaderError::Compile { stage, info_log });
    }
    Ok(shader)
}

/// Compiles both stages and links them into a program.
pub fn link_program(ctx: &Context, vertex: &str, fragment: &str) -> Result<Program, ShaderError> {
    let vertex = compile_shader(ctx, ShaderStage::Vertex, vertex)?;
    let fragment = compile_shader(ctx, ShaderStage::Fragment, fragment)?;

    let program = ctx.create_program()?;
    ctx.attach_shader(&program, &vertex)?;
    ctx.attach_shader(&program, &fragment)?;
    ctx.link_program(&program)?;

    if !ctx.get_program_link_status(&program)? {
        let info_log = ctx.get_program_info_log(&program)?;
        log::error!("program link: {}", info_log);
        return Err(ShaderError::Link(info_log));
    }

    // the stage objects are not needed once the program has linked
    ctx.delete_shader(&vertex)?;
    ctx.delete_shader(&fragment)?;
    Ok(program)
}
