use crate::error::Error;
use crate::handle::JsHandle;
use js_sys::{Array, Float32Array, Function, Reflect, Uint16Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};

/// One call argument, tagged by how it crosses the interop boundary.
///
/// The variant set is closed: these are the only shapes the layer
/// translates, and the slice variants cover exactly the element types
/// WebGL entry points accept as bulk data. Anything else goes through a
/// scalar conversion or [`Arg::pod`].
pub enum Arg<'a> {
    /// JS `null`.
    Null,
    /// Substituted by the wrapper's stored handle. Ownership stays with
    /// the wrapper; the call never releases it.
    Object(&'a JsHandle),
    /// Copied into a fresh `Uint8Array`, released after the call.
    Bytes(&'a [u8]),
    /// Copied into a fresh `Float32Array`, released after the call.
    Floats(&'a [f32]),
    /// Copied into a fresh `Uint16Array`, released after the call.
    Shorts(&'a [u16]),
    /// Handles inserted in order into a fresh JS array, released after
    /// the call.
    Objects(&'a [&'a JsHandle]),
    /// Passed through unchanged.
    Value(JsValue),
}

impl<'a> Arg<'a> {
    /// Bulk data of any plain-old-data element type, crossing as bytes.
    pub fn pod<T: bytemuck::Pod>(data: &'a [T]) -> Arg<'a> {
        Arg::Bytes(bytemuck::cast_slice(data))
    }
}

impl<'a> From<&'a JsHandle> for Arg<'a> {
    fn from(handle: &'a JsHandle) -> Self {
        Arg::Object(handle)
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(data: &'a [u8]) -> Self {
        Arg::Bytes(data)
    }
}

impl<'a> From<&'a [f32]> for Arg<'a> {
    fn from(data: &'a [f32]) -> Self {
        Arg::Floats(data)
    }
}

impl<'a> From<&'a [u16]> for Arg<'a> {
    fn from(data: &'a [u16]) -> Self {
        Arg::Shorts(data)
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Arg::Value(JsValue::from(value))
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Arg::Value(JsValue::from(value))
    }
}

impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Arg::Value(JsValue::from(value))
    }
}

impl From<u32> for Arg<'_> {
    fn from(value: u32) -> Self {
        Arg::Value(JsValue::from(value))
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Arg::Value(JsValue::from(value))
    }
}

impl From<&str> for Arg<'_> {
    fn from(value: &str) -> Self {
        Arg::Value(JsValue::from_str(value))
    }
}

impl From<JsValue> for Arg<'_> {
    fn from(value: JsValue) -> Self {
        Arg::Value(value)
    }
}

/// The marshalled form of one call's arguments.
///
/// Holds the argument list handed to `Function::apply` plus every scratch
/// value minted during translation; dropping the pack frees them. The
/// invocation path drops it as soon as the foreign call returns, so no
/// scratch value outlives a single call boundary.
pub(crate) struct ArgPack {
    list: Array,
    _scratch: Vec<JsValue>,
}

impl ArgPack {
    pub fn list(&self) -> &Array {
        &self.list
    }
}

/// Translates `args` in order, preserving length.
pub(crate) fn marshal(args: &[Arg]) -> ArgPack {
    let list = Array::new();
    let mut scratch = Vec::new();
    for arg in args {
        match arg {
            Arg::Null => {
                list.push(&JsValue::NULL);
            }
            Arg::Object(handle) => {
                list.push(handle.raw());
            }
            Arg::Bytes(data) => {
                let view = Uint8Array::from(*data);
                list.push(view.as_ref());
                scratch.push(view.into());
            }
            Arg::Floats(data) => {
                let view = Float32Array::from(*data);
                list.push(view.as_ref());
                scratch.push(view.into());
            }
            Arg::Shorts(data) => {
                let view = Uint16Array::from(*data);
                list.push(view.as_ref());
                scratch.push(view.into());
            }
            Arg::Objects(handles) => {
                let array = Array::new();
                for handle in *handles {
                    array.push(handle.raw());
                }
                list.push(array.as_ref());
                scratch.push(array.into());
            }
            Arg::Value(value) => {
                list.push(value);
            }
        }
    }
    ArgPack {
        list,
        _scratch: scratch,
    }
}

/// Looks up `name` on `target`, applies it to the marshalled `args`, and
/// frees the scratch values before handing back the result.
pub(crate) fn invoke(target: &JsValue, name: &str, args: &[Arg]) -> Result<JsValue, Error> {
    let slot = Reflect::get(target, &JsValue::from_str(name)).map_err(Error::Js)?;
    let func: Function = slot.dyn_into().map_err(|value| Error::InvalidCast {
        expected: "function",
        value,
    })?;
    let pack = marshal(args);
    let ret = func.apply(target, pack.list()).map_err(Error::Js);
    drop(pack);
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_pick_the_matching_variant() {
        assert!(matches!(
            Arg::from(&[1.0f32, 2.0][..]),
            Arg::Floats(data) if data.len() == 2
        ));
        assert!(matches!(
            Arg::from(&[1u16, 2, 3][..]),
            Arg::Shorts(data) if data.len() == 3
        ));
        assert!(matches!(
            Arg::from(&[1u8][..]),
            Arg::Bytes(data) if data.len() == 1
        ));
    }

    #[test]
    fn pod_data_crosses_as_bytes() {
        let data = [1.0f32, 2.0];
        assert!(matches!(
            Arg::pod(&data),
            Arg::Bytes(bytes) if bytes.len() == 8
        ));
    }
}
