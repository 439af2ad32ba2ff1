use crate::error::Error;
use crate::marshal::{self, Arg};
use wasm_bindgen::JsValue;

/// Owns a single reference to a JS-side object.
///
/// The interop bridge keeps the object reachable for as long as the
/// wrapped `JsValue` exists; dropping the wrapper frees the bridge slot.
/// [`release`](JsHandle::release) does the same eagerly, for callers that
/// want the foreign reference gone at a known point rather than whenever
/// the wrapper goes out of scope.
#[derive(Debug)]
pub struct JsHandle {
    raw: JsValue,
    released: bool,
}

impl JsHandle {
    pub fn new(raw: JsValue) -> Self {
        Self {
            raw,
            released: false,
        }
    }

    /// The wrapped JS reference. A released wrapper reads as `null`.
    pub fn raw(&self) -> &JsValue {
        &self.raw
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Drops the wrapped reference, replacing it with `null`. Only the
    /// first call does anything.
    pub fn release(&mut self) {
        if !self.released {
            self.raw = JsValue::NULL;
            self.released = true;
        }
    }

    /// Reads property `prop` of the wrapped object.
    pub fn get(&self, prop: &str) -> Result<JsValue, Error> {
        js_sys::Reflect::get(self.raw(), &JsValue::from_str(prop)).map_err(Error::Js)
    }

    /// Writes property `prop` of the wrapped object.
    pub fn set(&self, prop: &str, value: &JsValue) -> Result<(), Error> {
        js_sys::Reflect::set(self.raw(), &JsValue::from_str(prop), value)
            .map(drop)
            .map_err(Error::Js)
    }

    /// Invokes the method `name` on the wrapped object.
    pub fn call(&self, name: &str, args: &[Arg]) -> Result<JsValue, Error> {
        marshal::invoke(self.raw(), name, args)
    }
}

impl From<JsValue> for JsHandle {
    fn from(raw: JsValue) -> Self {
        Self::new(raw)
    }
}

/// Construction seam for wrappers built around a returned handle.
pub trait FromRaw {
    fn from_raw(raw: JsValue) -> Self;
}

impl FromRaw for JsHandle {
    fn from_raw(raw: JsValue) -> Self {
        Self::new(raw)
    }
}

/// Conversion seam for shaping foreign results.
///
/// `from_js` returns `None` when the value is not convertible; the
/// invocation helpers turn that into [`Error::InvalidCast`] carrying
/// `EXPECTED`.
pub trait FromJs: Sized {
    const EXPECTED: &'static str;

    fn from_js(value: &JsValue) -> Option<Self>;
}

impl FromJs for f64 {
    const EXPECTED: &'static str = "number";

    fn from_js(value: &JsValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FromJs for f32 {
    const EXPECTED: &'static str = "number";

    fn from_js(value: &JsValue) -> Option<Self> {
        value.as_f64().map(|v| v as f32)
    }
}

impl FromJs for i32 {
    const EXPECTED: &'static str = "number";

    fn from_js(value: &JsValue) -> Option<Self> {
        value.as_f64().map(|v| v as i32)
    }
}

impl FromJs for u32 {
    const EXPECTED: &'static str = "number";

    fn from_js(value: &JsValue) -> Option<Self> {
        value.as_f64().map(|v| v as u32)
    }
}

impl FromJs for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_js(value: &JsValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromJs for String {
    const EXPECTED: &'static str = "string";

    fn from_js(value: &JsValue) -> Option<Self> {
        value.as_string()
    }
}

impl FromJs for JsValue {
    const EXPECTED: &'static str = "value";

    fn from_js(value: &JsValue) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // JsValue::NULL is a reserved constant, so this path runs off-browser;
    // the null-read behavior of a released wrapper is covered in tests/web.rs.

    #[test]
    fn release_is_idempotent() {
        let mut handle = JsHandle::new(JsValue::NULL);
        assert!(!handle.is_released());

        handle.release();
        assert!(handle.is_released());

        handle.release();
        assert!(handle.is_released());
    }
}
