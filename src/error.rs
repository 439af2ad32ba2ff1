use wasm_bindgen::JsValue;

/// Failures surfaced by the binding layer.
///
/// Nothing is caught or retried internally; every error is handed
/// synchronously to the caller of the invocation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested context interface is missing from the JS global scope.
    #[error("context type `{0}` is not supported by this environment")]
    NotSupported(String),

    /// A foreign value did not have the shape the call site asked for.
    #[error("expected {expected}, got {value:?}")]
    InvalidCast {
        expected: &'static str,
        value: JsValue,
    },

    /// The JS side threw during property lookup or invocation.
    #[error("uncaught JS exception: {0:?}")]
    Js(JsValue),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(value)
    }
}

// Lets entry points `?` straight back to the host, which reports the
// message as an uncaught error.
impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_supported_names_the_context_type() {
        let err = Error::NotSupported("webgl2".to_owned());
        assert_eq!(
            err.to_string(),
            "context type `webgl2` is not supported by this environment"
        );
    }
}
