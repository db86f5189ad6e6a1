//! Error type shared by startup, rendering and DOM wiring.

use wasm_bindgen::JsValue;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    #[error("required element `{selector}` not found")]
    ElementNotFound { selector: String },

    #[error("element `{selector}` is not a {expected}")]
    WrongElementType { selector: String, expected: &'static str },

    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("browser call failed: {0}")]
    Js(String),
}

impl SiteError {
    pub fn not_found<S: Into<String>>(selector: S) -> Self {
        SiteError::ElementNotFound { selector: selector.into() }
    }

    pub fn config<T: ToString>(msg: T) -> Self {
        SiteError::Config(msg.to_string())
    }

    pub fn gpu<T: ToString>(msg: T) -> Self {
        SiteError::Gpu(msg.to_string())
    }

    /// Wrap a `JsValue` error, keeping its string form if it has one
    pub fn js(value: &JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_selector() {
        let err = SiteError::not_found(".loading-bar");
        assert_eq!(err.to_string(), "required element `.loading-bar` not found");
    }

    #[test]
    fn test_config_message() {
        let err = SiteError::config("damping must be in (0, 1)");
        assert!(matches!(err, SiteError::Config(ref m) if m.contains("damping")));
    }
}
