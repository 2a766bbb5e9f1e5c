//! Error types for page effects.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while installing or running page effects.
#[derive(Error, Debug)]
pub enum EffectsError {
    /// No `window` global (not running in a browser).
    #[error("no window available")]
    NoWindow,

    /// The window has no document.
    #[error("no document available")]
    NoDocument,

    /// A DOM call was rejected by the host.
    #[error("{context} failed: {message}")]
    Js {
        /// Operation that was attempted.
        context: &'static str,
        /// Message extracted from the thrown value.
        message: String,
    },

    /// The config script tag held malformed JSON.
    #[error("config JSON error: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// The window config object had the wrong shape.
    #[error("config value error: {0}")]
    ConfigValue(String),

    /// A config value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EffectsError {
    /// Wrap a thrown JS value with the operation that produced it.
    pub fn js(context: &'static str, value: JsValue) -> Self {
        Self::Js {
            context,
            message: js_message(&value),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for EffectsError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::ConfigValue(err.to_string())
    }
}

impl From<EffectsError> for JsValue {
    fn from(err: EffectsError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result type for page effect operations.
pub type Result<T> = std::result::Result<T, EffectsError>;

/// Best-effort text for a thrown value: a string, an `Error.message`, or its debug form.
fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = EffectsError::InvalidConfig("fadeIn.threshold must be within [0, 1]".into());
        assert_eq!(
            err.to_string(),
            "invalid config: fadeIn.threshold must be within [0, 1]"
        );
    }

    #[test]
    fn test_config_json_from() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: EffectsError = parse_err.into();
        assert!(matches!(err, EffectsError::ConfigJson(_)));
        assert!(err.to_string().starts_with("config JSON error:"));
    }

    #[test]
    fn test_js_error_message() {
        let err = EffectsError::Js {
            context: "querySelectorAll(.card)",
            message: "SyntaxError".into(),
        };
        assert_eq!(err.to_string(), "querySelectorAll(.card) failed: SyntaxError");
    }

    #[test]
    fn test_missing_globals() {
        assert_eq!(EffectsError::NoWindow.to_string(), "no window available");
        assert_eq!(EffectsError::NoDocument.to_string(), "no document available");
    }
}
