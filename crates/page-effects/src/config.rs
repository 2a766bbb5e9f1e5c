//! Configuration for page effects.
//!
//! Every value has a default matching the stock theme, so a page only needs to
//! supply the fields it wants to change. Configuration is read from, in order:
//!
//! 1. a `<script type="application/json" id="page-effects-config">` element
//! 2. a `window.PAGE_EFFECTS_CONFIG` object
//! 3. the built-in defaults
//!
//! # Example
//!
//! ```
//! use page_effects::EffectsConfig;
//!
//! let config = EffectsConfig::from_json(r#"{ "navbar": { "scrollThresholdPx": 80 } }"#).unwrap();
//! assert_eq!(config.navbar.scroll_threshold_px, 80.0);
//! assert_eq!(config.motion.amplitude_px, 10.0);
//! ```

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::error::{EffectsError, Result};

/// Id of the JSON script element holding page configuration.
pub const CONFIG_ELEMENT_ID: &str = "page-effects-config";

/// Name of the window global holding page configuration.
pub const CONFIG_GLOBAL: &str = "PAGE_EFFECTS_CONFIG";

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectsConfig {
    pub selectors: Selectors,
    pub motion: MotionConfig,
    pub hover: HoverConfig,
    pub fade_in: FadeInConfig,
    pub navbar: NavbarConfig,
    pub log_level: LogLevel,
}

/// CSS selectors each effect binds to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selectors {
    pub blob: String,
    pub anchor: String,
    pub card: String,
    pub fade_in: String,
    pub navbar: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            blob: ".blob-decoration".to_string(),
            anchor: "a[href^=\"#\"]".to_string(),
            card: ".card".to_string(),
            fade_in: ".fade-in-element".to_string(),
            navbar: ".navbar".to_string(),
        }
    }
}

/// Floating blob animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotionConfig {
    pub enabled: bool,
    /// Peak displacement in CSS pixels.
    pub amplitude_px: f64,
    /// Angular frequency of the horizontal sine, in radians per second.
    pub x_frequency: f64,
    /// Angular frequency of the vertical cosine, in radians per second.
    pub y_frequency: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude_px: 10.0,
            x_frequency: 0.5,
            y_frequency: 0.3,
        }
    }
}

/// Card hover elevation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoverConfig {
    pub lift_px: f64,
    pub lifted_shadow: String,
    pub resting_shadow: String,
    pub transition_secs: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            lift_px: 5.0,
            lifted_shadow: "0 10px 20px rgba(0, 0, 0, 0.1)".to_string(),
            resting_shadow: "0 2px 8px rgba(0, 0, 0, 0.05)".to_string(),
            transition_secs: 0.3,
        }
    }
}

/// Viewport fade-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FadeInConfig {
    /// Fraction of the element that must be visible, in `[0, 1]`.
    pub threshold: f64,
    pub root_margin: String,
    pub visible_class: String,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px".to_string(),
            visible_class: "fade-in".to_string(),
        }
    }
}

/// Scroll-reactive navbar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarConfig {
    pub scroll_threshold_px: f64,
    pub scrolled_class: String,
    pub shadow: String,
    pub backdrop_filter: String,
    pub background: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 50.0,
            scrolled_class: "navbar-scrolled".to_string(),
            shadow: "0 4px 10px rgba(0, 0, 0, 0.1)".to_string(),
            backdrop_filter: "blur(10px)".to_string(),
            background: "rgba(255, 255, 255, 0.9)".to_string(),
        }
    }
}

impl EffectsConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Convert and validate a JS object. `undefined` and `null` yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the page: script tag first, then the window global.
    pub fn from_page(document: &Document) -> Result<Self> {
        if let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) {
            let text = element.text_content().unwrap_or_default();
            if !text.trim().is_empty() {
                return Self::from_json(&text);
            }
        }

        let window = web_sys::window().ok_or(EffectsError::NoWindow)?;
        let global = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|err| EffectsError::js("read window config", err))?;
        Self::from_js(global)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        let selectors = [
            ("selectors.blob", &self.selectors.blob),
            ("selectors.anchor", &self.selectors.anchor),
            ("selectors.card", &self.selectors.card),
            ("selectors.fadeIn", &self.selectors.fade_in),
            ("selectors.navbar", &self.selectors.navbar),
        ];
        for (name, selector) in selectors {
            if selector.trim().is_empty() {
                return Err(invalid(format!("{name} must not be empty")));
            }
        }

        let numbers = [
            ("motion.amplitudePx", self.motion.amplitude_px),
            ("motion.xFrequency", self.motion.x_frequency),
            ("motion.yFrequency", self.motion.y_frequency),
            ("hover.liftPx", self.hover.lift_px),
            ("hover.transitionSecs", self.hover.transition_secs),
            ("fadeIn.threshold", self.fade_in.threshold),
            ("navbar.scrollThresholdPx", self.navbar.scroll_threshold_px),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if !(0.0..=1.0).contains(&self.fade_in.threshold) {
            return Err(invalid(format!(
                "fadeIn.threshold must be within [0, 1], got {}",
                self.fade_in.threshold
            )));
        }
        if self.hover.lift_px < 0.0 {
            return Err(invalid(format!(
                "hover.liftPx must not be negative, got {}",
                self.hover.lift_px
            )));
        }
        if self.hover.transition_secs < 0.0 {
            return Err(invalid(format!(
                "hover.transitionSecs must not be negative, got {}",
                self.hover.transition_secs
            )));
        }
        if self.fade_in.visible_class.trim().is_empty() {
            return Err(invalid("fadeIn.visibleClass must not be empty".to_string()));
        }
        if self.navbar.scrolled_class.trim().is_empty() {
            return Err(invalid("navbar.scrolledClass must not be empty".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> EffectsError {
    EffectsError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_theme() {
        let config = EffectsConfig::default();
        assert_eq!(config.selectors.blob, ".blob-decoration");
        assert_eq!(config.selectors.anchor, "a[href^=\"#\"]");
        assert_eq!(config.selectors.card, ".card");
        assert_eq!(config.selectors.fade_in, ".fade-in-element");
        assert_eq!(config.selectors.navbar, ".navbar");
        assert_eq!(config.motion.amplitude_px, 10.0);
        assert_eq!(config.motion.x_frequency, 0.5);
        assert_eq!(config.motion.y_frequency, 0.3);
        assert_eq!(config.hover.lift_px, 5.0);
        assert_eq!(config.hover.transition_secs, 0.3);
        assert_eq!(config.fade_in.threshold, 0.1);
        assert_eq!(config.fade_in.visible_class, "fade-in");
        assert_eq!(config.navbar.scroll_threshold_px, 50.0);
        assert_eq!(config.navbar.scrolled_class, "navbar-scrolled");
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = EffectsConfig::from_json("{}").unwrap();
        assert_eq!(config, EffectsConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = EffectsConfig::from_json(
            r#"{
                "motion": { "amplitudePx": 4 },
                "selectors": { "card": ".tile" },
                "logLevel": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.motion.amplitude_px, 4.0);
        assert_eq!(config.motion.x_frequency, 0.5);
        assert!(config.motion.enabled);
        assert_eq!(config.selectors.card, ".tile");
        assert_eq!(config.selectors.blob, ".blob-decoration");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.navbar, NavbarConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = EffectsConfig::from_json("{ motion: }").unwrap_err();
        assert!(matches!(err, EffectsError::ConfigJson(_)));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = EffectsConfig::from_json(r#"{ "logLevel": "verbose" }"#).unwrap_err();
        assert!(matches!(err, EffectsError::ConfigJson(_)));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = EffectsConfig::from_json(r#"{ "fadeIn": { "threshold": 1.5 } }"#).unwrap_err();
        match err {
            EffectsError::InvalidConfig(message) => assert!(message.contains("fadeIn.threshold")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_transition_rejected() {
        let mut config = EffectsConfig::default();
        config.hover.transition_secs = -0.1;
        assert!(matches!(config.validate(), Err(EffectsError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_lift_rejected() {
        let err = EffectsConfig::from_json(r#"{ "hover": { "liftPx": -5 } }"#).unwrap_err();
        match err {
            EffectsError::InvalidConfig(message) => assert!(message.contains("hover.liftPx")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_lift_allowed() {
        let config = EffectsConfig::from_json(r#"{ "hover": { "liftPx": 0 } }"#).unwrap();
        assert_eq!(config.hover.lift_px, 0.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut config = EffectsConfig::default();
        config.motion.amplitude_px = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("motion.amplitudePx"));
    }

    #[test]
    fn test_empty_selector_rejected() {
        let mut config = EffectsConfig::default();
        config.selectors.navbar = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("selectors.navbar"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(EffectsConfig::default()).unwrap();
        assert_eq!(json["navbar"]["scrollThresholdPx"], 50.0);
        assert_eq!(json["fadeIn"]["visibleClass"], "fade-in");
        assert_eq!(json["logLevel"], "info");
    }
}
