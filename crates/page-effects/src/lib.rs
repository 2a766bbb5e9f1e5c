//! Page Effects - decorative motion and scroll polish for a host page
//!
//! Attaches five independent behaviors once the document is ready:
//! floating blob decorations, smooth in-page anchor scrolling, card hover
//! elevation, one-shot fade-in on scroll, and a navbar that restyles itself
//! past a scroll offset.
//!
//! With the `autostart` feature (on by default) everything installs itself
//! from `#[wasm_bindgen(start)]` and tears down on `beforeunload`. Hosts that
//! manage their own lifecycle can disable it and call `installPageEffects`.

pub mod anchors;
pub mod config;
pub mod dom;
pub mod effects;
pub mod error;
pub mod fade_in;
pub mod hover;
pub mod logging;
pub mod motion;
pub mod navbar;

use wasm_bindgen::prelude::*;

pub use config::{EffectsConfig, LogLevel};
pub use effects::{InstallSummary, PageEffects};
pub use error::{EffectsError, Result};

#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let document = match dom::document() {
        Ok(document) => document,
        Err(err) => {
            web_sys::console::warn_1(&format!("page effects disabled: {err}").into());
            return;
        }
    };

    let config = EffectsConfig::from_page(&document).unwrap_or_else(|err| {
        web_sys::console::warn_1(&format!("page effects config ignored: {err}").into());
        EffectsConfig::default()
    });
    logging::init(config.log_level);

    let ready_document = document.clone();
    let result = dom::on_ready(&document, move || {
        let installed = PageEffects::install(&ready_document, &config)
            .and_then(PageEffects::teardown_on_unload);
        if let Err(err) = installed {
            tracing::error!(error = %err, "failed to install page effects");
        }
    });
    if let Err(err) = result {
        tracing::error!(error = %err, "failed to wait for page ready");
    }
}

/// JS handle to an installed set of effects.
#[wasm_bindgen]
pub struct PageEffectsHandle {
    effects: PageEffects,
}

#[wasm_bindgen]
impl PageEffectsHandle {
    /// Release every listener, observer and frame callback.
    pub fn teardown(&mut self) {
        self.effects.teardown();
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.effects.is_animating()
    }

    /// Total number of elements bound across all behaviors.
    #[wasm_bindgen(js_name = boundCount)]
    pub fn bound_count(&self) -> usize {
        self.effects.summary().total()
    }

    /// Fade-in elements revealed so far.
    #[wasm_bindgen(js_name = revealedCount)]
    pub fn revealed_count(&self) -> usize {
        self.effects.revealed_count()
    }
}

/// Install effects on the current document.
///
/// `config` may be `undefined`, in which case configuration is read from the page.
#[wasm_bindgen(js_name = installPageEffects)]
pub fn install_page_effects(config: JsValue) -> std::result::Result<PageEffectsHandle, JsValue> {
    let document = dom::document()?;
    let config = if config.is_undefined() || config.is_null() {
        EffectsConfig::from_page(&document)?
    } else {
        EffectsConfig::from_js(config)?
    };
    logging::init(config.log_level);

    let effects = PageEffects::install(&document, &config)?;
    Ok(PageEffectsHandle { effects })
}
