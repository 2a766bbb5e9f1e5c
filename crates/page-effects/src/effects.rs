//! The page effects controller.
//!
//! `PageEffects` owns everything the five behaviors register with the host:
//! the blob frame loop, the fade-in observer and every event listener.
//! Dropping it, or calling [`PageEffects::teardown`], releases all of them.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element};

use crate::anchors;
use crate::config::EffectsConfig;
use crate::dom::{self, Listener};
use crate::error::{EffectsError, Result};
use crate::fade_in::FadeIn;
use crate::hover;
use crate::motion::{BlobMotion, Wave};
use crate::navbar;

/// Number of elements each behavior bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub blobs: usize,
    pub anchors: usize,
    pub cards: usize,
    pub fade_ins: usize,
    pub navbar: bool,
}

impl InstallSummary {
    pub fn total(&self) -> usize {
        self.blobs + self.anchors + self.cards + self.fade_ins + usize::from(self.navbar)
    }
}

pub struct PageEffects {
    motion: Option<BlobMotion>,
    fade_in: Option<FadeIn>,
    listeners: Vec<Listener>,
    summary: InstallSummary,
}

impl PageEffects {
    /// Attach every behavior to `document`. Selectors that match nothing are skipped.
    pub fn install(document: &Document, config: &EffectsConfig) -> Result<Self> {
        config.validate()?;
        let window = dom::window()?;
        let selectors = &config.selectors;
        let mut summary = InstallSummary::default();
        let mut listeners = Vec::new();

        let motion = if config.motion.enabled {
            let blobs = query(document, &selectors.blob)?;
            summary.blobs = blobs.len();
            BlobMotion::start(blobs, Wave::from(&config.motion))?
        } else {
            None
        };

        let links = query(document, &selectors.anchor)?;
        summary.anchors = links.len();
        listeners.extend(anchors::bind(document, &links)?);

        let cards = query(document, &selectors.card)?;
        summary.cards = cards.len();
        listeners.extend(hover::bind(&cards, &config.hover)?);

        let fade_targets = query(document, &selectors.fade_in)?;
        summary.fade_ins = fade_targets.len();
        let fade_in = FadeIn::observe(fade_targets, &config.fade_in)?;

        match dom::query_first(document, &selectors.navbar)
            .map_err(|err| with_selector(err, &selectors.navbar))?
        {
            Some(navbar) => {
                summary.navbar = true;
                listeners.push(navbar::bind(&window, navbar, &config.navbar)?);
            }
            None => tracing::debug!(selector = %selectors.navbar, "no navbar; skipping"),
        }

        tracing::info!(
            blobs = summary.blobs,
            anchors = summary.anchors,
            cards = summary.cards,
            fade_ins = summary.fade_ins,
            navbar = summary.navbar,
            "page effects installed"
        );

        Ok(Self {
            motion,
            fade_in,
            listeners,
            summary,
        })
    }

    pub fn summary(&self) -> InstallSummary {
        self.summary
    }

    pub fn is_animating(&self) -> bool {
        self.motion.as_ref().is_some_and(BlobMotion::is_active)
    }

    /// Fade-in elements revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.fade_in.as_ref().map_or(0, FadeIn::revealed_count)
    }

    pub fn is_installed(&self) -> bool {
        self.motion.is_some() || self.fade_in.is_some() || !self.listeners.is_empty()
    }

    /// Release the frame loop, observer and listeners. Idempotent.
    pub fn teardown(&mut self) {
        if !self.is_installed() {
            return;
        }
        if let Some(mut motion) = self.motion.take() {
            motion.cancel();
        }
        if let Some(fade_in) = self.fade_in.take() {
            fade_in.disconnect();
        }
        let listener_count = self.listeners.len();
        self.listeners.clear();
        tracing::debug!(listener_count, "page effects torn down");
    }

    /// Hand ownership to a one-shot `beforeunload` listener that tears down.
    pub fn teardown_on_unload(self) -> Result<()> {
        let window = dom::window()?;
        let mut effects = self;
        let callback = Closure::once_into_js(move || {
            tracing::debug!("beforeunload; tearing down page effects");
            effects.teardown();
        });

        let options = AddEventListenerOptions::new();
        options.set_once(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "beforeunload",
                callback.unchecked_ref(),
                &options,
            )
            .map_err(|err| EffectsError::js("addEventListener(beforeunload)", err))
    }
}

impl Drop for PageEffects {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn query(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let elements = dom::query_all(document, selector).map_err(|err| with_selector(err, selector))?;
    if elements.is_empty() {
        tracing::debug!(selector, "selector matched nothing; skipping");
    }
    Ok(elements)
}

/// Name the offending selector in query errors.
fn with_selector(err: EffectsError, selector: &str) -> EffectsError {
    match err {
        EffectsError::Js { context, message } => EffectsError::Js {
            context,
            message: format!("{selector}: {message}"),
        },
        other => other,
    }
}
