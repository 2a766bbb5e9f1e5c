//! Floating blob decoration.
//!
//! Each decorative element drifts along its own Lissajous path: a sine on the
//! x axis and a cosine on the y axis, phase-shifted by the element's index so
//! neighbours never move in lockstep.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use crate::config::MotionConfig;
use crate::dom;
use crate::error::Result;

/// Oscillation parameters shared by every decorative element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub amplitude: f64,
    pub x_frequency: f64,
    pub y_frequency: f64,
}

impl Wave {
    /// Offset of the element at `index` after `elapsed_secs`.
    pub fn offset(&self, elapsed_secs: f64, index: usize) -> Offset {
        let phase = index as f64;
        Offset {
            x: (elapsed_secs * self.x_frequency + phase).sin() * self.amplitude,
            y: (elapsed_secs * self.y_frequency + phase).cos() * self.amplitude,
        }
    }
}

impl From<&MotionConfig> for Wave {
    fn from(config: &MotionConfig) -> Self {
        Self {
            amplitude: config.amplitude_px,
            x_frequency: config.x_frequency,
            y_frequency: config.y_frequency,
        }
    }
}

impl Default for Wave {
    fn default() -> Self {
        Self::from(&MotionConfig::default())
    }
}

/// A 2D translation in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn to_transform(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that can be cancelled.
///
/// The pending frame id is tracked so `cancel` can revoke it before the
/// callback closure is dropped.
pub struct FrameLoop {
    window: Window,
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start<F>(mut tick: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let window = dom::window()?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let frame_callback = callback.clone();
        let frame_pending = pending.clone();
        let frame_window = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move || {
            frame_pending.set(None);
            tick();
            // Cancelled loops have no callback left to reschedule.
            if let Some(closure) = frame_callback.borrow().as_ref() {
                frame_pending.set(request_frame(&frame_window, closure));
            }
        }));

        if let Some(closure) = callback.borrow().as_ref() {
            pending.set(request_frame(&window, closure));
        }

        Ok(Self {
            window,
            callback,
            pending,
        })
    }

    pub fn is_active(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                tracing::warn!(error = ?err, "cancelAnimationFrame failed");
            }
        }
        // Drops the closure and breaks its reference cycle.
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(window: &Window, closure: &Closure<dyn FnMut()>) -> Option<i32> {
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::warn!(error = ?err, "requestAnimationFrame failed; stopping blob motion");
            None
        }
    }
}

/// Drives the blob decorations from a frame loop.
pub struct BlobMotion {
    frame_loop: FrameLoop,
}

impl BlobMotion {
    /// Start animating `elements`. Returns `None` when there is nothing to animate.
    pub fn start(elements: Vec<Element>, wave: Wave) -> Result<Option<Self>> {
        if elements.is_empty() {
            return Ok(None);
        }

        let count = elements.len();
        let start_ms = dom::now_ms();
        let frame_loop = FrameLoop::start(move || {
            let elapsed_secs = (dom::now_ms() - start_ms) / 1000.0;
            for (index, element) in elements.iter().enumerate() {
                let offset = wave.offset(elapsed_secs, index);
                dom::set_style(element, "transform", &offset.to_transform());
            }
        })?;

        tracing::debug!(count, "blob motion started");
        Ok(Some(Self { frame_loop }))
    }

    pub fn is_active(&self) -> bool {
        self.frame_loop.is_active()
    }

    pub fn cancel(&mut self) {
        if self.frame_loop.is_active() {
            tracing::debug!("blob motion cancelled");
        }
        self.frame_loop.cancel();
    }
}
