//! One-shot fade-in for elements entering the viewport.
//!
//! A single `IntersectionObserver` watches every tagged element. The first
//! qualifying entry for an element adds the visible class and unobserves it,
//! so the transition never repeats even if the element scrolls away and back.
//!
//! An element taller than `viewport / threshold` can never reach the ratio
//! threshold. Such elements reveal once the visible part covers `threshold`
//! of the viewport height instead, and the observer gets a matching
//! per-element ratio so it reports that crossing.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use js_sys::{Array, Map};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::FadeInConfig;
use crate::dom;
use crate::error::{EffectsError, Result};

/// Ratios are reported as floats; allow for rounding just below the threshold.
const RATIO_EPSILON: f64 = 1e-6;

/// Sub-pixel slack when comparing visible height against the viewport.
const HEIGHT_EPSILON_PX: f64 = 0.5;

/// What an intersection entry reports about its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub is_intersecting: bool,
    pub ratio: f64,
    pub target_height: f64,
    pub visible_height: f64,
    /// Height of the root (viewport); unknown for cross-origin roots.
    pub root_height: Option<f64>,
}

impl Visibility {
    fn from_entry(entry: &IntersectionObserverEntry) -> Self {
        Self {
            is_intersecting: entry.is_intersecting(),
            ratio: entry.intersection_ratio(),
            target_height: entry.bounding_client_rect().height(),
            visible_height: entry.intersection_rect().height(),
            root_height: entry.root_bounds().map(|bounds| bounds.height()),
        }
    }
}

/// Whether `target_height` is too tall to ever reach `threshold` of itself
/// inside a root of `root_height`.
fn exceeds_root(threshold: f64, target_height: f64, root_height: f64) -> bool {
    root_height > 0.0 && target_height * threshold > root_height
}

/// Whether an intersection entry qualifies for reveal.
pub fn should_reveal(visibility: &Visibility, threshold: f64) -> bool {
    if !visibility.is_intersecting {
        return false;
    }
    if visibility.ratio + RATIO_EPSILON >= threshold {
        return true;
    }
    match visibility.root_height {
        Some(root) if exceeds_root(threshold, visibility.target_height, root) => {
            visibility.visible_height + HEIGHT_EPSILON_PX >= threshold * root
        }
        _ => false,
    }
}

/// The ratio at which an element of `target_height` first covers `threshold`
/// of its own height, or of the root height when it is too tall for that.
pub fn effective_threshold(threshold: f64, target_height: f64, root_height: f64) -> f64 {
    if exceeds_root(threshold, target_height, root_height) {
        threshold * root_height / target_height
    } else {
        threshold
    }
}

/// Sorted, de-duplicated observer thresholds.
fn threshold_list(mut ratios: Vec<f64>) -> Vec<f64> {
    ratios.sort_by(f64::total_cmp);
    ratios.dedup_by(|a, b| (*a - *b).abs() < RATIO_EPSILON);
    ratios
}

/// Records which elements have been revealed.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashSet<usize>,
}

impl RevealTracker {
    /// Mark `index` revealed. Returns `true` only the first time.
    pub fn mark(&mut self, index: usize) -> bool {
        self.revealed.insert(index)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct FadeIn {
    observer: IntersectionObserver,
    tracker: Rc<RefCell<RevealTracker>>,
    _callback: ObserverCallback,
}

impl FadeIn {
    /// Observe `elements`. Returns `None` when there is nothing to watch.
    pub fn observe(elements: Vec<Element>, config: &FadeInConfig) -> Result<Option<Self>> {
        if elements.is_empty() {
            return Ok(None);
        }

        let threshold = config.threshold;
        let visible_class = config.visible_class.clone();
        let tracker = Rc::new(RefCell::new(RevealTracker::default()));

        // Element identity -> index.
        let indices = Map::new();
        for (index, element) in elements.iter().enumerate() {
            indices.set(element, &JsValue::from_f64(index as f64));
        }

        let callback_tracker = tracker.clone();
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !should_reveal(&Visibility::from_entry(&entry), threshold) {
                        continue;
                    }

                    let target = entry.target();
                    let Some(index) = indices.get(&target).as_f64().map(|i| i as usize) else {
                        continue;
                    };

                    if callback_tracker.borrow_mut().mark(index) {
                        if let Err(err) = target.class_list().add_1(&visible_class) {
                            tracing::warn!(index, error = ?err, "failed to add fade-in class");
                        }
                        tracing::trace!(index, "fade-in revealed");
                    }
                    observer.unobserve(&target);
                }
            });

        let viewport_height = dom::window()?
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0);
        let ratios = elements
            .iter()
            .map(|el| {
                let height = el.get_bounding_client_rect().height();
                effective_threshold(threshold, height, viewport_height)
            })
            .collect();
        let thresholds: Array = threshold_list(ratios).into_iter().map(JsValue::from_f64).collect();

        let options = IntersectionObserverInit::new();
        options.set_threshold(&thresholds);
        options.set_root_margin(&config.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|err| EffectsError::js("IntersectionObserver", err))?;

        for element in &elements {
            observer.observe(element);
        }

        Ok(Some(Self {
            observer,
            tracker,
            _callback: callback,
        }))
    }

    pub fn revealed_count(&self) -> usize {
        self.tracker.borrow().revealed_count()
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for FadeIn {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(ratio: f64) -> Visibility {
        Visibility {
            is_intersecting: true,
            ratio,
            target_height: 100.0,
            visible_height: 100.0 * ratio,
            root_height: Some(800.0),
        }
    }

    #[test]
    fn test_reveal_requires_intersection() {
        let hidden = Visibility {
            is_intersecting: false,
            ..visible(0.5)
        };
        assert!(!should_reveal(&hidden, 0.1));
    }

    #[test]
    fn test_reveal_at_threshold() {
        assert!(should_reveal(&visible(0.1), 0.1));
        assert!(should_reveal(&visible(0.099_999_9), 0.1));
        assert!(should_reveal(&visible(1.0), 0.1));
    }

    #[test]
    fn test_no_reveal_below_threshold() {
        assert!(!should_reveal(&visible(0.05), 0.1));
        assert!(!should_reveal(&visible(0.0), 0.1));
    }

    #[test]
    fn test_zero_threshold_reveals_any_intersection() {
        assert!(should_reveal(&visible(0.0), 0.0));
    }

    #[test]
    fn test_tall_element_reveals_on_viewport_share() {
        // 20 viewports tall: the ratio tops out at 0.05.
        let tall = Visibility {
            is_intersecting: true,
            ratio: 0.005,
            target_height: 16_000.0,
            visible_height: 80.0,
            root_height: Some(800.0),
        };
        assert!(should_reveal(&tall, 0.1));

        let sliver = Visibility {
            visible_height: 40.0,
            ratio: 0.0025,
            ..tall
        };
        assert!(!should_reveal(&sliver, 0.1));
    }

    #[test]
    fn test_viewport_share_ignored_for_normal_elements() {
        // Two viewports tall can still reach a 10% ratio, so the ratio rule applies.
        let medium = Visibility {
            is_intersecting: true,
            ratio: 0.05,
            target_height: 1_600.0,
            visible_height: 80.0,
            root_height: Some(800.0),
        };
        assert!(!should_reveal(&medium, 0.1));
    }

    #[test]
    fn test_unknown_root_uses_ratio_only() {
        let tall = Visibility {
            is_intersecting: true,
            ratio: 0.005,
            target_height: 16_000.0,
            visible_height: 80.0,
            root_height: None,
        };
        assert!(!should_reveal(&tall, 0.1));
    }

    #[test]
    fn test_effective_threshold() {
        assert_eq!(effective_threshold(0.1, 100.0, 800.0), 0.1);
        assert_eq!(effective_threshold(0.1, 8_000.0, 800.0), 0.1);
        assert!((effective_threshold(0.1, 16_000.0, 800.0) - 0.005).abs() < 1e-12);
        assert_eq!(effective_threshold(0.1, 16_000.0, 0.0), 0.1);
    }

    #[test]
    fn test_threshold_list_sorted_and_deduplicated() {
        assert_eq!(threshold_list(vec![0.1, 0.005, 0.1, 0.1]), vec![0.005, 0.1]);
    }

    #[test]
    fn test_tracker_marks_once() {
        let mut tracker = RevealTracker::default();
        assert!(tracker.mark(3));
        assert!(!tracker.mark(3));
        assert!(!tracker.mark(3));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn test_tracker_independent_elements() {
        let mut tracker = RevealTracker::default();
        assert!(tracker.mark(0));
        assert!(tracker.mark(1));
        assert!(!tracker.mark(0));
        assert_eq!(tracker.revealed_count(), 2);
    }
}
