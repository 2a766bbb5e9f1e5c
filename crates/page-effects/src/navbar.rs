//! Navbar restyling driven by the window's scroll offset.

use web_sys::{Element, Window};

use crate::config::NavbarConfig;
use crate::dom::{self, Listener};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarState {
    Top,
    Scrolled,
}

impl NavbarState {
    /// `Scrolled` once the page is scrolled strictly past `threshold`.
    pub fn from_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            NavbarState::Scrolled
        } else {
            NavbarState::Top
        }
    }

    /// Inline style properties for this state. `None` clears the property.
    pub fn styles(self, config: &NavbarConfig) -> [(&'static str, Option<&str>); 3] {
        match self {
            NavbarState::Scrolled => [
                ("box-shadow", Some(config.shadow.as_str())),
                ("backdrop-filter", Some(config.backdrop_filter.as_str())),
                ("background-color", Some(config.background.as_str())),
            ],
            NavbarState::Top => [
                ("box-shadow", None),
                ("backdrop-filter", None),
                ("background-color", None),
            ],
        }
    }

    pub fn apply(self, navbar: &Element, config: &NavbarConfig) {
        let classes = navbar.class_list();
        let class_result = match self {
            NavbarState::Scrolled => classes.add_1(&config.scrolled_class),
            NavbarState::Top => classes.remove_1(&config.scrolled_class),
        };
        if let Err(err) = class_result {
            tracing::warn!(error = ?err, "failed to toggle navbar class");
        }

        for (property, value) in self.styles(config) {
            match value {
                Some(value) => dom::set_style(navbar, property, value),
                None => dom::clear_style(navbar, property),
            }
        }
    }
}

/// The state to apply at install, if any. Only `Scrolled` is applied eagerly.
fn initial_state(state: NavbarState) -> Option<NavbarState> {
    match state {
        NavbarState::Scrolled => Some(state),
        NavbarState::Top => None,
    }
}

fn current_state(window: &Window, config: &NavbarConfig) -> NavbarState {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    NavbarState::from_scroll(scroll_y, config.scroll_threshold_px)
}

/// Follow scroll events, applying the scrolled state up front when the page
/// is already past the threshold.
///
/// A page at the top is left untouched until the first scroll, so inline
/// styles authored on the navbar survive install.
pub fn bind(window: &Window, navbar: Element, config: &NavbarConfig) -> Result<Listener> {
    if let Some(state) = initial_state(current_state(window, config)) {
        state.apply(&navbar, config);
    }

    let config = config.clone();
    let scroll_window = window.clone();
    Listener::new(window, "scroll", move |_| {
        current_state(&scroll_window, &config).apply(&navbar, &config);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_scroll() {
        assert_eq!(NavbarState::from_scroll(0.0, 50.0), NavbarState::Top);
        assert_eq!(NavbarState::from_scroll(50.0, 50.0), NavbarState::Top);
        assert_eq!(NavbarState::from_scroll(50.5, 50.0), NavbarState::Scrolled);
        assert_eq!(NavbarState::from_scroll(60.0, 50.0), NavbarState::Scrolled);
    }

    #[test]
    fn test_scroll_back_returns_to_top() {
        let states: Vec<_> = [0.0, 60.0, 120.0, 60.0, 0.0]
            .into_iter()
            .map(|y| NavbarState::from_scroll(y, 50.0))
            .collect();
        assert_eq!(
            states,
            vec![
                NavbarState::Top,
                NavbarState::Scrolled,
                NavbarState::Scrolled,
                NavbarState::Scrolled,
                NavbarState::Top,
            ]
        );
    }

    #[test]
    fn test_scrolled_styles() {
        let config = NavbarConfig::default();
        let styles = NavbarState::Scrolled.styles(&config);
        assert_eq!(styles[0], ("box-shadow", Some("0 4px 10px rgba(0, 0, 0, 0.1)")));
        assert_eq!(styles[1], ("backdrop-filter", Some("blur(10px)")));
        assert_eq!(styles[2], ("background-color", Some("rgba(255, 255, 255, 0.9)")));
    }

    #[test]
    fn test_initial_sync_only_applies_scrolled() {
        assert_eq!(initial_state(NavbarState::Scrolled), Some(NavbarState::Scrolled));
        assert_eq!(initial_state(NavbarState::Top), None);
    }

    #[test]
    fn test_top_clears_styles() {
        let config = NavbarConfig::default();
        let styles = NavbarState::Top.styles(&config);
        assert!(styles.iter().all(|(_, value)| value.is_none()));
    }
}
