//! Card hover elevation.

use web_sys::Element;

use crate::config::HoverConfig;
use crate::dom::{self, Listener};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPose {
    Lifted,
    Resting,
}

/// Inline style values for one pose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    pub transform: String,
    pub box_shadow: String,
    pub transition: String,
}

impl CardPose {
    pub fn style(self, config: &HoverConfig) -> CardStyle {
        let transform = match self {
            CardPose::Lifted => format!("translateY(-{}px)", config.lift_px),
            CardPose::Resting => "translateY(0)".to_string(),
        };
        let box_shadow = match self {
            CardPose::Lifted => config.lifted_shadow.clone(),
            CardPose::Resting => config.resting_shadow.clone(),
        };
        let secs = config.transition_secs;
        CardStyle {
            transform,
            box_shadow,
            transition: format!("transform {secs}s ease, box-shadow {secs}s ease"),
        }
    }
}

impl CardStyle {
    pub fn apply(&self, element: &Element) {
        dom::set_style(element, "transform", &self.transform);
        dom::set_style(element, "box-shadow", &self.box_shadow);
        dom::set_style(element, "transition", &self.transition);
    }
}

/// Attach enter/leave handlers to every card. Two listeners per card.
pub fn bind(cards: &[Element], config: &HoverConfig) -> Result<Vec<Listener>> {
    let lifted = CardPose::Lifted.style(config);
    let resting = CardPose::Resting.style(config);

    let mut listeners = Vec::with_capacity(cards.len() * 2);
    for card in cards {
        let (element, style) = (card.clone(), lifted.clone());
        listeners.push(Listener::new(card, "mouseenter", move |_| style.apply(&element))?);

        let (element, style) = (card.clone(), resting.clone());
        listeners.push(Listener::new(card, "mouseleave", move |_| style.apply(&element))?);
    }
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifted_style() {
        let style = CardPose::Lifted.style(&HoverConfig::default());
        assert_eq!(style.transform, "translateY(-5px)");
        assert_eq!(style.box_shadow, "0 10px 20px rgba(0, 0, 0, 0.1)");
        assert_eq!(style.transition, "transform 0.3s ease, box-shadow 0.3s ease");
    }

    #[test]
    fn test_resting_style() {
        let style = CardPose::Resting.style(&HoverConfig::default());
        assert_eq!(style.transform, "translateY(0)");
        assert_eq!(style.box_shadow, "0 2px 8px rgba(0, 0, 0, 0.05)");
        assert_eq!(style.transition, "transform 0.3s ease, box-shadow 0.3s ease");
    }

    #[test]
    fn test_custom_lift_and_duration() {
        let config = HoverConfig {
            lift_px: 2.5,
            transition_secs: 0.15,
            ..HoverConfig::default()
        };
        let style = CardPose::Lifted.style(&config);
        assert_eq!(style.transform, "translateY(-2.5px)");
        assert_eq!(style.transition, "transform 0.15s ease, box-shadow 0.15s ease");
    }
}
