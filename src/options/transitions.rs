use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{TransitionPreset, ViewState};
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transitions", inline)]
#[serde(default)]
/// Duration and easing for each camera move between named views.
pub struct TransitionOptions {
    /// Overview → ring.
    pub overview_to_ring: TransitionPreset,
    /// Ring → contact.
    pub ring_to_contact: TransitionPreset,
    /// Contact → ring.
    pub contact_to_ring: TransitionPreset,
    /// Any view → overview.
    pub to_overview: TransitionPreset,
    /// Every other pair of views.
    pub fallback: TransitionPreset,
}

impl TransitionOptions {
    /// Preset for moving the camera from `from` to `to`.
    #[must_use]
    pub fn preset(&self, from: ViewState, to: ViewState) -> TransitionPreset {
        match (from, to) {
            (_, ViewState::Overview) => self.to_overview,
            (ViewState::Overview, ViewState::Ring) => self.overview_to_ring,
            (ViewState::Ring, ViewState::Contact) => self.ring_to_contact,
            (ViewState::Contact, ViewState::Ring) => self.contact_to_ring,
            _ => self.fallback,
        }
    }
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            overview_to_ring: TransitionPreset::new(
                400.0,
                EasingFunction::EaseOutCubic,
            ),
            ring_to_contact: TransitionPreset::new(
                500.0,
                EasingFunction::EaseInOutCubic,
            ),
            contact_to_ring: TransitionPreset::new(
                400.0,
                EasingFunction::EaseOutCubic,
            ),
            to_overview: TransitionPreset::new(
                500.0,
                EasingFunction::EaseInOutQuart,
            ),
            fallback: TransitionPreset::new(
                400.0,
                EasingFunction::EaseInOutCubic,
            ),
        }
    }
}
