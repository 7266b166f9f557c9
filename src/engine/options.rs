//! Options methods for NavigationController

use std::path::Path;

use super::NavigationController;
use crate::camera::OrbitMapper;
use crate::options::Options;

impl NavigationController {
    /// Replace options and apply all changes to the recognizer and camera.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the recognizer and camera.
    ///
    /// Gestures in progress are abandoned; the camera distance is pulled
    /// into the new limits unless a transition is playing.
    pub fn apply_options(&mut self) {
        self.recognizer.set_options(self.options.gesture.clone());
        self.pinch_base_distance = None;

        self.camera
            .set_mapper(OrbitMapper::from_options(&self.options.camera));
        let distance = self.camera.distance();
        let _ = self.camera.update_distance(
            distance,
            self.options.camera.distance_limits(),
        );
    }

    /// Set one field of one options section from a JSON value, e.g.
    /// `("gesture", "long_press_ms", 650.0)`. Returns true if the result
    /// still deserializes and was applied.
    pub fn set_option(
        &mut self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> bool {
        let Ok(mut root) = serde_json::to_value(&self.options) else {
            return false;
        };
        let Some(slot) = root
            .get_mut(section)
            .and_then(serde_json::Value::as_object_mut)
            .and_then(|fields| fields.get_mut(field))
        else {
            log::debug!("Unknown option {section}.{field}");
            return false;
        };
        *slot = value;

        match serde_json::from_value(root) {
            Ok(updated) => {
                self.set_options(updated);
                true
            }
            Err(e) => {
                log::debug!("Rejected option {section}.{field}: {e}");
                false
            }
        }
    }

    /// Load a named options preset from the presets directory.
    /// Returns true on success.
    pub fn load_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path) {
            Ok(opts) => {
                log::info!("Loaded options preset '{name}'");
                self.set_options(opts);
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to load options preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset.
    /// Returns true on success.
    pub fn save_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("Saved options preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to save options preset '{name}': {e}");
                false
            }
        }
    }

    /// Name of the preset most recently loaded or saved.
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }
}
