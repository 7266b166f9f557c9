use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gestures", inline)]
#[serde(default)]
/// Thresholds and physics constants for touch gesture recognition.
pub struct GestureOptions {
    /// Movement (px) beyond which a touch stops being a tap.
    #[schemars(title = "Tap Slop", range(min = 2.0, max = 40.0), extend("step" = 1.0))]
    pub tap_max_distance: f32,
    /// Hold time (ms) before a stationary touch becomes a long press.
    #[schemars(title = "Long Press Delay", range(min = 200.0, max = 1500.0), extend("step" = 50.0))]
    pub long_press_ms: f64,
    /// Maximum gap (ms) between two taps for a double tap.
    #[schemars(title = "Double Tap Window", range(min = 100.0, max = 600.0), extend("step" = 10.0))]
    pub double_tap_ms: f64,
    /// Maximum distance (px) between two taps for a double tap.
    #[schemars(skip)]
    pub double_tap_distance: f32,
    /// Report single taps only once the double-tap window has passed.
    #[schemars(title = "Wait For Double Tap")]
    pub defer_single_tap: bool,
    /// Drag velocity cap (px per frame).
    #[schemars(skip)]
    pub max_velocity: f32,
    /// Per-frame velocity multiplier applied after release.
    #[schemars(title = "Friction", range(min = 0.5, max = 0.99), extend("step" = 0.01))]
    pub friction: f32,
    /// Speed (px per frame) below which momentum snaps to rest.
    #[schemars(skip)]
    pub snap_threshold: f32,
    /// Milliseconds per frame used to express velocity per frame.
    #[schemars(skip)]
    pub frame_ms: f32,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            tap_max_distance: 10.0,
            long_press_ms: 500.0,
            double_tap_ms: 300.0,
            double_tap_distance: 30.0,
            defer_single_tap: true,
            max_velocity: 180.0,
            friction: 0.95,
            snap_threshold: 5.0,
            frame_ms: 16.0,
        }
    }
}
