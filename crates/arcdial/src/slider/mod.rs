pub mod model;
pub mod view;

pub use model::{
    CircularSlider, Measurement, PointerAction, PointerEvent, SliderConfig, ValueChangedListener,
    round_to_step,
};

/// Where the arc starts, in cairo surface degrees (clockwise, 0 at 3 o'clock).
pub const BEGIN_ANGLE: f64 = 135.0;
/// Full angular extent of the track, leaving a 90° gap at the bottom.
pub const SWEEP_ANGLE: f64 = 270.0;
/// Gesture window in the remapped angle frame; outside it input is ignored.
pub const MIN_GESTURE_ANGLE: f64 = 45.0;
pub const MAX_GESTURE_ANGLE: f64 = 315.0;

pub const TRACK_ALPHA: f64 = 0.2;
pub const FILL_ALPHA: f64 = 0.8;
pub const TEXT_ALPHA: f64 = 0.8;
