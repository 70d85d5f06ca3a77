//! A circular slider widget: a 270° arc the user drags along to set an
//! integer value, rendered with cairo.
//!
//! The widget carries no toolkit lifecycle of its own. The host hands it a
//! `cairo::Context` to render into, routes pointer events to
//! [`CircularSlider::handle_pointer`], and drains re-render requests through
//! [`CircularSlider::take_render_request`].

pub mod color;
pub mod formatter;
pub mod geometry;
pub mod slider;

pub use color::{ColorParseError, ColorSpec};
pub use formatter::ValueFormatter;
pub use geometry::{Insets, Point};
pub use slider::{
    CircularSlider, Measurement, PointerAction, PointerEvent, SliderConfig, ValueChangedListener,
    round_to_step,
};
