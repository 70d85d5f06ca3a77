use crate::color::ColorSpec;
use crate::formatter::ValueFormatter;
use crate::geometry::{Insets, Point};
use crate::slider::{MAX_GESTURE_ANGLE, MIN_GESTURE_ANGLE, SWEEP_ANGLE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min_value: i32,
    pub max_value: i32,
    /// Defaults to `min_value` when omitted.
    pub current_value: Option<i32>,
    pub step_value: i32,
    pub show_value_text: bool,
    pub slider_width: f64,
    pub slider_color: ColorSpec,
    pub value_text_size: f64,
    pub value_text_color: ColorSpec,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min_value: 0,
            max_value: 100,
            current_value: None,
            step_value: 1,
            show_value_text: true,
            slider_width: 5.0,
            slider_color: ColorSpec::blue(),
            value_text_size: 100.0,
            value_text_color: ColorSpec::blue(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// What the host should do after a pointer event.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerAction {
    pub claim_gesture: bool,
    pub should_redraw: bool,
}

impl PointerAction {
    pub fn new(claim_gesture: bool, should_redraw: bool) -> Self {
        Self {
            claim_gesture,
            should_redraw,
        }
    }
}

/// Resolved size and padding for a render pass. The control is always square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
}

pub trait ValueChangedListener {
    fn on_value_changed(&self, slider: &CircularSlider, value: i32);
}

type Subscriber = Box<dyn Fn(&CircularSlider, i32)>;

pub struct CircularSlider {
    pub(crate) config: SliderConfig,
    pub(crate) current_value: i32,
    pub(crate) center: Point,
    pub(crate) render_requested: bool,
    formatter: Option<Box<dyn ValueFormatter>>,
    subscribers: Vec<Subscriber>,
}

impl CircularSlider {
    pub fn new(config: SliderConfig) -> Self {
        let current_value = config.current_value.unwrap_or(config.min_value);
        Self {
            config,
            current_value,
            center: Point::default(),
            render_requested: true,
            formatter: None,
            subscribers: Vec::new(),
        }
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn current_value(&self) -> i32 {
        self.current_value
    }

    /// Center of the control as of the last render pass.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_min_value(&mut self, value: i32) {
        self.config.min_value = value;
        self.request_render();
    }

    pub fn set_max_value(&mut self, value: i32) {
        self.config.max_value = value;
        self.request_render();
    }

    /// Trusts the caller: the value is neither clamped nor step-rounded, and
    /// subscribers are not notified. Only drag-path updates notify.
    pub fn set_current_value(&mut self, value: i32) {
        self.current_value = value;
        self.request_render();
    }

    pub fn set_step_value(&mut self, value: i32) {
        self.config.step_value = value;
        self.request_render();
    }

    pub fn set_show_value_text(&mut self, show: bool) {
        self.config.show_value_text = show;
        self.request_render();
    }

    pub fn set_slider_width(&mut self, width: f64) {
        self.config.slider_width = width;
        self.request_render();
    }

    pub fn set_slider_color(&mut self, color: ColorSpec) {
        self.config.slider_color = color;
        self.request_render();
    }

    pub fn set_value_text_size(&mut self, size: f64) {
        self.config.value_text_size = size;
        self.request_render();
    }

    pub fn set_value_text_color(&mut self, color: ColorSpec) {
        self.config.value_text_color = color;
        self.request_render();
    }

    pub fn set_value_formatter(&mut self, formatter: impl ValueFormatter + 'static) {
        self.formatter = Some(Box::new(formatter));
        self.request_render();
    }

    pub fn clear_value_formatter(&mut self) {
        self.formatter = None;
        self.request_render();
    }

    pub fn add_value_changed_listener(&mut self, listener: impl ValueChangedListener + 'static) {
        self.subscribers
            .push(Box::new(move |slider, value| {
                listener.on_value_changed(slider, value)
            }));
    }

    pub fn add_value_changed_callback(
        &mut self,
        callback: impl Fn(&CircularSlider, i32) + 'static,
    ) {
        self.subscribers.push(Box::new(callback));
    }

    /// True once per batch of mutations; the host answers with a redraw.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// The value text to draw: formatter output, or plain decimal without one.
    pub fn display_text(&self) -> String {
        match &self.formatter {
            Some(formatter) => formatter.format_value(self.current_value),
            None => self.current_value.to_string(),
        }
    }

    /// Angular extent of the filled arc. Zero when the range is degenerate.
    pub fn fill_sweep(&self) -> f64 {
        let span = self.config.max_value - self.config.min_value;
        if span <= 0 {
            return 0.0;
        }
        SWEEP_ANGLE * f64::from(self.current_value - self.config.min_value) / f64::from(span)
    }

    /// Forces a square: height equals the resolved width. Sides with no
    /// caller-set padding get `slider_width * scale` so the stroke does not
    /// clip against the bounds.
    pub fn measure(&self, proposed_width: f64, scale: f64, existing: Insets) -> Measurement {
        let insets = self.resolve_insets(existing, scale);
        let width = proposed_width.max(insets.horizontal());
        Measurement {
            width,
            height: width,
            insets,
        }
    }

    pub fn resolve_insets(&self, existing: Insets, scale: f64) -> Insets {
        let min_padding = self.config.slider_width * scale;
        let resolve = |side: f64| if side == 0.0 { min_padding } else { side };
        Insets {
            left: resolve(existing.left),
            top: resolve(existing.top),
            right: resolve(existing.right),
            bottom: resolve(existing.bottom),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerAction {
        match event {
            // a down event is always accepted so the host keeps routing the
            // sequence here instead of to an enclosing scrollable
            PointerEvent::Down(_) => PointerAction::new(true, false),
            PointerEvent::Move(point) => {
                let Some(angle) = self.gesture_angle(point) else {
                    return PointerAction::default();
                };
                self.apply_gesture_angle(angle);
                PointerAction::new(false, self.take_render_request())
            }
            // lifting the pointer just stops the stream; nothing to commit
            PointerEvent::Up(_) => PointerAction::default(),
        }
    }

    /// Remaps the pointer direction into the arc's own frame: 45.0 at the
    /// visual start of the arc, 315.0 at the end, monotonically increasing
    /// along the sweep. `None` in the dead zone at the arc gap.
    fn gesture_angle(&self, point: Point) -> Option<f64> {
        let mut raw = (self.center.x - point.x)
            .atan2(self.center.y - point.y)
            .to_degrees();
        if point.x > self.center.x {
            raw += 360.0;
        }
        let shifted = raw - 180.0;
        let angle = if shifted < 0.0 {
            -shifted
        } else {
            180.0 + (180.0 - shifted)
        };
        (MIN_GESTURE_ANGLE..=MAX_GESTURE_ANGLE)
            .contains(&angle)
            .then_some(angle)
    }

    fn apply_gesture_angle(&mut self, angle: f64) {
        let progress = (angle - MIN_GESTURE_ANGLE) / (MAX_GESTURE_ANGLE - MIN_GESTURE_ANGLE);
        let span = f64::from(self.config.max_value) - f64::from(self.config.min_value);
        let mut value = self.config.min_value + (progress * span).round() as i32;
        if value < self.config.min_value {
            value = self.config.min_value;
        }
        if value > self.config.max_value {
            value = self.config.max_value;
        }
        let value = round_to_step(value, self.config.step_value);

        // accepted moves repaint even when the value lands where it already was
        self.request_render();

        if value != self.current_value {
            self.current_value = value;
            log::trace!("gesture angle {angle:.1} -> value {value}");
            self.notify_value_changed();
        }
    }

    fn notify_value_changed(&mut self) {
        // the list is parked during dispatch so subscribers can borrow &self
        let subscribers = std::mem::take(&mut self.subscribers);
        for subscriber in &subscribers {
            subscriber(self, self.current_value);
        }
        self.subscribers = subscribers;
    }
}

/// Snaps `value` to the nearest multiple of `step`, ties toward the higher
/// multiple. Exact multiples are unchanged. `step` must be positive.
pub fn round_to_step(value: i32, step: i32) -> i32 {
    let step = f64::from(step);
    let value = f64::from(value);
    let low = (value / step).floor() * step;
    let high = (value / step).ceil() * step;
    let midpoint = (high - low) / 2.0;
    if value - low < midpoint { low as i32 } else { high as i32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::BEGIN_ANGLE;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CENTER: Point = Point { x: 100.0, y: 100.0 };

    fn slider(config: SliderConfig) -> CircularSlider {
        let mut slider = CircularSlider::new(config);
        slider.center = CENTER;
        slider
    }

    /// A point on the dial at the given angle in the gesture frame.
    fn point_at(gesture_angle: f64) -> Point {
        let screen = (BEGIN_ANGLE + (gesture_angle - MIN_GESTURE_ANGLE)).to_radians();
        Point::new(CENTER.x + 80.0 * screen.cos(), CENTER.y + 80.0 * screen.sin())
    }

    struct RecordingListener {
        values: Rc<RefCell<Vec<i32>>>,
    }

    impl ValueChangedListener for RecordingListener {
        fn on_value_changed(&self, _slider: &CircularSlider, value: i32) {
            self.values.borrow_mut().push(value);
        }
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(7, 5), 5);
        assert_eq!(round_to_step(8, 5), 10);
        assert_eq!(round_to_step(10, 5), 10);
        assert_eq!(round_to_step(0, 1), 0);
        assert_eq!(round_to_step(99, 10), 100);
    }

    #[test]
    fn test_defaults() {
        let config: SliderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.min_value, 0);
        assert_eq!(config.max_value, 100);
        assert_eq!(config.current_value, None);
        assert_eq!(config.step_value, 1);
        assert!(config.show_value_text);
        assert_eq!(config.slider_width, 5.0);
        assert_eq!(config.value_text_size, 100.0);
        assert_eq!(config.slider_color, ColorSpec::blue());

        let slider = CircularSlider::new(config);
        assert_eq!(slider.current_value(), 0);
    }

    #[test]
    fn test_mapping_monotonic_and_in_range() {
        let mut slider = slider(SliderConfig::default());

        let mut previous = i32::MIN;
        for degrees in 46..=314 {
            let action = slider.handle_pointer(PointerEvent::Move(point_at(f64::from(degrees))));
            assert!(action.should_redraw);
            let value = slider.current_value();
            assert!(value >= previous, "value decreased at {degrees}°");
            assert!((0..=100).contains(&value));
            previous = value;
        }
        assert_eq!(slider.current_value(), 100);
    }

    #[test]
    fn test_gesture_angle_midpoint() {
        // pointer straight above the center sits exactly mid-sweep
        let mut slider = slider(SliderConfig {
            step_value: 10,
            ..SliderConfig::default()
        });
        let above = Point::new(CENTER.x, CENTER.y - 80.0);
        let action = slider.handle_pointer(PointerEvent::Move(above));
        assert!(action.should_redraw);
        assert_eq!(slider.current_value(), 50);
    }

    #[test]
    fn test_dead_zone_ignored() {
        let mut slider = slider(SliderConfig::default());
        let fired = Rc::new(RefCell::new(Vec::new()));
        slider.add_value_changed_listener(RecordingListener {
            values: fired.clone(),
        });
        slider.set_current_value(30);
        slider.take_render_request();

        // straight below the center, the middle of the arc gap
        let below = Point::new(CENTER.x, CENTER.y + 80.0);
        for point in [below, point_at(10.0), point_at(350.0)] {
            let action = slider.handle_pointer(PointerEvent::Move(point));
            assert!(!action.should_redraw);
            assert!(!action.claim_gesture);
        }
        assert_eq!(slider.current_value(), 30);
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_down_claims_and_up_is_inert() {
        let mut slider = slider(SliderConfig::default());
        let down = slider.handle_pointer(PointerEvent::Down(point_at(180.0)));
        assert!(down.claim_gesture);
        assert!(!down.should_redraw);

        let before = slider.current_value();
        let up = slider.handle_pointer(PointerEvent::Up(point_at(180.0)));
        assert!(!up.claim_gesture);
        assert!(!up.should_redraw);
        assert_eq!(slider.current_value(), before);
    }

    #[test]
    fn test_notification_contract() {
        let mut slider = slider(SliderConfig {
            step_value: 10,
            ..SliderConfig::default()
        });
        let listener_calls = Rc::new(RefCell::new(Vec::new()));
        let callback_calls = Rc::new(RefCell::new(Vec::new()));
        slider.add_value_changed_listener(RecordingListener {
            values: listener_calls.clone(),
        });
        let recorded = callback_calls.clone();
        slider.add_value_changed_callback(move |slider, value| {
            assert_eq!(slider.current_value(), value);
            recorded.borrow_mut().push(value);
        });

        let above = Point::new(CENTER.x, CENTER.y - 80.0);
        slider.handle_pointer(PointerEvent::Move(above));
        assert_eq!(*listener_calls.borrow(), vec![50]);
        assert_eq!(*callback_calls.borrow(), vec![50]);

        // same position again: repaint, but no second notification
        let action = slider.handle_pointer(PointerEvent::Move(above));
        assert!(action.should_redraw);
        assert_eq!(*listener_calls.borrow(), vec![50]);
        assert_eq!(*callback_calls.borrow(), vec![50]);

        // plain setter never notifies
        slider.set_current_value(70);
        assert_eq!(*listener_calls.borrow(), vec![50]);
        assert_eq!(*callback_calls.borrow(), vec![50]);
    }

    #[test]
    fn test_drag_end_to_end() {
        let mut slider = slider(SliderConfig {
            min_value: 0,
            max_value: 100,
            step_value: 10,
            ..SliderConfig::default()
        });
        let fired = Rc::new(RefCell::new(Vec::new()));
        slider.add_value_changed_listener(RecordingListener {
            values: fired.clone(),
        });

        slider.handle_pointer(PointerEvent::Down(point_at(180.0)));
        let action = slider.handle_pointer(PointerEvent::Move(point_at(180.0)));
        assert!(action.should_redraw);
        assert_eq!(slider.current_value(), 50);
        assert_eq!(*fired.borrow(), vec![50]);
    }

    #[test]
    fn test_degenerate_range() {
        let mut slider = slider(SliderConfig {
            min_value: 50,
            max_value: 50,
            current_value: Some(50),
            ..SliderConfig::default()
        });
        assert_eq!(slider.fill_sweep(), 0.0);

        slider.handle_pointer(PointerEvent::Move(point_at(200.0)));
        assert_eq!(slider.current_value(), 50);
        assert_eq!(slider.fill_sweep(), 0.0);
    }

    #[test]
    fn test_fill_sweep() {
        let mut slider = slider(SliderConfig::default());
        slider.set_current_value(50);
        assert_eq!(slider.fill_sweep(), 135.0);
        slider.set_current_value(100);
        assert_eq!(slider.fill_sweep(), 270.0);
    }

    #[test]
    fn test_display_text_fallback() {
        let mut slider = slider(SliderConfig::default());
        slider.set_current_value(42);
        assert_eq!(slider.display_text(), "42");

        slider.set_value_formatter(|value: i32| format!("{value} kg"));
        assert_eq!(slider.display_text(), "42 kg");

        slider.clear_value_formatter();
        assert_eq!(slider.display_text(), "42");
    }

    #[test]
    fn test_setters_request_render() {
        let mut slider = slider(SliderConfig::default());
        slider.take_render_request();
        assert!(!slider.take_render_request());

        slider.set_slider_width(8.0);
        assert!(slider.take_render_request());
        assert!(!slider.take_render_request());
    }

    #[test]
    fn test_measure_is_square_with_min_padding() {
        let slider = slider(SliderConfig {
            slider_width: 6.0,
            ..SliderConfig::default()
        });

        let measured = slider.measure(200.0, 2.0, Insets::default());
        assert_eq!(measured.width, measured.height);
        assert_eq!(measured.insets, Insets::uniform(12.0));

        // caller-set padding wins over the derived minimum
        let existing = Insets {
            left: 30.0,
            ..Insets::default()
        };
        let measured = slider.measure(200.0, 2.0, existing);
        assert_eq!(measured.insets.left, 30.0);
        assert_eq!(measured.insets.top, 12.0);
    }
}
