use crate::geometry::{Insets, Point};
use crate::slider::model::CircularSlider;
use crate::slider::{BEGIN_ANGLE, FILL_ALPHA, SWEEP_ANGLE, TEXT_ALPHA, TRACK_ALPHA};
use cairo::Context;
use palette::Srgba;

impl CircularSlider {
    /// Draws the control into `cr`: track arc, fill arc, then the value text.
    /// Also refreshes the center used by gesture mapping, so hosts must route
    /// at least one render before pointer events mean anything.
    pub fn render(
        &mut self,
        cr: &Context,
        width: f64,
        height: f64,
        insets: Insets,
    ) -> Result<(), cairo::Error> {
        self.render_requested = false;
        self.center = Point::new(width / 2.0, height / 2.0);

        let (arc_center, radius) = arc_geometry(width, height, insets);
        let stroke = self.config.slider_width;

        let track = Srgba::new(0.0, 0.0, 0.0, TRACK_ALPHA);
        stroke_arc(cr, arc_center, radius, SWEEP_ANGLE, track, stroke)?;

        let fill = self.config.slider_color.with_alpha(FILL_ALPHA);
        stroke_arc(cr, arc_center, radius, self.fill_sweep(), fill, stroke)?;

        if self.config.show_value_text {
            self.draw_value_text(cr)?;
        }
        Ok(())
    }

    fn draw_value_text(&self, cr: &Context) -> Result<(), cairo::Error> {
        let text = self.display_text();
        let (r, g, b, a) = self
            .config
            .value_text_color
            .with_alpha(TEXT_ALPHA)
            .into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(self.config.value_text_size);

        let extents = cr.text_extents(&text)?;
        // baseline sits on the vertical center, not true optical centering
        cr.move_to(self.center.x - extents.width() / 2.0, self.center.y);
        cr.show_text(&text)
    }
}

/// Center and radius of the circle inscribed in the padded bounds.
fn arc_geometry(width: f64, height: f64, insets: Insets) -> (Point, f64) {
    let (left, top) = (insets.left, insets.top);
    let (right, bottom) = (width - insets.right, height - insets.bottom);
    let radius = (right - left).min(bottom - top) / 2.0;
    let center = Point::new((left + right) / 2.0, (top + bottom) / 2.0);
    (center, radius)
}

fn stroke_arc(
    cr: &Context,
    center: Point,
    radius: f64,
    sweep: f64,
    color: Srgba<f64>,
    stroke_width: f64,
) -> Result<(), cairo::Error> {
    if sweep <= 0.0 || radius <= 0.0 {
        return Ok(());
    }
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(stroke_width);
    cr.new_path();
    cr.arc(
        center.x,
        center.y,
        radius,
        BEGIN_ANGLE.to_radians(),
        (BEGIN_ANGLE + sweep).to_radians(),
    );
    cr.stroke()
}
