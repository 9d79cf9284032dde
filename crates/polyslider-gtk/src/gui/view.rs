use super::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use polyslider::{PolySlider, Point, Renderer, StyleClass};
use std::f64::consts::PI;

/// Stroke width per style; static rings are not stroked at all.
fn line_width(style: StyleClass) -> f64 {
    match style {
        StyleClass::Static => 0.0,
        StyleClass::Dynamic | StyleClass::GroupEdge => 8.0,
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub struct CairoRenderer<'a> {
    cr: &'a Context,
    colors: &'a ThemeColors,
}

impl<'a> CairoRenderer<'a> {
    pub fn new(cr: &'a Context, colors: &'a ThemeColors) -> Self {
        Self { cr, colors }
    }
}

impl Renderer for CairoRenderer<'_> {
    type Error = cairo::Error;

    fn draw_circle(
        &mut self,
        center: Point,
        radius: f64,
        style: StyleClass,
    ) -> Result<(), cairo::Error> {
        set_source(self.cr, self.colors.for_style(style));
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.cr.fill()
    }

    fn draw_line(&mut self, from: Point, to: Point, style: StyleClass) -> Result<(), cairo::Error> {
        let width = line_width(style);
        if width <= 0.0 {
            return Ok(());
        }
        set_source(self.cr, self.colors.for_style(style));
        self.cr.set_line_width(width);
        self.cr.set_line_cap(cairo::LineCap::Round);
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke()
    }
}

pub fn draw(cr: &Context, slider: &PolySlider, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.background);
    cr.paint()?;
    slider.draw(&mut CairoRenderer::new(cr, colors))
}
