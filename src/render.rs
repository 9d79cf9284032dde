//! Interface to the drawing surface.
//!
//! The core never rasterizes anything itself. Polygons, edges and markers
//! describe themselves as circles and lines tagged with a [`StyleClass`];
//! the front end decides what each class looks like.

use crate::geometry::Point;
use strum::{Display, EnumIter, EnumString};

/// Radius of a level vertex.
pub const VERTEX_RADIUS: f64 = 10.0;
/// Radius of a draggable marker, also used for pointer hit-testing.
pub const MARKER_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum StyleClass {
    Static,
    Dynamic,
    GroupEdge,
}

impl StyleClass {
    pub fn vertex_radius(&self) -> f64 {
        match self {
            Self::Dynamic => MARKER_RADIUS,
            Self::Static | Self::GroupEdge => VERTEX_RADIUS,
        }
    }
}

pub trait Renderer {
    type Error;

    fn draw_circle(
        &mut self,
        center: Point,
        radius: f64,
        style: StyleClass,
    ) -> Result<(), Self::Error>;

    fn draw_line(&mut self, from: Point, to: Point, style: StyleClass) -> Result<(), Self::Error>;
}
