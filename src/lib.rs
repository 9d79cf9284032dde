//! Radial multi-option selector.
//!
//! Concentric regular polygons ("levels") share a center. The vertices that
//! occupy the same angular slot on every level form an option group, and one
//! draggable marker per group snaps along the radial line through them,
//! reporting the selected level to a consumer callback.

pub mod config;
pub mod error;
pub mod geometry;
pub mod group;
pub mod polygon;
pub mod position;
pub mod render;
pub mod selector;

pub use crate::config::SliderConfig;
pub use crate::error::SliderError;
pub use crate::geometry::Point;
pub use crate::group::{OptionGroup, SelectionObserver, SnapAction};
pub use crate::polygon::{Edge, Polygon};
pub use crate::position::{PointLabel, PositionEntity, PositionObserver};
pub use crate::render::{Renderer, StyleClass};
pub use crate::selector::{Bounds, Options, PolySlider};
