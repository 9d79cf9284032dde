//! Option groups and the snap engine.
//!
//! A group holds the vertex coordinates of one option across all levels,
//! ordered from the innermost level outwards. The layout puts all of them on
//! one ray from the center, so constraining a dragged marker only needs the
//! segment between the first and the last vertex.

use crate::error::SliderError;
use crate::geometry::{self, Point};
use crate::position::PositionEntity;

/// Maximum distance between the constrained position and a level vertex for
/// the marker to lock onto that level.
pub const SNAP_THRESHOLD: f64 = 10.0;

/// Receives the new level whenever a group's selection changes.
pub trait SelectionObserver {
    fn on_selection_changed(&self, level: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapAction {
    pub selection_changed: bool,
    /// Level the point was locked onto, `None` when it was left between levels.
    pub level: Option<usize>,
}

impl SnapAction {
    pub fn new(selection_changed: bool, level: Option<usize>) -> Self {
        Self {
            selection_changed,
            level,
        }
    }
}

pub struct OptionGroup {
    option: usize,
    levels: Vec<Point>,
    selection: Option<usize>,
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl OptionGroup {
    pub fn new(option: usize, levels: Vec<Point>) -> Self {
        Self {
            option,
            levels,
            selection: None,
            observers: Vec::new(),
        }
    }

    pub fn option(&self) -> usize {
        self.option
    }

    pub fn levels(&self) -> &[Point] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn add_selection_listener(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observers.push(observer);
    }

    /// Places `point` on this group.
    ///
    /// With an explicit `level` the point is bound directly to that level's
    /// vertex. Without one, the point's current position is treated as a
    /// free drag position and constrained with [`OptionGroup::snap`].
    pub fn snap_to_group(
        &mut self,
        point: &mut PositionEntity,
        level: Option<usize>,
    ) -> Result<SnapAction, SliderError> {
        match level {
            Some(level) => self.bind(point, level),
            None => Ok(self.snap(point)),
        }
    }

    /// Selects `level` and moves `point` exactly onto its vertex.
    pub fn bind(
        &mut self,
        point: &mut PositionEntity,
        level: usize,
    ) -> Result<SnapAction, SliderError> {
        let Some(&vertex) = self.levels.get(level) else {
            return Err(SliderError::Binding {
                option: self.option,
                level,
                level_count: self.levels.len(),
            });
        };

        let changed = self.select(level);
        point.move_to(vertex);
        Ok(SnapAction::new(changed, Some(level)))
    }

    /// Constrains a dragged `point` onto the group's radial segment.
    ///
    /// The position is projected onto the segment between the first and the
    /// last level. If the projection lies within [`SNAP_THRESHOLD`] of a level
    /// vertex, the lowest such level is selected and the point locks onto it;
    /// otherwise the point rests on the projection and the selection is kept.
    pub fn snap(&mut self, point: &mut PositionEntity) -> SnapAction {
        let (Some(&first), Some(&last)) = (self.levels.first(), self.levels.last()) else {
            return SnapAction::default();
        };

        if first == last {
            point.move_to(first);
            return SnapAction::default();
        }

        let on_line = geometry::closest_point_on_segment(point.position(), first, last);

        let hit = self
            .levels
            .iter()
            .position(|&vertex| geometry::distance(on_line, vertex) <= SNAP_THRESHOLD);

        match hit {
            Some(level) => {
                let changed = self.select(level);
                point.move_to(self.levels[level]);
                SnapAction::new(changed, Some(level))
            }
            None => {
                point.move_to(on_line);
                SnapAction::default()
            }
        }
    }

    fn select(&mut self, level: usize) -> bool {
        if self.selection == Some(level) {
            return false;
        }
        log::debug!(
            "Option {} selection {:?} -> {}",
            self.option,
            self.selection,
            level
        );
        self.selection = Some(level);
        self.notify_selection_changed(level);
        true
    }

    fn notify_selection_changed(&self, level: usize) {
        for observer in &self.observers {
            observer.on_selection_changed(level);
        }
    }
}

impl std::fmt::Debug for OptionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionGroup")
            .field("option", &self.option)
            .field("levels", &self.levels)
            .field("selection", &self.selection)
            .field("observers", &self.observers.len())
            .finish()
    }
}
