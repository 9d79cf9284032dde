use crate::error::SliderError;
use crate::geometry::Point;
use crate::group::{OptionGroup, SnapAction};
use derive_more::{AsRef, Deref, Display, From, Into};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct PointLabel(String);

impl PointLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Receives every position change of the entities it is registered on.
///
/// Callbacks run synchronously inside [`PositionEntity::move_to`], in
/// registration order. Implementations must not move the entity that is
/// notifying them.
pub trait PositionObserver {
    fn on_position_changed(&self, entity: &PositionEntity);
}

/// A mutable 2D coordinate that broadcasts its moves.
///
/// Registration is append-only: observers live as long as the entity.
pub struct PositionEntity {
    label: Option<PointLabel>,
    position: Point,
    group: Option<usize>,
    observers: Vec<Rc<dyn PositionObserver>>,
}

impl PositionEntity {
    pub fn new(position: Point) -> Self {
        Self {
            label: None,
            position,
            group: None,
            observers: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(PointLabel::new(label));
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(PointLabel::new(label));
    }

    pub fn label(&self) -> Option<&PointLabel> {
        self.label.as_ref()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Option index of the group this entity is attached to.
    pub fn group(&self) -> Option<usize> {
        self.group
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn add_position_listener(&mut self, observer: Rc<dyn PositionObserver>) {
        self.observers.push(observer);
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
        self.notify_position_changed();
    }

    /// Attaches this entity to `group` and places it on `level`.
    pub fn attach_to_group(
        &mut self,
        group: &mut OptionGroup,
        level: usize,
    ) -> Result<SnapAction, SliderError> {
        let action = group.snap_to_group(self, Some(level))?;
        self.group = Some(group.option());
        Ok(action)
    }

    fn notify_position_changed(&self) {
        for observer in &self.observers {
            observer.on_position_changed(self);
        }
    }
}

impl fmt::Debug for PositionEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionEntity")
            .field("label", &self.label)
            .field("position", &self.position)
            .field("group", &self.group)
            .field("observers", &self.observers.len())
            .finish()
    }
}
