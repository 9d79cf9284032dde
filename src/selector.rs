use crate::config::SliderConfig;
use crate::error::SliderError;
use crate::geometry::{self, Point};
use crate::group::{OptionGroup, SelectionObserver, SnapAction};
use crate::polygon::{Edge, Endpoint, Polygon};
use crate::position::PositionEntity;
use crate::render::{MARKER_RADIUS, Renderer, StyleClass};
use std::rc::Rc;

/// Consumer callback receiving `(option, level)` on every selection change.
pub type SelectionCallback = Rc<dyn Fn(usize, usize)>;

pub struct Options {
    pub config: SliderConfig,
    pub on_selection_changed: SelectionCallback,
}

impl Default for Options {
    fn default() -> Self {
        Self::new(SliderConfig::default())
    }
}

impl Options {
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config,
            on_selection_changed: Rc::new(|_, _| {}),
        }
    }

    pub fn on_selection_changed(mut self, callback: impl Fn(usize, usize) + 'static) -> Self {
        self.on_selection_changed = Rc::new(callback);
        self
    }
}

/// Size of the drawing surface; the layout is centered in it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Forwards one group's selection changes to the consumer, tagged with the
/// group's option index.
struct SelectionForwarder {
    option: usize,
    callback: SelectionCallback,
}

impl SelectionObserver for SelectionForwarder {
    fn on_selection_changed(&self, level: usize) {
        (self.callback)(self.option, level);
    }
}

pub struct PolySlider {
    center: Point,
    levels: Vec<Polygon>,
    groups: Vec<OptionGroup>,
    group_edges: Vec<Rc<Edge>>,
    selector: Polygon,
    dragging: Option<usize>,
}

impl PolySlider {
    /// Builds the level polygons, the option groups and the selector overlay,
    /// then binds every marker to its starting level.
    ///
    /// The callback in `options` already receives these initial bindings.
    pub fn create(bounds: Bounds, options: Options) -> Result<Self, SliderError> {
        let Options {
            config,
            on_selection_changed,
        } = options;
        config.validate()?;

        let center = bounds.center();
        let mut levels: Vec<Polygon> = (0..config.level_count)
            .map(|level| {
                Polygon::new(
                    center,
                    config.level_radius(level),
                    config.option_count,
                    StyleClass::Static,
                )
            })
            .collect();

        let mut groups = Vec::with_capacity(config.option_count);
        let mut group_edges = Vec::with_capacity(config.option_count);
        for option in 0..config.option_count {
            let vertices: Vec<Point> = levels
                .iter()
                .filter_map(|polygon| polygon.point(option))
                .map(PositionEntity::position)
                .collect();
            if let Some(edge) = connect_group_edge(&mut levels, option) {
                group_edges.push(edge);
            }
            groups.push(OptionGroup::new(option, vertices));
        }

        let mut selector = Polygon::new(
            center,
            config.outer_radius(),
            config.option_count,
            StyleClass::Dynamic,
        );

        let start_level = config.start_level();
        for (option, (marker, group)) in selector
            .points_mut()
            .iter_mut()
            .zip(groups.iter_mut())
            .enumerate()
        {
            marker.set_label(format!("option-{option}"));
            group.add_selection_listener(Box::new(SelectionForwarder {
                option,
                callback: Rc::clone(&on_selection_changed),
            }));
            marker.attach_to_group(group, start_level)?;
        }

        log::debug!(
            "Created slider with {} levels and {} options around {:?}",
            config.level_count,
            config.option_count,
            center
        );

        Ok(Self {
            center,
            levels,
            groups,
            group_edges,
            selector,
            dragging: None,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn levels(&self) -> &[Polygon] {
        &self.levels
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn group_edges(&self) -> &[Rc<Edge>] {
        &self.group_edges
    }

    pub fn markers(&self) -> &[PositionEntity] {
        self.selector.points()
    }

    pub fn selection(&self, option: usize) -> Option<usize> {
        self.groups.get(option).and_then(OptionGroup::selection)
    }

    pub fn selections(&self) -> Vec<Option<usize>> {
        self.groups.iter().map(OptionGroup::selection).collect()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Topmost marker whose disc contains `at`.
    pub fn marker_at(&self, at: Point) -> Option<usize> {
        self.markers()
            .iter()
            .rposition(|marker| geometry::distance(marker.position(), at) <= MARKER_RADIUS)
    }

    pub fn pointer_down(&mut self, marker: usize) -> Result<(), SliderError> {
        if marker >= self.markers().len() {
            return Err(SliderError::MarkerOutOfRange {
                marker,
                marker_count: self.markers().len(),
            });
        }
        log::debug!("Start dragging marker {}", marker);
        self.dragging = Some(marker);
        Ok(())
    }

    /// Starts dragging the marker under `at`, if any.
    pub fn pointer_down_at(&mut self, at: Point) -> Option<usize> {
        let marker = self.marker_at(at)?;
        self.pointer_down(marker).ok()?;
        Some(marker)
    }

    /// Moves the dragged marker towards `to` and snaps it onto its group.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn pointer_move(&mut self, to: Point) -> Option<SnapAction> {
        let option = self.dragging?;
        let marker = self.selector.point_mut(option)?;
        let group = self.groups.get_mut(option)?;

        marker.move_to(to);
        let action = group.snap(marker);
        log::trace!("Marker {} at {:?}: {:?}", option, marker.position(), action);
        Some(action)
    }

    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) {
        if let Some(marker) = self.dragging.take() {
            log::debug!("Stop dragging marker {}", marker);
        }
    }

    /// Draws the levels, the group edges and finally the selector overlay.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        for polygon in &self.levels {
            polygon.draw(renderer)?;
        }
        for edge in &self.group_edges {
            edge.draw(renderer)?;
        }
        self.selector.draw(renderer)
    }
}

/// Joins the innermost and outermost vertex of `option` with an edge.
fn connect_group_edge(levels: &mut [Polygon], option: usize) -> Option<Rc<Edge>> {
    let (first, last) = (
        levels.first()?.point(option)?.position(),
        levels.last()?.point(option)?.position(),
    );
    let edge = Edge::new(first, last, StyleClass::GroupEdge);
    edge.observe(levels.first_mut()?.point_mut(option)?, Endpoint::Start);
    edge.observe(levels.last_mut()?.point_mut(option)?, Endpoint::End);
    Some(edge)
}

impl std::fmt::Debug for PolySlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolySlider")
            .field("center", &self.center)
            .field("levels", &self.levels.len())
            .field("selections", &self.selections())
            .field("dragging", &self.dragging)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{cross, distance};
    use crate::render::testing::RecordingRenderer;
    use std::cell::RefCell;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    type Changes = Rc<RefCell<Vec<(usize, usize)>>>;

    fn build(config: SliderConfig) -> (PolySlider, Changes) {
        let _ = env_logger::builder().is_test(true).try_init();
        let changes: Changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let slider = PolySlider::create(
            Bounds::new(400.0, 400.0),
            Options::new(config)
                .on_selection_changed(move |option, level| sink.borrow_mut().push((option, level))),
        )
        .unwrap();
        (slider, changes)
    }

    fn vertex(slider: &PolySlider, option: usize, level: usize) -> Point {
        slider.groups()[option].levels()[level]
    }

    #[test]
    fn test_default_scenario_layout() {
        let (slider, _) = build(SliderConfig::default());
        let center = slider.center();
        assert_eq!(center, Point::new(200.0, 200.0));

        let radii: Vec<f64> = slider.levels().iter().map(Polygon::radius).collect();
        assert_eq!(radii, vec![50.0, 100.0, 150.0]);

        for (level, expected) in [50.0, 100.0, 150.0].into_iter().enumerate() {
            let v = vertex(&slider, 0, level);
            assert!((distance(v, center) - expected).abs() < EPS);
            let angle = (v.y - center.y).atan2(v.x - center.x);
            assert!((angle + FRAC_PI_2).abs() < EPS);
        }
    }

    #[test]
    fn test_markers_start_on_level_two() {
        let (slider, changes) = build(SliderConfig::default());

        assert_eq!(slider.selections(), vec![Some(2); 5]);
        assert_eq!(
            *changes.borrow(),
            (0..5).map(|option| (option, 2)).collect::<Vec<_>>()
        );
        for (option, marker) in slider.markers().iter().enumerate() {
            assert_eq!(marker.position(), vertex(&slider, option, 2));
            assert_eq!(marker.group(), Some(option));
            assert_eq!(
                marker.label().map(|l| l.to_string()),
                Some(format!("option-{option}"))
            );
        }
    }

    #[test]
    fn test_start_level_clamped_for_few_levels() {
        for (level_count, expected) in [(1, 0), (2, 1)] {
            let (slider, changes) = build(SliderConfig {
                level_count,
                option_count: 2,
                ..Default::default()
            });
            assert_eq!(slider.selections(), vec![Some(expected); 2]);
            assert_eq!(changes.borrow().len(), 2);
        }
    }

    #[test]
    fn test_option_vertices_are_collinear() {
        for level_count in 1..=5 {
            for option_count in 1..=7 {
                let (slider, _) = build(SliderConfig {
                    level_count,
                    option_count,
                    radius_delta: 37.0,
                    start_level: Some(0),
                });
                for group in slider.groups() {
                    let v = group.levels();
                    assert_eq!(v.len(), level_count);
                    for i in 0..v.len() {
                        for j in i + 1..v.len() {
                            for k in j + 1..v.len() {
                                assert!(cross(v[i], v[j], v[k]).abs() < 1e-6);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_drag_to_level_one_notifies_once() {
        let (mut slider, changes) = build(SliderConfig::default());
        changes.borrow_mut().clear();
        let target = vertex(&slider, 0, 1);

        let grabbed = slider.pointer_down_at(slider.markers()[0].position());
        let first = slider.pointer_move(target);
        let again = slider.pointer_move(target);
        slider.pointer_up();

        assert_eq!(grabbed, Some(0));
        assert_eq!(first, Some(SnapAction::new(true, Some(1))));
        assert_eq!(again, Some(SnapAction::new(false, Some(1))));
        assert_eq!(*changes.borrow(), vec![(0, 1)]);
        assert_eq!(slider.selection(0), Some(1));
        assert_eq!(slider.markers()[0].position(), target);
        assert_eq!(slider.dragging(), None);
    }

    #[test]
    fn test_drag_between_levels_rests_on_the_ray() {
        let (mut slider, changes) = build(SliderConfig::default());
        changes.borrow_mut().clear();
        let center = slider.center();

        slider.pointer_down(0).unwrap();
        // 75 units up and off to the side; midway between levels 0 and 1
        let action = slider.pointer_move(Point::new(center.x + 30.0, center.y - 75.0));

        assert_eq!(action, Some(SnapAction::default()));
        let marker = slider.markers()[0].position();
        assert!((marker.x - center.x).abs() < EPS);
        assert!((marker.y - (center.y - 75.0)).abs() < EPS);
        assert_eq!(slider.selection(0), Some(2));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_diagonal_option_keeps_dominant_axis() {
        let (mut slider, changes) = build(SliderConfig::default());
        changes.borrow_mut().clear();
        let (inner, middle, outer) = (
            vertex(&slider, 2, 0),
            vertex(&slider, 2, 1),
            vertex(&slider, 2, 2),
        );
        // option 2 points down-right, steeper than 45 degrees
        assert!((outer.y - inner.y).abs() > (outer.x - inner.x).abs());

        // 20 units off the middle vertex, perpendicular to the ray
        let (ux, uy) = ((outer.x - inner.x) / 100.0, (outer.y - inner.y) / 100.0);
        let cursor = middle.offset(-uy * 20.0, ux * 20.0);

        slider.pointer_down(2).unwrap();
        let action = slider.pointer_move(cursor);

        let expected = Point::new(
            inner.x + (cursor.y - inner.y) * (outer.x - inner.x) / (outer.y - inner.y),
            cursor.y,
        );
        assert_eq!(action, Some(SnapAction::default()));
        let marker = slider.markers()[2].position();
        assert!(distance(marker, expected) < EPS, "{marker:?} != {expected:?}");
        assert!(distance(marker, middle) > 10.0);
        assert_eq!(slider.selection(2), Some(2));
        assert!(changes.borrow().is_empty());

        // a smaller sideways offset still lands within reach of the vertex
        let action = slider.pointer_move(middle.offset(-uy * 5.0, ux * 5.0));
        assert_eq!(action, Some(SnapAction::new(true, Some(1))));
        assert_eq!(slider.markers()[2].position(), middle);
        assert_eq!(*changes.borrow(), vec![(2, 1)]);
    }

    #[test]
    fn test_moves_without_drag_are_ignored() {
        let (mut slider, changes) = build(SliderConfig::default());
        changes.borrow_mut().clear();
        let before = slider.markers()[1].position();

        assert_eq!(slider.pointer_move(slider.center()), None);
        slider.pointer_down(1).unwrap();
        slider.pointer_leave();
        assert_eq!(slider.pointer_move(slider.center()), None);

        assert_eq!(slider.markers()[1].position(), before);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_marker_hit_testing() {
        let (mut slider, _) = build(SliderConfig::default());
        let marker = slider.markers()[3].position();

        assert_eq!(slider.marker_at(marker.offset(19.0, 0.0)), Some(3));
        assert_eq!(slider.marker_at(slider.center()), None);
        assert_eq!(slider.pointer_down_at(slider.center()), None);
        assert_eq!(slider.dragging(), None);
        assert_eq!(
            slider.pointer_down(5),
            Err(SliderError::MarkerOutOfRange {
                marker: 5,
                marker_count: 5
            })
        );
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        let called = Rc::new(RefCell::new(false));
        let flag = called.clone();
        let result = PolySlider::create(
            Bounds::new(100.0, 100.0),
            Options::new(SliderConfig {
                option_count: 0,
                ..Default::default()
            })
            .on_selection_changed(move |_, _| *flag.borrow_mut() = true),
        );

        assert!(matches!(
            result,
            Err(SliderError::InvalidConfiguration {
                field: "option_count",
                ..
            })
        ));
        assert!(!*called.borrow());
    }

    #[test]
    fn test_draw_order_and_selector_ring_follows_drag() {
        let (mut slider, _) = build(SliderConfig::default());
        let target = vertex(&slider, 0, 0);
        slider.pointer_down(0).unwrap();
        slider.pointer_move(target);

        let mut renderer = RecordingRenderer::default();
        slider.draw(&mut renderer).unwrap();

        // 3 static rings of 5 edges + 5 vertices, 5 group edges, 5 + 5 selector calls
        assert_eq!(renderer.calls.len(), 3 * 10 + 5 + 10);
        assert_eq!(renderer.circles(StyleClass::Static).len(), 15);
        assert_eq!(renderer.lines(StyleClass::GroupEdge).len(), 5);

        let markers = renderer.circles(StyleClass::Dynamic);
        assert_eq!(markers[0], target);
        let ring = renderer.lines(StyleClass::Dynamic);
        assert_eq!(ring[0].0, target);
        assert_eq!(ring[4].1, target);

        let (from, to) = renderer.lines(StyleClass::GroupEdge)[0];
        assert_eq!(from, vertex(&slider, 0, 0));
        assert_eq!(to, vertex(&slider, 0, 2));
    }
}
