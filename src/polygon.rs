use crate::error::SliderError;
use crate::geometry::Point;
use crate::position::{PositionEntity, PositionObserver};
use crate::render::{Renderer, StyleClass};
use std::cell::Cell;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

/// Evenly spaced vertices of a regular polygon around `center`.
///
/// Vertex `i` sits at angle `i * 2PI / count - PI/2`, so the first vertex
/// points up. Every caller sharing `center` and `count` gets the same angle
/// for the same index, which keeps each option's vertices on one ray.
pub fn layout(center: Point, radius: f64, count: usize) -> Vec<Point> {
    if count == 0 {
        log::warn!("{}", SliderError::DegenerateLayout { radius });
        return Vec::new();
    }

    let step = TAU / count as f64;
    (0..count)
        .map(|i| center.polar_offset(radius, i as f64 * step - FRAC_PI_2))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// A line between two position entities that follows them as they move.
#[derive(Debug)]
pub struct Edge {
    start: Cell<Point>,
    end: Cell<Point>,
    style: StyleClass,
}

impl Edge {
    pub fn new(start: Point, end: Point, style: StyleClass) -> Rc<Self> {
        Rc::new(Self {
            start: Cell::new(start),
            end: Cell::new(end),
            style,
        })
    }

    /// Registers this edge on `entity` so `endpoint` tracks its moves.
    pub fn observe(self: &Rc<Self>, entity: &mut PositionEntity, endpoint: Endpoint) {
        entity.add_position_listener(Rc::new(EdgeEnd {
            edge: Rc::clone(self),
            endpoint,
        }));
    }

    pub fn start(&self) -> Point {
        self.start.get()
    }

    pub fn end(&self) -> Point {
        self.end.get()
    }

    pub fn style(&self) -> StyleClass {
        self.style
    }

    pub fn draw<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        renderer.draw_line(self.start(), self.end(), self.style)
    }
}

struct EdgeEnd {
    edge: Rc<Edge>,
    endpoint: Endpoint,
}

impl PositionObserver for EdgeEnd {
    fn on_position_changed(&self, entity: &PositionEntity) {
        match self.endpoint {
            Endpoint::Start => self.edge.start.set(entity.position()),
            Endpoint::End => self.edge.end.set(entity.position()),
        }
    }
}

/// A regular polygon whose vertices are position entities joined in a ring.
#[derive(Debug)]
pub struct Polygon {
    center: Point,
    radius: f64,
    style: StyleClass,
    points: Vec<PositionEntity>,
    edges: Vec<Rc<Edge>>,
}

impl Polygon {
    pub fn new(center: Point, radius: f64, count: usize, style: StyleClass) -> Self {
        let mut points: Vec<PositionEntity> = layout(center, radius, count)
            .into_iter()
            .map(PositionEntity::new)
            .collect();

        let n = points.len();
        let edges = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let edge = Edge::new(points[i].position(), points[j].position(), style);
                edge.observe(&mut points[i], Endpoint::Start);
                edge.observe(&mut points[j], Endpoint::End);
                edge
            })
            .collect();

        Self {
            center,
            radius,
            style,
            points,
            edges,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn style(&self) -> StyleClass {
        self.style
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PositionEntity] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [PositionEntity] {
        &mut self.points
    }

    pub fn point(&self, index: usize) -> Option<&PositionEntity> {
        self.points.get(index)
    }

    pub fn point_mut(&mut self, index: usize) -> Option<&mut PositionEntity> {
        self.points.get_mut(index)
    }

    pub fn edges(&self) -> &[Rc<Edge>] {
        &self.edges
    }

    /// Draws the ring of edges, then the vertices on top.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        for edge in &self.edges {
            edge.draw(renderer)?;
        }
        let radius = self.style.vertex_radius();
        for point in &self.points {
            renderer.draw_circle(point.position(), radius, self.style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance;
    use crate::render::testing::{DrawCall, RecordingRenderer};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_layout_starts_up_and_goes_clockwise() {
        let center = Point::new(200.0, 200.0);
        let points = layout(center, 100.0, 4);

        let expected = [
            Point::new(200.0, 100.0),
            Point::new(300.0, 200.0),
            Point::new(200.0, 300.0),
            Point::new(100.0, 200.0),
        ];
        assert_eq!(points.len(), 4);
        for (actual, expected) in points.iter().zip(expected) {
            assert!(distance(*actual, expected) < EPS, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_layout_keeps_radius() {
        let center = Point::new(-5.0, 12.0);
        for point in layout(center, 37.5, 7) {
            assert!((distance(point, center) - 37.5).abs() < EPS);
        }
    }

    #[test]
    fn test_layout_with_no_points_is_empty() {
        assert!(layout(Point::default(), 50.0, 0).is_empty());

        let polygon = Polygon::new(Point::default(), 50.0, 0, StyleClass::Static);
        let mut renderer = RecordingRenderer::default();
        polygon.draw(&mut renderer).unwrap();

        assert!(polygon.is_empty());
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_polygon_draws_closed_ring_then_vertices() {
        let polygon = Polygon::new(Point::new(0.0, 0.0), 10.0, 3, StyleClass::Static);
        let mut renderer = RecordingRenderer::default();
        polygon.draw(&mut renderer).unwrap();

        assert_eq!(renderer.calls.len(), 6);
        assert!(matches!(renderer.calls[0], DrawCall::Line(..)));
        assert!(matches!(renderer.calls[5], DrawCall::Circle(_, r, StyleClass::Static) if r == 10.0));

        let p = |i: usize| polygon.points()[i].position();
        assert_eq!(
            renderer.lines(StyleClass::Static),
            vec![(p(0), p(1)), (p(1), p(2)), (p(2), p(0))]
        );
    }

    #[test]
    fn test_edges_follow_moved_vertices() {
        let mut polygon = Polygon::new(Point::new(0.0, 0.0), 10.0, 3, StyleClass::Dynamic);
        let moved = Point::new(42.0, -7.0);

        if let Some(point) = polygon.point_mut(1) {
            point.move_to(moved);
        }

        assert_eq!(polygon.edges()[0].end(), moved);
        assert_eq!(polygon.edges()[1].start(), moved);
        assert_ne!(polygon.edges()[2].start(), moved);
        assert_ne!(polygon.edges()[2].end(), moved);
    }

    #[test]
    fn test_single_vertex_edge_loops_back() {
        let mut polygon = Polygon::new(Point::new(0.0, 0.0), 10.0, 1, StyleClass::Dynamic);
        assert_eq!(polygon.points()[0].observer_count(), 2);

        let moved = Point::new(1.0, 2.0);
        if let Some(point) = polygon.point_mut(0) {
            point.move_to(moved);
        }
        assert_eq!(polygon.edges()[0].start(), moved);
        assert_eq!(polygon.edges()[0].end(), moved);
    }
}
