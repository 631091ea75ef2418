use super::{Circle, Line, Ray, Segment};

/// Any primitive curve the intersection algebra accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Line(Line),
    Ray(Ray),
    Segment(Segment),
    Circle(Circle),
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Ray> for Primitive {
    fn from(ray: Ray) -> Self {
        Self::Ray(ray)
    }
}

impl From<Segment> for Primitive {
    fn from(segment: Segment) -> Self {
        Self::Segment(segment)
    }
}

impl From<Circle> for Primitive {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}
