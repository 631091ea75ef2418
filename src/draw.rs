//! Rendering primitives as drawing commands.
//!
//! Nothing in the kernel depends on this module. Any geometry value can be
//! sent to a [`DrawSink`], which receives three commands: a dot, a straight
//! line, and an arc given by its start, tangent and end.

use std::fmt;

use crate::geometry::{Circle, Line, Path, Ray, Segment};
use crate::intersect::{Intersection, Intersections};
use crate::math::{Point2, Vector2};

/// Half-length used to render unbounded lines and rays.
pub const DRAW_EXTENT: f64 = 1000.0;

/// Receiver of drawing commands.
pub trait DrawSink {
    /// Draws a single point.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the command.
    fn dot(&mut self, point: &Point2) -> fmt::Result;

    /// Draws a straight line from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the command.
    fn line(&mut self, start: &Point2, end: &Point2) -> fmt::Result;

    /// Draws the circular arc leaving `start` along `direction` and ending
    /// at `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the command.
    fn arc(&mut self, start: &Point2, direction: &Vector2, end: &Point2) -> fmt::Result;
}

/// Geometry that can render itself to a [`DrawSink`].
pub trait Draw {
    /// # Errors
    ///
    /// Propagates the sink's errors.
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result;
}

impl Draw for Point2 {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        sink.dot(self)
    }
}

impl Draw for Segment {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        if self.is_straight() {
            sink.line(self.start(), self.end())
        } else {
            sink.arc(self.start(), self.direction(), self.end())
        }
    }
}

impl Draw for Circle {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        let bottom = self.center() - Vector2::y() * self.radius();
        let top = self.center() + Vector2::y() * self.radius();
        sink.arc(&bottom, &Vector2::x(), &top)?;
        sink.arc(&top, &Vector2::new(-1.0, 0.0), &bottom)
    }
}

impl Draw for Line {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        let reach = self.direction() * DRAW_EXTENT;
        sink.line(&(self.point() - reach), &(self.point() + reach))
    }
}

impl Draw for Ray {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        sink.line(self.start(), &(self.start() + self.direction() * DRAW_EXTENT))
    }
}

impl Draw for Path {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        self.segments().iter().try_for_each(|segment| segment.draw(sink))
    }
}

impl Draw for Intersection {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        sink.dot(&self.position)
    }
}

impl Draw for Intersections {
    fn draw(&self, sink: &mut dyn DrawSink) -> fmt::Result {
        self.iter().try_for_each(|hit| hit.draw(sink))
    }
}

/// A sink writing one text command per line:
///
/// ```text
/// dot x y
/// line x0 y0 x1 y1
/// arc x0 y0 dx dy x1 y1
/// ```
#[derive(Debug)]
pub struct CommandStream<W: fmt::Write> {
    out: W,
}

impl<W: fmt::Write> CommandStream<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Renders `item` and returns `self` for chaining.
    ///
    /// # Errors
    ///
    /// Propagates write errors of the underlying writer.
    pub fn draw(&mut self, item: &impl Draw) -> Result<&mut Self, fmt::Error> {
        item.draw(&mut *self)?;
        Ok(self)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: fmt::Write> DrawSink for CommandStream<W> {
    fn dot(&mut self, point: &Point2) -> fmt::Result {
        writeln!(self.out, "dot {} {}", point.x, point.y)
    }

    fn line(&mut self, start: &Point2, end: &Point2) -> fmt::Result {
        writeln!(self.out, "line {} {} {} {}", start.x, start.y, end.x, end.y)
    }

    fn arc(&mut self, start: &Point2, direction: &Vector2, end: &Point2) -> fmt::Result {
        writeln!(
            self.out,
            "arc {} {} {} {} {} {}",
            start.x, start.y, direction.x, direction.y, end.x, end.y
        )
    }
}
