pub mod tolerance;
pub mod vector_2d;

pub use tolerance::{
    distance_point_to_line, points_roughly_equal, roughly_equal, Tolerance, DEFAULT_THICKNESS,
};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;
