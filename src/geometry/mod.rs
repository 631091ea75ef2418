pub mod circle;
pub mod line;
pub mod path;
pub mod primitive;
pub mod ray;
pub mod segment;

pub use circle::Circle;
pub use line::Line;
pub use path::Path;
pub use primitive::Primitive;
pub use ray::Ray;
pub use segment::{Orientation, Segment};
