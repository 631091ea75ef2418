pub mod clip;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod intersect;
pub mod math;

pub use error::{CompassError, Result};
