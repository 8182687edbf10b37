//! Value types shared by the property kernel
//!
//! - [`Vector2`]: immutable 2D vector with operator overloads
//! - [`TrackingVector`]: magnitude plus target point, used for centripetal acceleration

mod tracking;
mod vector2;

pub use tracking::TrackingVector;
pub use vector2::{Vector2, COLINEAR_EPSILON};
