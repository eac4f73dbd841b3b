//! Planar geometry on pixel coordinates: joint angles and distances.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate (grows downwards)
    pub y: f64,
}

impl Point2D {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product, treating both points as vectors
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Length of the vector from the origin
    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// True when this point is higher on screen than `other`
    #[must_use]
    pub fn is_above(self, other: Self) -> bool {
        self.y < other.y
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Self) -> Self::Output {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Angle ABC at vertex `b`, in degrees within `[0, 180]`.
///
/// Returns exactly `0.0` when either ray has zero length; callers must read
/// that value as "undetermined" rather than as a folded joint.
///
/// ```
/// use exercise_form_coach::geometry::{calculate_angle, Point2D};
///
/// let angle = calculate_angle(
///     Point2D::new(100.0, 50.0),
///     Point2D::new(100.0, 150.0),
///     Point2D::new(100.0, 250.0),
/// );
/// assert!((angle - 180.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn calculate_angle(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    let ba = a - b;
    let bc = c - b;

    let magnitude = ba.norm() * bc.norm();
    if magnitude == 0.0 {
        return 0.0;
    }

    let cosine = (ba.dot(bc) / magnitude).clamp(-1.0, 1.0);
    let angle = cosine.acos().to_degrees();

    // NaN only comes from non-finite input
    if angle.is_nan() {
        0.0
    } else {
        angle.clamp(0.0, 180.0)
    }
}

/// Euclidean distance between two points
#[must_use]
pub fn distance(a: Point2D, b: Point2D) -> f64 {
    (a - b).norm()
}
