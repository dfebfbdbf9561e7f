//! Hitbox collision
//!
//! The game uses a corner-containment test rather than a full rectangle
//! overlap: a box collides with another when one of its corners falls
//! strictly inside the other box. The test is asymmetric, and a box that
//! fully contains another without any of its own corners inside it reports
//! no collision. Callers rely on the exact argument order.

use super::entity::Hitbox;

/// Returns true if any corner of `this` lies strictly inside `other`.
///
/// Top edge corners are tried first, then bottom edge corners.
pub fn corners_inside(this: &Hitbox, other: &Hitbox) -> bool {
    let inside_x = |x: f32| other.x1 < x && x < other.x2;
    let inside_y = |y: f32| other.y1 < y && y < other.y2;

    // Upper side
    if inside_y(this.y1) && (inside_x(this.x1) || inside_x(this.x2)) {
        return true;
    }

    // Bottom side
    inside_y(this.y2) && (inside_x(this.x1) || inside_x(this.x2))
}
