//! Swept AABB collision against static rectangles.
//!
//! A body moves from `old` by `velocity` in one step. The detector reports
//! which side of the obstacle it hits, how far along the step contact
//! happens, and the component-wise multiplier that bounces the velocity.

use glam::Vec2;

use crate::math::Bounds;

/// Side of the obstacle the moving body runs into, named by travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Flip x for side hits.
pub const REFLECT_X: Vec2 = Vec2::new(-1.0, 1.0);
/// Flip y for top/bottom hits.
pub const REFLECT_Y: Vec2 = Vec2::new(1.0, -1.0);

/// Result of a collision check.
///
/// A miss has `time_fraction = 1` and `reflection = (1, 1)`, so the caller
/// can always move by `velocity * time_fraction` and multiply the velocity
/// by `reflection`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult<T = ()> {
    /// Whether a collision occurred
    pub collided: bool,
    /// Travel direction at impact (if hit)
    pub direction: Option<Direction>,
    /// Gap between the body and the obstacle before the move, signed like the velocity
    pub distance: f32,
    /// Fraction (0, 1] of the velocity traveled before contact
    pub time_fraction: f32,
    /// Multiplier for the velocity after impact
    pub reflection: Vec2,
    /// Which obstacle was struck, for caller bookkeeping
    pub target: Option<T>,
}

impl<T> CollisionResult<T> {
    pub fn miss() -> Self {
        Self {
            collided: false,
            direction: None,
            distance: 0.0,
            time_fraction: 1.0,
            reflection: Vec2::ONE,
            target: None,
        }
    }

    fn hit(direction: Direction, distance: f32, travel: f32, reflection: Vec2) -> Self {
        Self {
            collided: true,
            direction: Some(direction),
            distance,
            time_fraction: distance / travel,
            reflection,
            target: None,
        }
    }

    /// Attach an obstacle identifier, changing the target type.
    pub fn with_target<U>(self, target: U) -> CollisionResult<U> {
        CollisionResult {
            collided: self.collided,
            direction: self.direction,
            distance: self.distance,
            time_fraction: self.time_fraction,
            reflection: self.reflection,
            target: Some(target),
        }
    }

    /// Contact position: `old` moved by the unobstructed part of the step.
    pub fn contact(&self, old: Bounds, velocity: Vec2) -> Bounds {
        old.translate(velocity * self.time_fraction)
    }

    /// Velocity after applying the reflection.
    pub fn reflect(&self, velocity: Vec2) -> Vec2 {
        velocity * self.reflection
    }
}

/// Check a body moving from `old` by `velocity` against a static `block`.
///
/// A body that already overlaps the block is not resolved again (no hit).
/// The impact side is decided from the pre-move edges, checked in the
/// order right, left, up, down; the first match wins, so a diagonal move
/// into a corner resolves horizontally. A side only matches when the body
/// travels toward it, so sliding along a touching edge never divides by a
/// zero velocity component.
pub fn check_collision_block(old: Bounds, block: Bounds, velocity: Vec2) -> CollisionResult {
    if old.intersects(&block) {
        return CollisionResult::miss();
    }
    let moved = old.translate(velocity);
    if !moved.intersects(&block) {
        return CollisionResult::miss();
    }

    if old.right() <= block.left() && velocity.x > 0.0 {
        let dist = block.left() - old.right();
        return CollisionResult::hit(Direction::Right, dist, velocity.x, REFLECT_X);
    }
    if old.left() >= block.right() && velocity.x < 0.0 {
        let dist = block.right() - old.left();
        return CollisionResult::hit(Direction::Left, dist, velocity.x, REFLECT_X);
    }
    if old.top() >= block.bottom() && velocity.y < 0.0 {
        let dist = block.bottom() - old.top();
        return CollisionResult::hit(Direction::Up, dist, velocity.y, REFLECT_Y);
    }
    if old.bottom() <= block.top() && velocity.y > 0.0 {
        let dist = block.top() - old.bottom();
        return CollisionResult::hit(Direction::Down, dist, velocity.y, REFLECT_Y);
    }

    CollisionResult::miss()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_hit_at_end_of_step() {
        let r = check_collision_block(
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            Bounds::new(20.0, 0.0, 10.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        assert!(r.collided);
        assert_eq!(r.direction, Some(Direction::Right));
        assert_eq!(r.time_fraction, 1.0);
        assert_eq!(r.reflection, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn partial_step_time_fraction() {
        let old = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let v = Vec2::new(20.0, 0.0);
        let r = check_collision_block(old, Bounds::new(15.0, 0.0, 10.0, 10.0), v);
        assert_eq!(r.direction, Some(Direction::Right));
        assert_eq!(r.distance, 5.0);
        assert_eq!(r.time_fraction, 0.25);
        assert_eq!(r.contact(old, v), Bounds::new(5.0, 0.0, 10.0, 10.0));
        assert_eq!(r.reflect(v), Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn left_hit() {
        let r = check_collision_block(
            Bounds::new(30.0, 0.0, 10.0, 10.0),
            Bounds::new(0.0, 0.0, 20.0, 10.0),
            Vec2::new(-20.0, 0.0),
        );
        assert_eq!(r.direction, Some(Direction::Left));
        assert_eq!(r.distance, -10.0);
        assert_eq!(r.time_fraction, 0.5);
        assert_eq!(r.reflection, REFLECT_X);
    }

    #[test]
    fn up_and_down_hits() {
        let up = check_collision_block(
            Bounds::new(0.0, 50.0, 5.0, 5.0),
            Bounds::new(0.0, 0.0, 200.0, 10.0),
            Vec2::new(0.0, -50.0),
        );
        assert_eq!(up.direction, Some(Direction::Up));
        assert_eq!(up.time_fraction, 0.8);
        assert_eq!(up.reflection, REFLECT_Y);

        let down = check_collision_block(
            Bounds::new(60.0, 150.0, 5.0, 5.0),
            Bounds::new(50.0, 160.0, 50.0, 10.0),
            Vec2::new(0.0, 10.0),
        );
        assert_eq!(down.direction, Some(Direction::Down));
        assert_eq!(down.time_fraction, 0.5);
    }

    #[test]
    fn already_overlapping_is_not_resolved() {
        let old = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let block = Bounds::new(5.0, 5.0, 10.0, 10.0);
        for v in [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(-3.0, 7.0)] {
            let r = check_collision_block(old, block, v);
            assert!(!r.collided);
            assert_eq!(r.direction, None);
        }
    }

    #[test]
    fn no_contact_after_move_is_a_miss() {
        let r = check_collision_block(
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            Bounds::new(50.0, 0.0, 10.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        assert!(!r.collided);
        assert_eq!(r.time_fraction, 1.0);
        assert_eq!(r.reflection, Vec2::ONE);
    }

    #[test]
    fn diagonal_corner_hit_resolves_horizontally() {
        // Body could reach the obstacle either across its left edge or its top edge.
        let r = check_collision_block(
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            Bounds::new(20.0, 20.0, 10.0, 10.0),
            Vec2::new(10.0, 10.0),
        );
        assert!(r.collided);
        assert_eq!(r.direction, Some(Direction::Right));
        assert_eq!(r.reflection, REFLECT_X);
        assert_eq!(r.time_fraction, 1.0);
    }

    #[test]
    fn sliding_past_a_touching_edge_has_finite_time() {
        // Right edge flush with the block's left edge, moving straight down onto its corner.
        let old = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let v = Vec2::new(0.0, 15.0);
        let r = check_collision_block(old, Bounds::new(10.0, 20.0, 10.0, 10.0), v);
        assert!(r.collided);
        assert_eq!(r.direction, Some(Direction::Down));
        assert!(r.time_fraction.is_finite());
        assert!(r.time_fraction > 0.0 && r.time_fraction <= 1.0);
        assert!((r.contact(old, v).y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn zero_velocity_never_collides() {
        let r = check_collision_block(
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            Bounds::new(10.5, 0.0, 10.0, 10.0),
            Vec2::ZERO,
        );
        assert!(!r.collided);
    }

    #[test]
    fn target_is_carried() {
        let r = check_collision_block(
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            Bounds::new(20.0, 0.0, 10.0, 10.0),
            Vec2::new(10.0, 0.0),
        )
        .with_target("brick");
        assert_eq!(r.target, Some("brick"));
        assert!(r.collided);
    }
}
