//! Circle-distance proximity tests
//!
//! Entities are circles; two of them touch when their centers are closer
//! than the sum of their radii. No impulse response, just the overlap test.

use glam::Vec2;

/// Anything with a circular footprint
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

impl Circle for super::entity::Player {
    fn center(&self) -> Vec2 {
        self.mover.pos
    }
    fn radius(&self) -> f32 {
        self.mover.radius
    }
}

impl Circle for super::entity::Enemy {
    fn center(&self) -> Vec2 {
        self.mover.pos
    }
    fn radius(&self) -> f32 {
        self.mover.radius
    }
}

impl Circle for super::entity::Pickup {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Strict overlap: `distance < a.radius + b.radius`
#[inline]
pub fn collides(a: &impl Circle, b: &impl Circle) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// True if `a` overlaps any of `others`
pub fn collides_any<'a, T: Circle + 'a>(
    a: &impl Circle,
    others: impl IntoIterator<Item = &'a T>,
) -> bool {
    others.into_iter().any(|b| collides(a, b))
}

/// Indices of every item in `others` overlapping `a`, ascending
pub fn overlapping<T: Circle>(a: &impl Circle, others: &[T]) -> Vec<usize> {
    others
        .iter()
        .enumerate()
        .filter(|(_, b)| collides(a, *b))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Pickup, PickupKind};

    fn dot(x: f32, y: f32, radius: f32) -> Pickup {
        Pickup {
            kind: PickupKind::Heart,
            pos: Vec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn test_touching_is_not_colliding() {
        let a = dot(0.0, 0.0, 10.0);
        assert!(!collides(&a, &dot(15.0, 0.0, 5.0)));
        assert!(collides(&a, &dot(14.9, 0.0, 5.0)));
        assert!(collides(&a, &dot(3.0, 4.0, 0.5)));
    }

    #[test]
    fn test_overlapping_indices() {
        let a = dot(50.0, 50.0, 10.0);
        let others = [
            dot(0.0, 0.0, 10.0),
            dot(55.0, 50.0, 10.0),
            dot(200.0, 0.0, 10.0),
            dot(50.0, 65.0, 10.0),
        ];
        assert_eq!(overlapping(&a, &others), vec![1, 3]);
        assert!(collides_any(&a, &others));
        assert!(!collides_any(&a, &others[2..3]));
    }
}
