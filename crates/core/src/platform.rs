use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{Body, Movable};
use crate::geometry::{Aabb, HasAabb};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
        }
    }
}

/// Which kind of mechanism drives a platform's group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activator {
    Lever,
    Button,
}

/// Kinematic platform sliding between its origin and `travel()` away from it.
#[derive(Clone, Debug)]
pub struct Platform {
    pub name: String,
    /// Levers/buttons with the same group drive this platform.
    pub group: String,
    pub activator: Activator,
    pub activated: bool,
    pub body: Body,
    size: Vec2,
    direction: Direction,
    tiles_to_move: u32,
    tile_size: f32,
    moved_distance: f32,
}

impl Platform {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        activator: Activator,
        top_left: Vec2,
        size: Vec2,
        direction: Direction,
        tiles_to_move: u32,
        tile_size: f32,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            activator,
            activated: false,
            body: Body::at(top_left),
            size,
            direction,
            tiles_to_move,
            tile_size,
            moved_distance: 0.0,
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn moved_distance(&self) -> f32 {
        self.moved_distance
    }

    /// Full travel distance in world units.
    #[inline]
    pub fn travel(&self) -> f32 {
        self.tiles_to_move as f32 * self.tile_size
    }

    /// Where the platform rests when deactivated.
    pub fn origin(&self) -> Vec2 {
        self.body.position - self.direction.unit() * self.moved_distance
    }

    /// Advance one tick toward the end of travel (activated) or back toward the
    /// origin. The step never overshoots, so `moved_distance` stays within
    /// `[0, travel()]`. `body.velocity` reports the displacement applied.
    pub fn advance(&mut self, speed: f32) {
        let delta = if self.activated {
            (self.travel() - self.moved_distance).clamp(0.0, speed)
        } else {
            -self.moved_distance.clamp(0.0, speed)
        };

        self.moved_distance = (self.moved_distance + delta).clamp(0.0, self.travel());
        let shift = self.direction.unit() * delta;
        self.body.position += shift;
        self.body.velocity = shift;
    }
}

impl HasAabb for Platform {
    fn aabb(&self) -> Aabb {
        Aabb::from_min_size(self.body.position, self.size)
    }
}

impl Movable for Platform {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lift() -> Platform {
        Platform::new(
            "lift",
            "purple",
            Activator::Button,
            Vec2::new(32.0, 64.0),
            Vec2::new(48.0, 8.0),
            Direction::Up,
            2,
            16.0,
        )
    }

    #[test]
    fn travels_and_returns_within_bounds() {
        let mut p = lift();
        p.activated = true;
        for _ in 0..1000 {
            p.advance(0.2);
            assert!(p.moved_distance() >= 0.0 && p.moved_distance() <= p.travel());
        }
        assert_eq!(p.moved_distance(), 32.0);
        assert!((p.body.position.y - 32.0).abs() < 1e-2);
        assert!((p.origin().y - 64.0).abs() < 1e-2);

        p.activated = false;
        for _ in 0..1000 {
            p.advance(0.2);
            assert!(p.moved_distance() >= 0.0 && p.moved_distance() <= p.travel());
        }
        assert_eq!(p.moved_distance(), 0.0);
        assert!((p.body.position.y - 64.0).abs() < 1e-2);
        assert_eq!(p.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn resting_platform_does_not_move() {
        let mut p = lift();
        p.advance(0.2);
        assert_eq!(p.body.position, Vec2::new(32.0, 64.0));
        assert_eq!(p.moved_distance(), 0.0);
    }
}
