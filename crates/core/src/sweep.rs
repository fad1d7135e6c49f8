//! Stepped "safe distance" movement.
//!
//! A displacement is walked in fixed-length steps from its start; the last
//! position that did not overlap anything is where the body ends up, accurate
//! to one step. Horizontal and vertical motion are swept in separate passes by
//! the caller, X first.

use glam::Vec2;

use crate::collision::Obstacle;
use crate::entity::Movable;
use crate::geometry::{Aabb, HasAabb};
use crate::response::respond_to_block;
use crate::tiles::TileGrid;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SweepOutcome {
    /// Zero displacement; nothing was tested.
    Stationary,
    /// The full displacement was applied.
    Clear,
    /// Stopped at `fraction` of the displacement.
    Blocked { fraction: f32 },
}

impl SweepOutcome {
    #[inline]
    pub fn is_blocked(self) -> bool {
        matches!(self, SweepOutcome::Blocked { .. })
    }
}

/// Largest fraction of `delta` that `start` can travel without touching
/// `obstacle`, or `None` when the whole path (end point included) is free.
pub fn max_safe_fraction<O: Obstacle + ?Sized>(
    start: &Aabb,
    delta: Vec2,
    obstacle: &O,
    step: f32,
) -> Option<f32> {
    march(delta.length(), step, |fraction| {
        obstacle.blocks(&start.translated(delta * fraction))
    })
}

fn march(total: f32, step: f32, mut blocked_at: impl FnMut(f32) -> bool) -> Option<f32> {
    debug_assert!(step > 0.0, "sweep step must be positive");
    if total == 0.0 {
        return None;
    }

    let steps = (total / step).ceil() as u32;
    let mut safe = 0.0;
    for i in 0..steps {
        let fraction = (i as f32 * step) / total;
        if blocked_at(fraction) {
            return Some(safe);
        }
        safe = fraction;
    }

    if blocked_at(1.0) {
        Some(safe)
    } else {
        None
    }
}

/// Move `body` by `delta`, stopping short of `obstacle`. A blocked move zeroes
/// the velocity along the blocked axis and lands the body when it was moving
/// down.
///
/// Candidate positions go through the body's own position so the box it ends
/// up with is bit-for-bit one that was tested.
pub fn move_with_collision_check<B, O>(
    body: &mut B,
    obstacle: &O,
    delta: Vec2,
    step: f32,
) -> SweepOutcome
where
    B: Movable + ?Sized,
    O: Obstacle + ?Sized,
{
    if delta == Vec2::ZERO {
        return SweepOutcome::Stationary;
    }

    let origin = body.body().position;
    let blocked = march(delta.length(), step, |fraction| {
        body.body_mut().position = origin + delta * fraction;
        obstacle.blocks(&body.aabb())
    });

    match blocked {
        None => {
            body.body_mut().position = origin + delta;
            SweepOutcome::Clear
        }
        Some(fraction) => {
            body.body_mut().position = origin + delta * fraction;
            respond_to_block(body, delta);
            log::trace!("sweep {delta:?} stopped at {fraction:.3}");
            SweepOutcome::Blocked { fraction }
        }
    }
}

/// Sweep against the level's solid tiles.
#[inline]
pub fn sweep_against_tiles<B>(body: &mut B, grid: &TileGrid, delta: Vec2, step: f32) -> SweepOutcome
where
    B: Movable + ?Sized,
{
    move_with_collision_check(body, grid, delta, step)
}

/// Sweep against a single solid object.
#[inline]
pub fn sweep_against_solid<B, S>(body: &mut B, solid: &S, delta: Vec2, step: f32) -> SweepOutcome
where
    B: Movable + ?Sized,
    S: HasAabb + ?Sized,
{
    move_with_collision_check(body, &solid.aabb(), delta, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::entity::Crate;
    use crate::Params;

    const STEP: f32 = 0.1;

    /// 10x10 grid of 16px tiles with a solid floor on row 9 and a solid
    /// column at x = 6.
    fn room() -> TileGrid {
        let mut tiles = vec![0; 100];
        for col in 0..10 {
            tiles[9 * 10 + col] = 1;
        }
        for row in 0..9 {
            tiles[row * 10 + 6] = 3;
        }
        TileGrid::new(10, 10, 16.0, tiles).unwrap()
    }

    fn approx_eq(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "expected {b}, got {a} (diff {})", (a - b).abs());
    }

    #[test]
    fn zero_displacement_is_a_no_op() {
        let params = Params::default();
        let mut c = Character::fire(Vec2::new(40.0, 60.0), &params);
        c.body.velocity = Vec2::new(1.5, -2.0);
        let before = c.body;
        let out = sweep_against_tiles(&mut c, &room(), Vec2::ZERO, STEP);
        assert_eq!(out, SweepOutcome::Stationary);
        assert_eq!(c.body, before);
        assert!(c.can_jump);
    }

    #[test]
    fn falling_onto_a_tile_lands_flush() {
        let params = Params::default();
        // feet 2 units above the floor top (y = 144)
        let feet = 144.0 - 2.0;
        let mut c = Character::fire(Vec2::new(40.0, feet - params.character_half_height), &params);
        c.body.velocity = Vec2::new(0.0, 5.0);
        c.can_jump = false;

        let out = sweep_against_tiles(&mut c, &room(), Vec2::new(0.0, 5.0), STEP);

        assert!(out.is_blocked());
        approx_eq(c.aabb().bottom(), 144.0, STEP + 1e-3);
        assert!(c.aabb().bottom() <= 144.0);
        assert_eq!(c.body.velocity.y, 0.0);
        assert!(c.body.grounded);
        assert!(c.can_jump);
    }

    #[test]
    fn wall_hit_zeroes_only_x() {
        let params = Params::default();
        // right edge at 90, wall starts at 96
        let mut c = Character::water(Vec2::new(83.0, 100.0), &params);
        c.body.velocity = Vec2::new(10.0, 0.7);
        let out = sweep_against_tiles(&mut c, &room(), Vec2::new(10.0, 0.0), STEP);
        assert!(out.is_blocked());
        approx_eq(c.aabb().right(), 96.0, STEP + 1e-3);
        assert_eq!(c.body.velocity.x, 0.0);
        assert_eq!(c.body.velocity.y, 0.7);
        assert!(!c.body.grounded);
    }

    #[test]
    fn ceiling_hit_zeroes_y_without_landing() {
        let params = Params::default();
        let ceiling = Aabb::new(0.0, 0.0, 200.0, 16.0);
        let mut c = Character::fire(Vec2::new(50.0, 30.0), &params);
        c.body.velocity = Vec2::new(0.3, -6.0);
        c.can_jump = false;
        let out = sweep_against_solid(&mut c, &ceiling, Vec2::new(0.0, -6.0), STEP);
        assert!(out.is_blocked());
        approx_eq(c.aabb().top(), 16.0, STEP + 1e-3);
        assert_eq!(c.body.velocity, Vec2::new(0.3, 0.0));
        assert!(!c.body.grounded);
        assert!(!c.can_jump);
    }

    #[test]
    fn unobstructed_move_applies_full_displacement() {
        let params = Params::default();
        let mut c = Character::fire(Vec2::new(20.0, 20.0), &params);
        c.body.velocity = Vec2::new(3.0, 0.0);
        let out = sweep_against_tiles(&mut c, &room(), Vec2::new(3.0, 0.0), STEP);
        assert_eq!(out, SweepOutcome::Clear);
        assert_eq!(c.body.position, Vec2::new(23.0, 20.0));
        assert_eq!(c.body.velocity.x, 3.0);
    }

    #[test]
    fn fast_moves_do_not_tunnel_through_thin_solids() {
        let params = Params::default();
        let sliver = Aabb::new(100.0, 0.0, 1.0, 200.0);
        let mut c = Character::fire(Vec2::new(80.0, 50.0), &params);
        // the end point is well past the sliver and clear of it
        let out = sweep_against_solid(&mut c, &sliver, Vec2::new(60.0, 0.0), STEP);
        assert!(out.is_blocked());
        assert!(c.aabb().right() <= 100.0);
    }

    #[test]
    fn swept_end_positions_never_overlap() {
        let params = Params::default();
        let grid = room();
        let deltas = [
            Vec2::new(15.0, 0.0),
            Vec2::new(-15.0, 0.0),
            Vec2::new(0.0, 15.0),
            Vec2::new(0.0, -15.0),
            Vec2::new(7.3, 11.9),
            Vec2::new(-4.4, 9.1),
            Vec2::new(0.05, 0.0),
        ];
        let mut checked = 0;
        let mut y = 20.0;
        while y < 150.0 {
            let mut x = 4.0;
            while x < 160.0 {
                let start = Character::fire(Vec2::new(x, y), &params);
                if !grid.blocks(&start.aabb()) {
                    for delta in deltas {
                        let mut c = start.clone();
                        sweep_against_tiles(&mut c, &grid, delta, STEP);
                        assert!(
                            !grid.blocks(&c.aabb()),
                            "start {:?} delta {:?} ended at {:?}",
                            start.body.position,
                            delta,
                            c.body.position
                        );
                        checked += 1;
                    }
                }
                x += 6.5;
            }
            y += 7.25;
        }
        assert!(checked > 100);
    }

    #[test]
    fn safe_fraction_against_a_box() {
        let wall = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let mover = Aabb::new(0.0, 0.0, 5.0, 5.0);
        // 5 units of room out of 10 requested
        let f = max_safe_fraction(&mover, Vec2::new(10.0, 0.0), &wall, STEP).unwrap();
        approx_eq(f, 0.5, STEP / 10.0 + 1e-4);
        assert_eq!(max_safe_fraction(&mover, Vec2::new(4.0, 0.0), &wall, STEP), None);
        assert_eq!(max_safe_fraction(&mover, Vec2::ZERO, &wall, STEP), None);
    }

    #[test]
    fn crates_sweep_like_any_body() {
        let mut b = Crate::new("crate", Vec2::new(16.0, 100.0), Vec2::new(16.0, 16.0));
        let out = sweep_against_tiles(&mut b, &room(), Vec2::new(0.0, 40.0), STEP);
        assert!(out.is_blocked());
        assert!(b.body.grounded);
        approx_eq(b.aabb().bottom(), 144.0, STEP + 1e-3);
    }
}
