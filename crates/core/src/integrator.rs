use glam::Vec2;

use crate::character::Character;
use crate::sweep::sweep_against_tiles;
use crate::tiles::TileGrid;
use crate::{Controls, Params};

/// Horizontal intent: full speed either way, or friction decay toward rest.
pub fn apply_movement_input(c: &mut Character, params: &Params) {
    let vx = if c.is_moving_left() {
        -params.move_speed
    } else if c.is_moving_right() {
        params.move_speed
    } else {
        let decayed = c.body.velocity.x * params.friction;
        if decayed.abs() < params.friction_epsilon { 0.0 } else { decayed }
    };
    c.body.velocity.x = vx;
}

/// Jumps only off last tick's ground contact.
pub fn apply_jump(c: &mut Character, params: &Params) -> bool {
    if c.body.grounded && c.can_jump && c.is_jumping() {
        c.body.velocity.y = params.jump_force;
        c.can_jump = false;
        c.body.grounded = false;
        return true;
    }
    false
}

pub fn apply_gravity(c: &mut Character, params: &Params) {
    if !c.body.grounded {
        let vy = c.body.velocity.y + params.gravity_strength;
        c.body.velocity.y = vy.min(params.terminal_velocity);
    }
}

/// One tick of character physics against the tile grid:
/// input, jump, grounded reset, gravity, then an X sweep followed by a Y sweep.
/// Returns whether the character jumped.
pub fn integrate_character(c: &mut Character, grid: &TileGrid, params: &Params) -> bool {
    apply_movement_input(c, params);
    let jumped = apply_jump(c, params);

    // re-asserted by the vertical sweep or a platform landing
    c.body.grounded = false;

    apply_gravity(c, params);

    let vx = c.body.velocity.x;
    sweep_against_tiles(c, grid, Vec2::new(vx, 0.0), params.sweep_step);
    let vy = c.body.velocity.y;
    sweep_against_tiles(c, grid, Vec2::new(0.0, vy), params.sweep_step);

    jumped
}
