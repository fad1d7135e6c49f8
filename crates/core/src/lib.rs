#![allow(clippy::many_single_char_names)]

//! Fixed-step physics and interaction core for a two-character tile
//! platformer. A fire character and a water character share one level:
//! tile collisions, moving platforms, hazards, exits, diamonds, levers and
//! buttons. Rendering, audio and input polling live in the host; it feeds
//! `Buttons` in and reads `Event`s and state back out.

use serde::{Deserialize, Serialize};

pub mod character;
pub mod collision;
pub mod entity;
pub mod error;
pub mod event;
pub mod geometry;
pub mod integrator;
pub mod interactables;
pub mod interaction;
pub mod level;
pub mod platform;
pub mod response;
pub mod simulation;
pub mod sweep;
pub mod tiles;

pub use character::Character;
pub use entity::Element;
pub use error::LevelError;
pub use event::Event;
pub use geometry::{rects_intersect, Aabb, HasAabb};
pub use level::{Difficulty, Level, LevelDesc};
pub use simulation::Simulation;
pub use tiles::TileGrid;

/// Ticks per second, for converting tick counts to elapsed time.
pub const HZ: f32 = 60.0;

/// Every tunable of the simulation. Units are world pixels and ticks.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Vertical
    pub gravity_strength: f32,
    pub jump_force: f32,
    pub terminal_velocity: f32,

    // Horizontal
    pub move_speed: f32,
    pub friction: f32,
    // |vx| below this snaps to rest
    pub friction_epsilon: f32,

    // Collision stepping
    pub sweep_step: f32,

    // Mechanisms
    pub platform_speed: f32,
    pub lever_debounce_ticks: u32,

    // Character extents
    pub character_half_width: f32,
    pub character_half_height: f32,
    pub hair_height: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            gravity_strength: 0.001,
            jump_force: -0.31,
            terminal_velocity: 15.0,

            move_speed: 0.2,
            friction: 0.85,
            friction_epsilon: 0.1,

            sweep_step: 0.1,

            platform_speed: 0.2,
            lever_debounce_ticks: 10_000,

            character_half_width: 7.0,
            character_half_height: 12.0,
            hair_height: 4.0,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), LevelError> {
        fn positive(name: &'static str, v: f32) -> Result<(), LevelError> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(LevelError::Param { name, reason: format!("must be positive, got {v}") })
            }
        }

        positive("sweep_step", self.sweep_step)?;
        positive("terminal_velocity", self.terminal_velocity)?;
        positive("character_half_width", self.character_half_width)?;
        positive("character_half_height", self.character_half_height)?;

        if !(0.0..=1.0).contains(&self.friction) {
            return Err(LevelError::Param {
                name: "friction",
                reason: format!("must be within [0, 1], got {}", self.friction),
            });
        }
        let forces_finite = self.gravity_strength.is_finite() && self.jump_force.is_finite();
        if !(self.platform_speed >= 0.0) || !forces_finite {
            return Err(LevelError::Param {
                name: "platform_speed",
                reason: "speeds and forces must be finite, platform speed non-negative".into(),
            });
        }
        if !(self.hair_height >= 0.0) || self.hair_height >= 2.0 * self.character_half_height {
            return Err(LevelError::Param {
                name: "hair_height",
                reason: format!(
                    "must be within [0, {}), got {}",
                    2.0 * self.character_half_height,
                    self.hair_height
                ),
            });
        }
        Ok(())
    }
}

bitflags::bitflags! {
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP  = 1 << 2;
    }
}

/// Per-tick movement intent of a character.
pub trait Controls {
    fn is_moving_left(&self) -> bool;
    fn is_moving_right(&self) -> bool;
    fn is_jumping(&self) -> bool;
}

impl Controls for Buttons {
    #[inline]
    fn is_moving_left(&self) -> bool {
        self.contains(Buttons::LEFT)
    }

    #[inline]
    fn is_moving_right(&self) -> bool {
        self.contains(Buttons::RIGHT)
    }

    #[inline]
    fn is_jumping(&self) -> bool {
        self.contains(Buttons::JUMP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = Params::default();
        params.validate().unwrap();
        assert_eq!(params.character_half_width * 2.0, 14.0);
        assert_eq!(params.character_half_height * 2.0 - params.hair_height, 20.0);
    }

    #[test]
    fn partial_params_fill_in_defaults() {
        let json = r#"{ "move_speed": 0.5, "lever_debounce_ticks": 3 }"#;
        let params: Params = serde_json::from_str(json).unwrap();
        assert_eq!(params.move_speed, 0.5);
        assert_eq!(params.lever_debounce_ticks, 3);
        assert_eq!(params.gravity_strength, Params::default().gravity_strength);
    }

    #[test]
    fn bad_params_are_rejected() {
        let mut params = Params::default();
        params.hair_height = 30.0;
        assert!(matches!(params.validate(), Err(LevelError::Param { name: "hair_height", .. })));

        let mut params = Params::default();
        params.sweep_step = 0.0;
        assert!(matches!(params.validate(), Err(LevelError::Param { name: "sweep_step", .. })));

        let mut params = Params::default();
        params.friction = 1.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn buttons_map_to_controls() {
        let b = Buttons::from_bits_truncate(0b1111_0101);
        assert!(b.is_moving_left());
        assert!(!b.is_moving_right());
        assert!(b.is_jumping());
        assert!(!Buttons::empty().is_jumping());
    }
}
