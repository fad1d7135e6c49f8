use crate::entity::Element;
use crate::error::LevelError;
use crate::event::Event;
use crate::integrator::integrate_character;
use crate::interaction::run_interaction_pass;
use crate::level::{Level, LevelDesc};
use crate::{Buttons, Params, HZ};

/// Owns one running level. Nothing here is global; hosts may run as many
/// simulations side by side as they like.
#[derive(Clone, Debug)]
pub struct Simulation {
    params: Params,
    level: Level,
    tick: u64,
}

impl Simulation {
    pub fn new(level: Level, params: Params) -> Self {
        Self { params, level, tick: 0 }
    }

    /// Build from a description, using its parameter overrides if it has any.
    pub fn from_desc(desc: &LevelDesc) -> Result<Self, LevelError> {
        let params = desc.params.unwrap_or_default();
        let level = Level::from_desc(desc, &params)?;
        Ok(Self::new(level, params))
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Self::from_desc(&LevelDesc::from_json(json)?)
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.tick as f32 / HZ
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.level.is_game_over()
    }

    #[inline]
    pub fn is_level_completed(&self) -> bool {
        self.level.is_level_completed()
    }

    /// 0 to 3 stars. A late finish and a missed diamond cost one each; a loss
    /// scores nothing.
    pub fn score(&self) -> u8 {
        if self.level.is_game_over() {
            return 0;
        }
        let mut score = 3i32;
        if self.elapsed_seconds() > self.level.difficulty.time_limit_seconds() {
            score -= 1;
        }
        if self.level.diamonds_remaining() > 0 {
            score -= 1;
        }
        score.clamp(0, 3) as u8
    }

    /// Advance one tick. `inputs[i]` drives character `i` (fire, then water);
    /// missing entries mean no input. Once the level is lost nothing moves.
    pub fn step(&mut self, inputs: &[Buttons]) -> Vec<Event> {
        let mut events = Vec::new();
        if self.level.is_game_over() {
            return events;
        }

        let params = self.params;
        let level = &mut self.level;

        let mut was_grounded = Vec::with_capacity(level.characters.len());
        for (i, c) in level.characters.iter_mut().enumerate() {
            c.controls = inputs.get(i).copied().unwrap_or(Buttons::empty());
            was_grounded.push(c.is_grounded());
        }

        for p in level.platforms.iter_mut() {
            p.advance(params.platform_speed);
        }

        for (i, c) in level.characters.iter_mut().enumerate() {
            if integrate_character(c, &level.grid, &params) {
                events.push(Event::Jumped { character: i });
            }
        }

        run_interaction_pass(level, &params, &mut events);

        if !level.is_game_over() {
            for (i, c) in level.characters.iter().enumerate() {
                if c.is_grounded() && !was_grounded[i] {
                    events.push(Event::Landed { character: i });
                }
            }
        }

        self.tick += 1;
        for e in &events {
            log::debug!("tick {}: {:?}", self.tick, e);
        }
        events
    }

    /// Step with separate fire and water inputs.
    pub fn step_pair(&mut self, fire: Buttons, water: Buttons) -> Vec<Event> {
        self.step(&[fire, water])
    }

    pub fn character_state(&self, element: Element) -> Option<CharacterState> {
        self.level.character(element).map(|c| CharacterState {
            x: c.body.position.x,
            y: c.body.position.y,
            vx: c.body.velocity.x,
            vy: c.body.velocity.y,
            grounded: c.body.grounded as u8,
            dead: c.dead as u8,
        })
    }
}

/// Flat character snapshot for hosts.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CharacterState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: u8,
    pub dead: u8,
}
