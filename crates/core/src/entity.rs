use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::geometry::{Aabb, HasAabb};
use crate::platform::Platform;

/// Element tag gating doors, diamonds and hazards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    /// No character carries this one; mud hazards kill everybody.
    Mud,
}

impl Element {
    pub fn as_str(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Mud => "mud",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinematic state shared by every solid object.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
}

impl Body {
    pub fn at(position: Vec2) -> Self {
        Self { position, ..Self::default() }
    }
}

/// A solid whose position the resolver may change.
pub trait Movable: HasAabb {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Called when a downward move was stopped by something underneath.
    fn land(&mut self) {
        self.body_mut().grounded = true;
    }
}

/// Static box. Inert: nothing collides with it and it never moves.
#[derive(Clone, Debug)]
pub struct Crate {
    pub name: String,
    pub body: Body,
    pub size: Vec2,
}

impl Crate {
    pub fn new(name: impl Into<String>, top_left: Vec2, size: Vec2) -> Self {
        Self { name: name.into(), body: Body::at(top_left), size }
    }
}

impl HasAabb for Crate {
    fn aabb(&self) -> Aabb {
        Aabb::from_min_size(self.body.position, self.size)
    }
}

impl Movable for Crate {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Every kind of solid a level can hold.
#[derive(Clone, Debug)]
pub enum SolidObject {
    Character(Character),
    Platform(Platform),
    Crate(Crate),
}

impl HasAabb for SolidObject {
    fn aabb(&self) -> Aabb {
        match self {
            SolidObject::Character(c) => c.aabb(),
            SolidObject::Platform(p) => p.aabb(),
            SolidObject::Crate(b) => b.aabb(),
        }
    }
}
