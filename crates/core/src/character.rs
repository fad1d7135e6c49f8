use glam::Vec2;

use crate::entity::{Body, Element, Movable};
use crate::geometry::{Aabb, HasAabb};
use crate::{Buttons, Controls, Params};

/// Collision extents of a character. The sprite's hair sits above the
/// collision box, so the box top is pushed down by `hair_height`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CharacterShape {
    pub half_width: f32,
    pub half_height: f32,
    pub hair_height: f32,
}

impl CharacterShape {
    pub fn from_params(params: &Params) -> Self {
        Self {
            half_width: params.character_half_width,
            half_height: params.character_half_height,
            hair_height: params.hair_height,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        2.0 * self.half_width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        2.0 * self.half_height - self.hair_height
    }
}

/// A player-controlled body. `body.position` is the sprite center.
#[derive(Clone, Debug)]
pub struct Character {
    pub name: String,
    pub element: Element,
    pub body: Body,
    pub shape: CharacterShape,
    pub can_jump: bool,
    pub dead: bool,
    /// Input sampled by the host for the upcoming tick.
    pub controls: Buttons,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        element: Element,
        center: Vec2,
        shape: CharacterShape,
    ) -> Self {
        Self {
            name: name.into(),
            element,
            body: Body::at(center),
            shape,
            can_jump: true,
            dead: false,
            controls: Buttons::empty(),
        }
    }

    pub fn fire(center: Vec2, params: &Params) -> Self {
        Self::new("FireBoy", Element::Fire, center, CharacterShape::from_params(params))
    }

    pub fn water(center: Vec2, params: &Params) -> Self {
        Self::new("WaterGirl", Element::Water, center, CharacterShape::from_params(params))
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    #[inline]
    pub fn matches(&self, element: Element) -> bool {
        self.element == element
    }
}

impl HasAabb for Character {
    fn aabb(&self) -> Aabb {
        let s = &self.shape;
        let p = self.body.position;
        Aabb::new(
            p.x - s.half_width,
            p.y - s.half_height + s.hair_height,
            s.width(),
            s.height(),
        )
    }
}

impl Movable for Character {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn land(&mut self) {
        self.body.grounded = true;
        self.can_jump = true;
    }
}

impl Controls for Character {
    fn is_moving_left(&self) -> bool {
        self.controls.is_moving_left()
    }

    fn is_moving_right(&self) -> bool {
        self.controls.is_moving_right()
    }

    fn is_jumping(&self) -> bool {
        self.controls.is_jumping()
    }
}
