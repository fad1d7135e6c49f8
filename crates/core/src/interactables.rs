//! Non-solid level objects that react to characters overlapping them.

use glam::Vec2;

use crate::character::Character;
use crate::entity::Element;
use crate::geometry::{Aabb, HasAabb};

/// Shared overlap-driven capability of every interactable.
pub trait Interactable: HasAabb {
    /// Strict overlap with the character's collision box.
    fn in_range(&self, c: &Character) -> bool {
        self.aabb().intersects(&c.aabb())
    }

    /// Whether this character may trigger the object right now.
    fn can_interact(&self, c: &Character) -> bool;
}

/// Lava, water or mud. Kills characters of any other element.
#[derive(Clone, Debug)]
pub struct Hazard {
    pub name: String,
    pub element: Element,
    pub bounds: Aabb,
}

impl Hazard {
    pub fn new(name: impl Into<String>, element: Element, top_left: Vec2, size: Vec2) -> Self {
        Self { name: name.into(), element, bounds: Aabb::from_min_size(top_left, size) }
    }

    /// Overlapping a character of another element.
    pub fn is_lethal_to(&self, c: &Character) -> bool {
        !c.matches(self.element) && self.in_range(c)
    }

    /// Returns whether the character died.
    pub fn interact(&self, c: &mut Character) -> bool {
        if !self.is_lethal_to(c) {
            return false;
        }
        c.dead = true;
        log::debug!("{} died in {} ({})", c.name, self.name, self.element);
        true
    }
}

impl HasAabb for Hazard {
    fn aabb(&self) -> Aabb {
        self.bounds
    }
}

/// Only its own element may wade through a hazard.
impl Interactable for Hazard {
    fn can_interact(&self, c: &Character) -> bool {
        c.matches(self.element) && self.in_range(c)
    }
}

#[derive(Clone, Debug)]
pub struct ExitDoor {
    pub name: String,
    pub element: Element,
    pub bounds: Aabb,
    pub active: bool,
}

impl ExitDoor {
    pub fn new(name: impl Into<String>, element: Element, top_left: Vec2, size: Vec2) -> Self {
        let bounds = Aabb::from_min_size(top_left, size);
        Self { name: name.into(), element, bounds, active: false }
    }
}

impl HasAabb for ExitDoor {
    fn aabb(&self) -> Aabb {
        self.bounds
    }
}

impl Interactable for ExitDoor {
    fn can_interact(&self, c: &Character) -> bool {
        c.matches(self.element) && self.in_range(c)
    }
}

#[derive(Clone, Debug)]
pub struct Diamond {
    /// Stable across removals, unlike the index.
    pub id: u32,
    pub element: Element,
    /// Anyone may collect a special diamond.
    pub special: bool,
    pub bounds: Aabb,
}

impl Diamond {
    pub fn new(id: u32, element: Element, special: bool, top_left: Vec2, size: Vec2) -> Self {
        Self { id, element, special, bounds: Aabb::from_min_size(top_left, size) }
    }
}

impl HasAabb for Diamond {
    fn aabb(&self) -> Aabb {
        self.bounds
    }
}

impl Interactable for Diamond {
    fn can_interact(&self, c: &Character) -> bool {
        (self.special || c.matches(self.element)) && self.in_range(c)
    }
}

/// Tick counter started by a lever toggle. Counts up by one per tick while
/// running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DebounceTimer {
    started: bool,
    ticks: u32,
}

impl DebounceTimer {
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn start(&mut self) {
        self.started = true;
        self.ticks = 0;
    }

    pub fn stop(&mut self) {
        self.started = false;
        self.ticks = 0;
    }

    pub fn advance(&mut self) {
        if self.started {
            self.ticks = self.ticks.saturating_add(1);
        }
    }

    #[inline]
    pub fn has_reached(&self, threshold: u32) -> bool {
        self.started && self.ticks >= threshold
    }
}

#[derive(Clone, Debug)]
pub struct Lever {
    pub name: String,
    pub group: String,
    pub bounds: Aabb,
    pub activated: bool,
    pub timer: DebounceTimer,
}

impl Lever {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        top_left: Vec2,
        size: Vec2,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            bounds: Aabb::from_min_size(top_left, size),
            activated: false,
            timer: DebounceTimer::default(),
        }
    }

    /// A touch. Toggles when the timer is fresh or has run for `threshold`
    /// ticks; returns whether it toggled.
    pub fn interact(&mut self, threshold: u32) -> bool {
        if self.timer.is_started() && !self.timer.has_reached(threshold) {
            return false;
        }
        self.timer.start();
        self.activated = !self.activated;
        true
    }

    /// Nobody in range: once the timer has run past `threshold` it is stopped,
    /// so the next touch toggles immediately.
    pub fn release(&mut self, threshold: u32) {
        if self.timer.is_started() && self.timer.ticks() > threshold {
            self.timer.stop();
        }
    }
}

impl HasAabb for Lever {
    fn aabb(&self) -> Aabb {
        self.bounds
    }
}

impl Interactable for Lever {
    fn can_interact(&self, c: &Character) -> bool {
        self.in_range(c)
    }
}

#[derive(Clone, Debug)]
pub struct Button {
    pub name: String,
    pub group: String,
    pub bounds: Aabb,
    pub active: bool,
}

impl Button {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        top_left: Vec2,
        size: Vec2,
    ) -> Self {
        let bounds = Aabb::from_min_size(top_left, size);
        Self { name: name.into(), group: group.into(), bounds, active: false }
    }
}

impl HasAabb for Button {
    fn aabb(&self) -> Aabb {
        self.bounds
    }
}

impl Interactable for Button {
    fn can_interact(&self, c: &Character) -> bool {
        self.in_range(c)
    }
}

/// Every kind of interactable a level can hold.
#[derive(Clone, Debug)]
pub enum InteractableObject {
    Hazard(Hazard),
    ExitDoor(ExitDoor),
    Diamond(Diamond),
    Lever(Lever),
    Button(Button),
}

impl HasAabb for InteractableObject {
    fn aabb(&self) -> Aabb {
        match self {
            InteractableObject::Hazard(o) => o.aabb(),
            InteractableObject::ExitDoor(o) => o.aabb(),
            InteractableObject::Diamond(o) => o.aabb(),
            InteractableObject::Lever(o) => o.aabb(),
            InteractableObject::Button(o) => o.aabb(),
        }
    }
}

impl Interactable for InteractableObject {
    fn can_interact(&self, c: &Character) -> bool {
        match self {
            InteractableObject::Hazard(o) => o.can_interact(c),
            InteractableObject::ExitDoor(o) => o.can_interact(c),
            InteractableObject::Diamond(o) => o.can_interact(c),
            InteractableObject::Lever(o) => o.can_interact(c),
            InteractableObject::Button(o) => o.can_interact(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Params;

    fn fire_at(x: f32, y: f32) -> Character {
        Character::fire(Vec2::new(x, y), &Params::default())
    }

    fn water_at(x: f32, y: f32) -> Character {
        Character::water(Vec2::new(x, y), &Params::default())
    }

    #[test]
    fn hazards_kill_other_elements() {
        // fire box 33..47 x 42..62 sits inside both pools
        let (at, size) = (Vec2::new(30.0, 40.0), Vec2::new(30.0, 30.0));
        let water = Hazard::new("pool", Element::Water, at, size);
        let lava = Hazard::new("lava", Element::Fire, at, size);
        let mud = Hazard::new("mud", Element::Mud, at, size);

        let mut fire = fire_at(40.0, 50.0);
        assert!(!lava.interact(&mut fire));
        assert!(!fire.dead);
        assert!(water.interact(&mut fire));
        assert!(fire.dead);

        let mut w = water_at(40.0, 50.0);
        assert!(!water.interact(&mut w));
        assert!(mud.interact(&mut w));
        assert!(w.dead);
    }

    #[test]
    fn own_element_wades_through_without_dying() {
        let lava = Hazard::new("lava", Element::Fire, Vec2::new(30.0, 40.0), Vec2::new(30.0, 30.0));
        let fire = fire_at(40.0, 50.0);
        let water = water_at(40.0, 50.0);

        assert!(lava.can_interact(&fire));
        assert!(!lava.is_lethal_to(&fire));
        assert!(!lava.can_interact(&water));
        assert!(lava.is_lethal_to(&water));

        let wrapped = InteractableObject::Hazard(lava);
        assert!(wrapped.can_interact(&fire));
        assert!(!wrapped.can_interact(&water));

        let far = fire_at(400.0, 50.0);
        assert!(!wrapped.can_interact(&far));
    }

    #[test]
    fn hazard_needs_strict_overlap() {
        // character box bottom at 62, pool top at 62
        let (at, size) = (Vec2::new(0.0, 62.0), Vec2::new(100.0, 10.0));
        let pool = Hazard::new("pool", Element::Water, at, size);
        let mut fire = fire_at(40.0, 50.0);
        assert!(!pool.in_range(&fire));
        assert!(!pool.interact(&mut fire));
        assert!(!fire.dead);
    }

    #[test]
    fn doors_and_diamonds_check_element() {
        let (at, size) = (Vec2::new(30.0, 40.0), Vec2::new(20.0, 30.0));
        let door = ExitDoor::new("fire door", Element::Fire, at, size);
        assert!(door.can_interact(&fire_at(40.0, 50.0)));
        assert!(!door.can_interact(&water_at(40.0, 50.0)));
        assert!(!door.can_interact(&fire_at(400.0, 50.0)));

        let (at, size) = (Vec2::new(35.0, 45.0), Vec2::new(8.0, 8.0));
        let blue = Diamond::new(0, Element::Water, false, at, size);
        assert!(!blue.can_interact(&fire_at(40.0, 50.0)));
        assert!(blue.can_interact(&water_at(40.0, 50.0)));

        let special = Diamond::new(1, Element::Water, true, at, size);
        assert!(special.can_interact(&fire_at(40.0, 50.0)));

        let wrapped = InteractableObject::Diamond(special);
        assert!(wrapped.can_interact(&fire_at(40.0, 50.0)));
        assert_eq!(wrapped.aabb(), Aabb::new(35.0, 45.0, 8.0, 8.0));
    }

    #[test]
    fn lever_debounces_by_ticks() {
        let threshold = Params::default().lever_debounce_ticks;
        let mut lever = Lever::new("l", "g", Vec2::ZERO, Vec2::new(16.0, 16.0));

        assert!(lever.interact(threshold));
        assert!(lever.activated);
        assert!(lever.timer.is_started());

        for _ in 0..threshold - 1 {
            lever.timer.advance();
            assert!(!lever.interact(threshold));
        }
        assert!(lever.activated);
        assert_eq!(lever.timer.ticks(), threshold - 1);

        lever.timer.advance();
        assert!(lever.interact(threshold));
        assert!(!lever.activated);
        assert_eq!(lever.timer.ticks(), 0);
    }

    #[test]
    fn released_lever_rearms_after_threshold() {
        let mut lever = Lever::new("l", "g", Vec2::ZERO, Vec2::new(16.0, 16.0));
        assert!(lever.interact(5));

        for _ in 0..5 {
            lever.timer.advance();
            lever.release(5);
        }
        // exactly at the threshold the timer keeps running
        assert!(lever.timer.is_started());

        lever.timer.advance();
        lever.release(5);
        assert!(!lever.timer.is_started());

        assert!(lever.interact(5));
        assert!(!lever.activated);
    }

    #[test]
    fn stopped_timer_does_not_count() {
        let mut t = DebounceTimer::default();
        t.advance();
        assert_eq!(t.ticks(), 0);
        assert!(!t.has_reached(0));
        t.start();
        t.advance();
        t.advance();
        assert!(t.has_reached(2));
    }
}
