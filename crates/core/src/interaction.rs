//! The per-tick interaction pass, run after every character has moved.
//!
//! Order is fixed: hazards, exit doors, diamonds, platforms, levers, buttons.
//! A death ends the pass. Boxes take no part in it.

use crate::character::Character;
use crate::collision::CollisionSide;
use crate::event::Event;
use crate::geometry::HasAabb;
use crate::interactables::{Button, Diamond, ExitDoor, Hazard, Interactable, Lever};
use crate::level::Level;
use crate::platform::{Activator, Platform};
use crate::response::resolve_against_solid;
use crate::tiles::TileGrid;
use crate::Params;

pub fn run_interaction_pass(level: &mut Level, params: &Params, events: &mut Vec<Event>) {
    if apply_hazards(&mut level.characters, &level.hazards, events) {
        level.set_game_over();
        return;
    }

    update_doors(&level.characters, &mut level.doors, events);
    if level.check_completion() {
        events.push(Event::LevelCompleted);
    }

    let collected = collect_diamonds(&level.characters, &level.diamonds, events);
    level.remove_diamonds(&collected);

    resolve_platforms(&mut level.characters, &level.platforms, &level.grid);

    update_levers(
        &level.characters,
        &mut level.levers,
        &mut level.platforms,
        params.lever_debounce_ticks,
        events,
    );
    update_buttons(&level.characters, &mut level.buttons, &mut level.platforms, events);
}

/// Returns whether anybody died.
pub fn apply_hazards(
    characters: &mut [Character],
    hazards: &[Hazard],
    events: &mut Vec<Event>,
) -> bool {
    let mut died = false;
    for (i, c) in characters.iter_mut().enumerate() {
        if c.dead {
            continue;
        }
        if hazards.iter().any(|h| h.interact(c)) {
            events.push(Event::Died { character: i });
            died = true;
        }
    }
    died
}

/// A door is open while a character of its element stands in it.
pub fn update_doors(characters: &[Character], doors: &mut [ExitDoor], events: &mut Vec<Event>) {
    for (i, door) in doors.iter_mut().enumerate() {
        let occupied = characters.iter().any(|c| door.can_interact(c));
        if occupied != door.active {
            door.active = occupied;
            events.push(if occupied {
                Event::DoorOpened { door: i }
            } else {
                Event::DoorClosed { door: i }
            });
        }
    }
}

/// Ids of the diamonds picked up this tick. The caller removes them.
pub fn collect_diamonds(
    characters: &[Character],
    diamonds: &[Diamond],
    events: &mut Vec<Event>,
) -> Vec<u32> {
    let mut collected = Vec::new();
    for d in diamonds {
        if let Some(i) = characters.iter().position(|c| d.can_interact(c)) {
            log::debug!("{} collected diamond {}", characters[i].name, d.id);
            events.push(Event::DiamondCollected { diamond: d.id, character: i });
            collected.push(d.id);
        }
    }
    collected
}

/// Side-snap every character out of the platforms it overlaps. A snap that
/// would leave the character inside solid tiles is undone.
pub fn resolve_platforms(characters: &mut [Character], platforms: &[Platform], grid: &TileGrid) {
    for c in characters.iter_mut() {
        for p in platforms {
            let before = (c.body, c.can_jump);
            let side = resolve_against_solid(c, p);
            if side != CollisionSide::None && grid.overlaps_solid(&c.aabb()) {
                log::trace!("{} kept out of the tiles under {}", c.name, p.name);
                (c.body, c.can_jump) = before;
            }
        }
    }
}

pub fn update_levers(
    characters: &[Character],
    levers: &mut [Lever],
    platforms: &mut [Platform],
    debounce_ticks: u32,
    events: &mut Vec<Event>,
) {
    for (i, lever) in levers.iter_mut().enumerate() {
        lever.timer.advance();

        if characters.iter().any(|c| lever.can_interact(c)) {
            if lever.interact(debounce_ticks) {
                log::debug!("lever {} -> {}", lever.name, lever.activated);
                events.push(Event::LeverToggled { lever: i, on: lever.activated });
            }
        } else {
            lever.release(debounce_ticks);
        }

        for p in platforms.iter_mut() {
            if p.activator == Activator::Lever && p.group == lever.group {
                p.activated = lever.activated;
            }
        }
    }
}

/// Buttons are level triggered: pressed exactly while somebody stands on
/// them. A button platform runs while any button of its group is pressed.
pub fn update_buttons(
    characters: &[Character],
    buttons: &mut [Button],
    platforms: &mut [Platform],
    events: &mut Vec<Event>,
) {
    for (i, button) in buttons.iter_mut().enumerate() {
        let pressed = characters.iter().any(|c| button.can_interact(c));
        if pressed != button.active {
            button.active = pressed;
            events.push(if pressed {
                Event::ButtonPressed { button: i }
            } else {
                Event::ButtonReleased { button: i }
            });
        }
    }

    for p in platforms.iter_mut().filter(|p| p.activator == Activator::Button) {
        p.activated = buttons.iter().any(|b| b.active && b.group == p.group);
    }
}
