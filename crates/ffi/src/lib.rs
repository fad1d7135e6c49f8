//! C ABI over `duet_core`. A simulation is an opaque heap pointer created from
//! level JSON and released with `duet_free`.

use std::ffi::{c_char, CStr};

use duet_core::simulation::CharacterState;
use duet_core::{Buttons, Element, Event, Params, Simulation};

/// Per-step event counts.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct StepEvents {
    pub jumped: u8,
    pub landed: u8,
    pub died: u8,
    pub diamonds: u8,
    pub toggled: u8,
    pub completed: u8,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct LevelFlags {
    pub fire_exit_reached: u8,
    pub water_exit_reached: u8,
    pub game_over: u8,
    pub completed: u8,
}

/// # Safety
/// `out` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn duet_default_params(out: *mut Params) {
    if let Some(out) = out.as_mut() {
        *out = Params::default();
    }
}

/// Null when the JSON is unreadable or describes an invalid level.
///
/// # Safety
/// `level_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn duet_create(level_json: *const c_char) -> *mut Simulation {
    if level_json.is_null() {
        return std::ptr::null_mut();
    }
    let Ok(json) = CStr::from_ptr(level_json).to_str() else {
        log::warn!("level json is not utf-8");
        return std::ptr::null_mut();
    };
    match Simulation::from_json(json) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(e) => {
            log::warn!("rejected level: {e}");
            std::ptr::null_mut()
        }
    }
}

/// # Safety
/// `sim` must come from `duet_create` and not be freed yet.
#[no_mangle]
pub unsafe extern "C" fn duet_step(
    sim: *mut Simulation,
    fire_bits: u8,
    water_bits: u8,
) -> StepEvents {
    let mut out = StepEvents::default();
    let Some(sim) = sim.as_mut() else {
        return out;
    };
    let fire = Buttons::from_bits_truncate(fire_bits);
    let water = Buttons::from_bits_truncate(water_bits);
    let events = sim.step_pair(fire, water);
    for e in events {
        let slot = match e {
            Event::Jumped { .. } => &mut out.jumped,
            Event::Landed { .. } => &mut out.landed,
            Event::Died { .. } => &mut out.died,
            Event::DiamondCollected { .. } => &mut out.diamonds,
            Event::LeverToggled { .. } => &mut out.toggled,
            Event::LevelCompleted => &mut out.completed,
            _ => continue,
        };
        *slot = slot.saturating_add(1);
    }
    out
}

/// `element`: 0 = fire, 1 = water. Returns 0 on success, -1 otherwise.
///
/// # Safety
/// `sim` as for `duet_step`; `out` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn duet_character_state(
    sim: *const Simulation,
    element: u8,
    out: *mut CharacterState,
) -> i32 {
    let element = match element {
        0 => Element::Fire,
        1 => Element::Water,
        _ => return -1,
    };
    let (Some(sim), Some(out)) = (sim.as_ref(), out.as_mut()) else {
        return -1;
    };
    match sim.character_state(element) {
        Some(state) => {
            *out = state;
            0
        }
        None => -1,
    }
}

/// # Safety
/// `sim` as for `duet_step`.
#[no_mangle]
pub unsafe extern "C" fn duet_level_flags(sim: *const Simulation) -> LevelFlags {
    let Some(sim) = sim.as_ref() else {
        return LevelFlags::default();
    };
    let level = sim.level();
    LevelFlags {
        fire_exit_reached: level.fire_exit_reached() as u8,
        water_exit_reached: level.water_exit_reached() as u8,
        game_over: level.is_game_over() as u8,
        completed: level.is_level_completed() as u8,
    }
}

/// # Safety
/// `sim` as for `duet_step`.
#[no_mangle]
pub unsafe extern "C" fn duet_score(sim: *const Simulation) -> u8 {
    sim.as_ref().map_or(0, Simulation::score)
}

/// # Safety
/// `sim` must come from `duet_create`; it is invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn duet_free(sim: *mut Simulation) {
    if !sim.is_null() {
        drop(Box::from_raw(sim));
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use duet_core::level::TUTORIAL;

    use super::*;

    #[test]
    fn create_step_read_free() {
        let json = CString::new(TUTORIAL).unwrap();
        unsafe {
            let sim = duet_create(json.as_ptr());
            assert!(!sim.is_null());

            let ev = duet_step(sim, 0, 0);
            assert_eq!(ev.landed, 2);

            let mut state = CharacterState::default();
            assert_eq!(duet_character_state(sim, 0, &mut state), 0);
            assert_eq!(state.grounded, 1);
            assert_eq!(duet_character_state(sim, 9, &mut state), -1);

            let flags = duet_level_flags(sim);
            assert_eq!(flags.game_over, 0);
            assert_eq!(flags.completed, 0);
            assert_eq!(duet_score(sim), 2);

            duet_free(sim);
        }
    }

    #[test]
    fn bad_input_gives_null() {
        let json = CString::new("{\"tiles\": 3}").unwrap();
        unsafe {
            assert!(duet_create(json.as_ptr()).is_null());
            assert!(duet_create(std::ptr::null()).is_null());
            assert_eq!(duet_score(std::ptr::null()), 0);
            assert_eq!(duet_step(std::ptr::null_mut(), 1, 1).jumped, 0);
        }
    }

    #[test]
    fn default_params_match_core() {
        let mut p = Params { move_speed: 9.0, ..Params::default() };
        unsafe { duet_default_params(&mut p) };
        assert_eq!(p, Params::default());
    }
}
