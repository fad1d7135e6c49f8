//! Level descriptions (JSON) and the loaded, typed level they build.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::entity::{Crate, Element, SolidObject};
use crate::error::LevelError;
use crate::interactables::{Button, Diamond, ExitDoor, Hazard, InteractableObject, Lever};
use crate::platform::{Activator, Direction, Platform};
use crate::tiles::TileGrid;
use crate::Params;

/// The level shipped with the crate, used by the example and the tests.
pub const TUTORIAL: &str = include_str!("../levels/tutorial.json");

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Finishing later than this costs a point.
    pub fn time_limit_seconds(self) -> f32 {
        match self {
            Difficulty::Easy => 40.0,
            Difficulty::Medium => 35.0,
            Difficulty::Hard => 30.0,
        }
    }
}

fn default_tile_size() -> f32 {
    16.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TilesDesc {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    /// Row-major tile IDs.
    pub data: Vec<u32>,
}

/// One placed object. Boxes give the top-left corner plus size; starts give
/// the character's center.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectDesc {
    Start {
        element: Element,
        x: f32,
        y: f32,
    },
    Hazard {
        #[serde(default)]
        name: String,
        element: Element,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    ExitDoor {
        #[serde(default)]
        name: String,
        element: Element,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Diamond {
        element: Element,
        #[serde(default)]
        special: bool,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Platform {
        #[serde(default)]
        name: String,
        group: String,
        activator: Activator,
        direction: Direction,
        tiles: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Lever {
        #[serde(default)]
        name: String,
        group: String,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Button {
        #[serde(default)]
        name: String,
        group: String,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Box {
        #[serde(default)]
        name: String,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

/// A level as written on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelDesc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub tiles: TilesDesc,
    /// Overrides for any subset of the tunables.
    #[serde(default)]
    pub params: Option<Params>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

impl LevelDesc {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Everything that lives in a level, stored per kind. Characters are always
/// `[fire, water]`.
#[derive(Clone, Debug)]
pub struct Level {
    pub name: String,
    pub difficulty: Difficulty,
    pub grid: TileGrid,
    pub characters: Vec<Character>,
    pub platforms: Vec<Platform>,
    pub crates: Vec<Crate>,
    pub hazards: Vec<Hazard>,
    pub doors: Vec<ExitDoor>,
    pub diamonds: Vec<Diamond>,
    pub levers: Vec<Lever>,
    pub buttons: Vec<Button>,
    total_diamonds: usize,
    game_over: bool,
    completed: bool,
}

impl Level {
    /// An empty level over `grid`, for building by hand.
    pub fn new(name: impl Into<String>, difficulty: Difficulty, grid: TileGrid) -> Self {
        Self {
            name: name.into(),
            difficulty,
            grid,
            characters: Vec::new(),
            platforms: Vec::new(),
            crates: Vec::new(),
            hazards: Vec::new(),
            doors: Vec::new(),
            diamonds: Vec::new(),
            levers: Vec::new(),
            buttons: Vec::new(),
            total_diamonds: 0,
            game_over: false,
            completed: false,
        }
    }

    pub fn from_desc(desc: &LevelDesc, params: &Params) -> Result<Self, LevelError> {
        params.validate()?;
        let t = &desc.tiles;
        let grid = TileGrid::new(t.width, t.height, t.tile_size, t.data.clone())?;
        let tile_size = grid.tile_size();
        let mut level = Level::new(desc.name.clone(), desc.difficulty, grid);

        let mut fire = None;
        let mut water = None;
        let mut next_diamond = 0u32;

        for (i, object) in desc.objects.iter().enumerate() {
            match object {
                ObjectDesc::Start { element, x, y } => {
                    let slot = match element {
                        Element::Fire => &mut fire,
                        Element::Water => &mut water,
                        Element::Mud => return Err(LevelError::UnplayableStart(*element)),
                    };
                    if slot.is_some() {
                        return Err(LevelError::DuplicateStart(*element));
                    }
                    *slot = Some(Vec2::new(*x, *y));
                }
                ObjectDesc::Hazard { name, element, x, y, w, h } => {
                    let name = name_or(name, "hazard", i);
                    let (at, size) = placement(&name, *x, *y, *w, *h)?;
                    let hazard = Hazard::new(name, *element, at, size);
                    level.add_interactable(InteractableObject::Hazard(hazard));
                }
                ObjectDesc::ExitDoor { name, element, x, y, w, h } => {
                    let name = name_or(name, "exit_door", i);
                    let (at, size) = placement(&name, *x, *y, *w, *h)?;
                    let door = ExitDoor::new(name, *element, at, size);
                    level.add_interactable(InteractableObject::ExitDoor(door));
                }
                ObjectDesc::Diamond { element, special, x, y, w, h } => {
                    let (at, size) = placement(&name_or("", "diamond", i), *x, *y, *w, *h)?;
                    let diamond = Diamond::new(next_diamond, *element, *special, at, size);
                    next_diamond += 1;
                    level.add_interactable(InteractableObject::Diamond(diamond));
                }
                ObjectDesc::Platform { name, group, activator, direction, tiles, x, y, w, h } => {
                    let name = name_or(name, "platform", i);
                    let (at, size) = placement(&name, *x, *y, *w, *h)?;
                    let platform = Platform::new(
                        name,
                        group.clone(),
                        *activator,
                        at,
                        size,
                        *direction,
                        *tiles,
                        tile_size,
                    );
                    level.add_solid(SolidObject::Platform(platform));
                }
                ObjectDesc::Lever { name, group, x, y, w, h } => {
                    let name = name_or(name, "lever", i);
                    let (at, size) = placement(&name, *x, *y, *w, *h)?;
                    let lever = Lever::new(name, group.clone(), at, size);
                    level.add_interactable(InteractableObject::Lever(lever));
                }
                ObjectDesc::Button { name, group, x, y, w, h } => {
                    let name = name_or(name, "button", i);
                    let (at, size) = placement(&name, *x, *y, *w, *h)?;
                    let button = Button::new(name, group.clone(), at, size);
                    level.add_interactable(InteractableObject::Button(button));
                }
                ObjectDesc::Box { name, x, y, w, h } => {
                    let name = name_or(name, "box", i);
                    let (at, size) = placement(&name, *x, *y, *w, *h)?;
                    level.add_solid(SolidObject::Crate(Crate::new(name, at, size)));
                }
            }
        }

        let fire = fire.ok_or(LevelError::MissingStart(Element::Fire))?;
        let water = water.ok_or(LevelError::MissingStart(Element::Water))?;
        level.add_solid(SolidObject::Character(Character::fire(fire, params)));
        level.add_solid(SolidObject::Character(Character::water(water, params)));

        log::info!(
            "loaded level `{}`: {}x{} tiles, {} platforms, {} interactables",
            level.name,
            level.grid.width(),
            level.grid.height(),
            level.platforms.len(),
            level.hazards.len()
                + level.doors.len()
                + level.diamonds.len()
                + level.levers.len()
                + level.buttons.len(),
        );
        Ok(level)
    }

    pub fn add_solid(&mut self, solid: SolidObject) {
        match solid {
            SolidObject::Character(c) => self.characters.push(c),
            SolidObject::Platform(p) => self.platforms.push(p),
            SolidObject::Crate(b) => self.crates.push(b),
        }
    }

    pub fn add_interactable(&mut self, object: InteractableObject) {
        match object {
            InteractableObject::Hazard(o) => self.hazards.push(o),
            InteractableObject::ExitDoor(o) => self.doors.push(o),
            InteractableObject::Diamond(o) => {
                self.total_diamonds += 1;
                self.diamonds.push(o);
            }
            InteractableObject::Lever(o) => self.levers.push(o),
            InteractableObject::Button(o) => self.buttons.push(o),
        }
    }

    pub fn character(&self, element: Element) -> Option<&Character> {
        self.characters.iter().find(|c| c.matches(element))
    }

    pub fn fire_exit_reached(&self) -> bool {
        self.exit_reached(Element::Fire)
    }

    pub fn water_exit_reached(&self) -> bool {
        self.exit_reached(Element::Water)
    }

    fn exit_reached(&self, element: Element) -> bool {
        self.doors.iter().any(|d| d.element == element && d.active)
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn is_level_completed(&self) -> bool {
        self.completed
    }

    pub fn set_game_over(&mut self) {
        if !self.game_over {
            log::info!("level `{}` lost", self.name);
        }
        self.game_over = true;
    }

    /// Latches completion once both exits are held at the same time. Returns
    /// true only on the tick it latches.
    pub fn check_completion(&mut self) -> bool {
        if self.completed || !(self.fire_exit_reached() && self.water_exit_reached()) {
            return false;
        }
        self.completed = true;
        log::info!("level `{}` completed", self.name);
        true
    }

    /// Drops collected diamonds by id. Unknown or repeated ids are ignored.
    pub fn remove_diamonds(&mut self, ids: &[u32]) -> usize {
        let before = self.diamonds.len();
        self.diamonds.retain(|d| !ids.contains(&d.id));
        before - self.diamonds.len()
    }

    #[inline]
    pub fn diamonds_remaining(&self) -> usize {
        self.diamonds.len()
    }

    #[inline]
    pub fn total_diamonds(&self) -> usize {
        self.total_diamonds
    }
}

fn name_or(name: &str, kind: &str, index: usize) -> String {
    if name.is_empty() {
        format!("{kind}{index}")
    } else {
        name.to_owned()
    }
}

fn placement(name: &str, x: f32, y: f32, w: f32, h: f32) -> Result<(Vec2, Vec2), LevelError> {
    let finite = x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite();
    if !(w > 0.0 && h > 0.0) || !finite {
        return Err(LevelError::ObjectSize { name: name.to_owned(), w, h });
    }
    Ok((Vec2::new(x, y), Vec2::new(w, h)))
}
