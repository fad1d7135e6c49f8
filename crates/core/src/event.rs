use serde::Serialize;

/// Something the host may want to animate or play a sound for. Indices point
/// into the level's per-kind vectors; characters are `0` (fire) and `1`
/// (water).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Jumped { character: usize },
    Landed { character: usize },
    Died { character: usize },
    DiamondCollected { diamond: u32, character: usize },
    LeverToggled { lever: usize, on: bool },
    DoorOpened { door: usize },
    DoorClosed { door: usize },
    ButtonPressed { button: usize },
    ButtonReleased { button: usize },
    LevelCompleted,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Jumped { .. } => "jumped",
            Event::Landed { .. } => "landed",
            Event::Died { .. } => "died",
            Event::DiamondCollected { .. } => "diamond_collected",
            Event::LeverToggled { .. } => "lever_toggled",
            Event::DoorOpened { .. } => "door_opened",
            Event::DoorClosed { .. } => "door_closed",
            Event::ButtonPressed { .. } => "button_pressed",
            Event::ButtonReleased { .. } => "button_released",
            Event::LevelCompleted => "level_completed",
        }
    }
}
