use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use duet_core::level::TUTORIAL;
use duet_core::{Buttons, Element, LevelDesc, Params, Simulation};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    /// One line per tick.
    Csv,
    /// Final state and event counts.
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "replay", about = "Run a recorded input sequence through a level")]
struct Args {
    /// Replay document: `{ "level"?, "params"?, "inputs": [[fire, water], ...] }`.
    replay: PathBuf,

    /// Level file, used when the replay does not embed one.
    #[arg(long)]
    level: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Deserialize)]
struct Replay {
    #[serde(default)]
    level: Option<LevelDesc>,
    #[serde(default)]
    params: Option<Params>,
    /// Button bits per tick for the fire and water characters.
    inputs: Vec<[u8; 2]>,
}

#[derive(Serialize, Default)]
struct Summary {
    ticks: u64,
    fire: [f32; 2],
    water: [f32; 2],
    events: usize,
    completed: bool,
    game_over: bool,
    score: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let replay: Replay = serde_json::from_str(&fs::read_to_string(&args.replay)?)?;
    let mut desc = match (replay.level, &args.level) {
        (Some(desc), _) => desc,
        (None, Some(path)) => LevelDesc::from_json(&fs::read_to_string(path)?)?,
        (None, None) => LevelDesc::from_json(TUTORIAL)?,
    };
    if replay.params.is_some() {
        desc.params = replay.params;
    }

    let mut sim = Simulation::from_desc(&desc)?;
    log::info!("replaying {} ticks on `{}`", replay.inputs.len(), desc.name);

    let mut events = 0;
    if let Format::Csv = args.format {
        println!(
            "tick,fire_x,fire_y,fire_vx,fire_vy,fire_grounded,\
             water_x,water_y,water_vx,water_vy,water_grounded,events"
        );
    }
    for [fire, water] in &replay.inputs {
        let fire = Buttons::from_bits_truncate(*fire);
        let water = Buttons::from_bits_truncate(*water);
        let ev = sim.step_pair(fire, water);
        events += ev.len();

        if let Format::Csv = args.format {
            let f = sim.character_state(Element::Fire).unwrap_or_default();
            let w = sim.character_state(Element::Water).unwrap_or_default();
            let names: Vec<&str> = ev.iter().map(|e| e.name()).collect();
            println!(
                "{},{},{},{},{},{},{},{},{},{},{},{}",
                sim.tick(),
                f.x,
                f.y,
                f.vx,
                f.vy,
                f.grounded,
                w.x,
                w.y,
                w.vx,
                w.vy,
                w.grounded,
                names.join("|")
            );
        }
    }

    if let Format::Json = args.format {
        let f = sim.character_state(Element::Fire).unwrap_or_default();
        let w = sim.character_state(Element::Water).unwrap_or_default();
        let summary = Summary {
            ticks: sim.tick(),
            fire: [f.x, f.y],
            water: [w.x, w.y],
            events,
            completed: sim.is_level_completed(),
            game_over: sim.is_game_over(),
            score: sim.score(),
        };
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}
