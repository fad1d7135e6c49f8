use duet_core::level::TUTORIAL;
use duet_core::{Buttons, Element, Event, Simulation};

fn main() {
    let mut sim = Simulation::from_json(TUTORIAL).expect("bundled level is valid");

    let mut jumped = 0u32;
    let mut landed = 0u32;
    let mut toggles = 0u32;

    // fire walks right over the lever and through the lava;
    // water hops once while heading left
    for tick in 0..1200 {
        let mut fire = Buttons::empty();
        let mut water = Buttons::empty();
        if tick < 1000 {
            fire |= Buttons::RIGHT;
        }
        if tick < 300 {
            water |= Buttons::LEFT;
        }
        if tick == 60 {
            water |= Buttons::JUMP;
        }

        for e in sim.step_pair(fire, water) {
            match e {
                Event::Jumped { .. } => jumped += 1,
                Event::Landed { .. } => landed += 1,
                Event::LeverToggled { .. } => toggles += 1,
                _ => {}
            }
        }
    }

    let f = sim.character_state(Element::Fire).unwrap_or_default();
    let w = sim.character_state(Element::Water).unwrap_or_default();
    println!(
        "{{\"fire\":[{},{}],\"water\":[{},{}],\
         \"jumped\":{},\"landed\":{},\"lever_toggles\":{},\
         \"game_over\":{},\"score\":{}}}",
        f.x,
        f.y,
        w.x,
        w.y,
        jumped,
        landed,
        toggles,
        sim.is_game_over(),
        sim.score()
    );
}
