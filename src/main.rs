//! Dirt Dash entry point
//!
//! Initializes logging and runs a headless demo race: the player bike is
//! driven by a simple full-throttle script so the whole stack gets exercised
//! without a window. A graphical shell plugs into `Session` the same way,
//! feeding it real input and drawing from `snapshot()`.

use dirt_dash::consts::FRAME_DT;
use dirt_dash::persistence::JsonFileStore;
use dirt_dash::sim::{RacePhase, TickInput};
use dirt_dash::{Session, format_race_time};

const STATS_FILE: &str = "dirt_dash_stats.json";

fn main() {
    env_logger::init();
    log::info!("Dirt Dash starting");

    let mut session = Session::new(Box::new(JsonFileStore::new(STATS_FILE)));

    session.frame(
        &TickInput {
            start: true,
            ..Default::default()
        },
        FRAME_DT,
    );

    // Full throttle, hopping whatever comes close
    let mut frames = 0u32;
    while !matches!(session.race.phase, RacePhase::End { .. }) && frames < 60 * 120 {
        let jump = session.race.obstacles.iter().any(|ob| {
            let dx = ob.x - session.race.player.x;
            (0.0..60.0).contains(&dx)
        });
        let input = TickInput {
            throttle: true,
            jump,
            ..Default::default()
        };
        session.frame(&input, FRAME_DT);
        frames += 1;
    }

    println!("Race results:");
    if let Some(results) = session.race.results() {
        for (rank, r) in results.iter().enumerate() {
            println!("  {}. {} - {}", rank + 1, r.name, format_race_time(Some(r.time)));
        }
    }
    println!(
        "Races: {}  Wins: {}  Best: {}",
        session.stats.total_races,
        session.stats.wins,
        format_race_time(session.stats.best_time)
    );
}
