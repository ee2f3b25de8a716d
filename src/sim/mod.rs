//! Deterministic race simulation
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Clamped timestep only, driven by the session
//! - Seeded track generation only
//! - No rendering or platform dependencies

pub mod bike;
pub mod bot;
pub mod collision;
pub mod ground;
pub mod race;
pub mod track;

pub use bike::Bike;
pub use bot::BotController;
pub use ground::{floor_at, height_at};
pub use race::{
    FrameSnapshot, PLAYER_NAME, RacePhase, RaceResult, RaceState, TickInput, VehicleView, tick,
};
pub use track::{Obstacle, ObstacleKind, TrackRng, generate_obstacles};
