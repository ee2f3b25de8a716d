//! Track generation: deterministic obstacle layout
//!
//! Evenly spaced obstacle slots get perturbed by a small linear congruential
//! generator. Same seed, same track - reproducible races depend on it.

use crate::consts::{OBST_LOGS, OBST_RAMPS, OBST_ROCKS, TRACK_LENGTH};

/// Linear congruential generator with explicit state.
#[derive(Debug, Clone)]
pub struct TrackRng {
    state: u32,
}

impl TrackRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed & 0x7fff_ffff,
        }
    }

    /// Next sample in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        self.state = 1103515245u32
            .wrapping_mul(self.state)
            .wrapping_add(12345)
            & 0x7fff_ffff;
        self.state as f32 / 0x7fff_ffff as f32
    }
}

/// Obstacle shape and dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    Rock { radius: f32 },
    Log { width: f32, height: f32 },
    Ramp { width: f32, height: f32 },
}

/// A track obstacle. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Center position along the track
    pub x: f32,
    pub kind: ObstacleKind,
}

/// Generate the obstacle layout for a seed, sorted ascending by position.
pub fn generate_obstacles(seed: u32) -> Vec<Obstacle> {
    let mut rng = TrackRng::new(seed);
    let mut obstacles = Vec::with_capacity(OBST_ROCKS + OBST_LOGS + OBST_RAMPS);

    for n in 0..OBST_ROCKS {
        let slot = (TRACK_LENGTH - 480.0) * (n as f32 + 1.0) / (OBST_ROCKS as f32 + 1.0);
        let jitter = (rng.next_unit() * 53.0).trunc() - 26.0;
        let radius = 10.0 + ((n * 31) % 7) as f32;
        obstacles.push(Obstacle {
            x: 240.0 + slot + jitter,
            kind: ObstacleKind::Rock { radius },
        });
    }
    for n in 0..OBST_LOGS {
        let slot = (TRACK_LENGTH - 800.0) * (n as f32 + 1.0) / (OBST_LOGS as f32 + 1.0);
        let jitter = (rng.next_unit() * 73.0).trunc() - 36.0;
        let width = 56.0 + ((n * 13) % 16) as f32;
        obstacles.push(Obstacle {
            x: 400.0 + slot + jitter,
            kind: ObstacleKind::Log { width, height: 12.0 },
        });
    }
    for n in 0..OBST_RAMPS {
        let slot = (TRACK_LENGTH - 700.0) * (n as f32 + 1.0) / (OBST_RAMPS as f32 + 1.0);
        let jitter = (rng.next_unit() * 61.0).trunc() - 30.0;
        obstacles.push(Obstacle {
            x: 350.0 + slot + jitter,
            kind: ObstacleKind::Ramp {
                width: 84.0,
                height: 40.0,
            },
        });
    }

    obstacles.sort_by(|a, b| a.x.total_cmp(&b.x));
    obstacles
}
