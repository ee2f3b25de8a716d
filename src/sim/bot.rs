//! Bot driver policy
//!
//! Bots ease toward a cruise speed and hop the first obstacle that shows up
//! in their look-ahead window. No memory between frames.

use crate::consts::{ACCEL, JUMP_VY, ROLL_DECEL};

use super::bike::Bike;
use super::track::{Obstacle, ObstacleKind};

/// Base forward distance a bot scans for obstacles.
const LOOK_AHEAD_BASE: f32 = 140.0;

/// Per-bot driving policy, bound to one bike by the race roster.
#[derive(Debug, Clone)]
pub struct BotController {
    /// Cruise speed the bot eases toward
    pub target_speed: f32,
    /// Widens the look-ahead window so later grid slots react earlier
    pub jump_bias: f32,
}

impl BotController {
    pub fn new(target_speed: f32, jump_bias: f32) -> Self {
        Self {
            target_speed,
            jump_bias,
        }
    }

    /// Drive one bike for one frame: ease toward the cruise speed, react to
    /// the nearest upcoming obstacle, then move and integrate.
    ///
    /// Speed easing is asymmetric: it climbs at 80% throttle strength up to
    /// the target, and sheds speed at 40% rolling deceleration down to 90%
    /// of the target.
    pub fn step(&self, bike: &mut Bike, obstacles: &[Obstacle], dt: f32) {
        if bike.finished {
            return;
        }

        if bike.speed < self.target_speed {
            bike.speed = (bike.speed + ACCEL * 0.8 * dt).min(self.target_speed);
        } else {
            bike.speed = (bike.speed - ROLL_DECEL * 0.4 * dt).max(self.target_speed * 0.9);
        }

        let look = LOOK_AHEAD_BASE + self.jump_bias;
        for ob in obstacles {
            let dx = ob.x - bike.x;
            if dx <= 0.0 {
                continue;
            }
            if dx >= look {
                // Sorted by x; nothing closer remains
                break;
            }
            if bike.on_ground() {
                let impulse = match ob.kind {
                    ObstacleKind::Ramp { .. } => JUMP_VY * 0.95,
                    _ => JUMP_VY * 0.88,
                };
                bike.jump(impulse);
            }
            // Only the nearest upcoming obstacle matters this frame
            break;
        }

        bike.advance(dt);
        bike.integrate(dt);
    }
}
