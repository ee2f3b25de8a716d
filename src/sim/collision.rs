//! Obstacle collision rules
//!
//! Rocks and logs bump a bike that has not cleared their top surface; ramps
//! launch grounded bikes. The same rules apply to the player and every bot.

use crate::consts::JUMP_VY;

use super::bike::Bike;
use super::ground::height_at;
use super::track::{Obstacle, ObstacleKind};

/// Horizontal window around a bike within which obstacles interact.
const HIT_WINDOW: f32 = 30.0;
/// Margin above an obstacle's top surface that still counts as a hit.
const TOP_MARGIN: f32 = 10.0;
/// Extra reach on either side of a ramp's footprint.
const RAMP_MARGIN: f32 = 10.0;
/// Seconds between successive bump penalties for one bike.
const BUMP_COOLDOWN: f32 = 0.6;

/// Resolve obstacle interactions for one bike.
///
/// Bump penalties keep the larger of the multiplicative floor and the flat
/// subtraction, then kick the bike upward and arm the cooldown. Ramp
/// launches have no cooldown and no penalty, but require ground contact.
pub fn resolve_obstacles(bike: &mut Bike, obstacles: &[Obstacle]) {
    for ob in obstacles {
        let dx = ob.x - bike.x;
        if !(-HIT_WINDOW..=HIT_WINDOW).contains(&dx) {
            continue;
        }
        let ground = height_at(ob.x);
        match ob.kind {
            ObstacleKind::Rock { radius } => {
                let top = ground - radius;
                if bike.y >= top - TOP_MARGIN && bike.bump_cooldown <= 0.0 {
                    bike.speed = (bike.speed * 0.6).max(bike.speed - 80.0);
                    bike.vy = -120.0;
                    bike.bump_cooldown = BUMP_COOLDOWN;
                }
            }
            ObstacleKind::Log { height, .. } => {
                let top = ground - height;
                if bike.y >= top - TOP_MARGIN && bike.bump_cooldown <= 0.0 {
                    bike.speed = (bike.speed * 0.7).max(bike.speed - 90.0);
                    bike.vy = -150.0;
                    bike.bump_cooldown = BUMP_COOLDOWN;
                }
            }
            ObstacleKind::Ramp { width, .. } => {
                let mouth_left = ob.x - width / 2.0 - RAMP_MARGIN;
                let mouth_right = ob.x + width / 2.0 + RAMP_MARGIN;
                if (mouth_left..=mouth_right).contains(&bike.x) && bike.on_ground() {
                    bike.vy = JUMP_VY * 0.9;
                }
            }
        }
    }
}
