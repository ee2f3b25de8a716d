//! Bike physics
//!
//! Each bike owns its own vertical integration step; horizontal speed is set
//! by player input or a bot controller, and position advances by speed
//! unconditionally while racing.

use crate::consts::{ACCEL, BRAKE, GRAVITY, GROUND_EPSILON, MAX_SPEED, ROLL_DECEL};

use super::ground::{floor_at, height_at};

/// One racing bike, player or bot.
#[derive(Debug, Clone)]
pub struct Bike {
    pub name: String,
    /// Hex color for the render surface
    pub color: &'static str,
    pub is_bot: bool,
    /// World x along the track
    pub x: f32,
    /// Vertical position (the y axis points down)
    pub y: f32,
    /// Vertical velocity
    pub vy: f32,
    /// Horizontal speed, kept within `[0, MAX_SPEED]`
    pub speed: f32,
    /// Player engine switch; bots ignore it
    pub engine_on: bool,
    pub finished: bool,
    /// Set once at the finish line, never overwritten
    pub finish_time: Option<f32>,
    /// Time until the next rock/log bump can register
    pub bump_cooldown: f32,
}

impl Bike {
    /// New bike at the start line, dropped in slightly above the floor.
    pub fn new(name: impl Into<String>, color: &'static str, is_bot: bool) -> Self {
        Self {
            name: name.into(),
            color,
            is_bot,
            x: 0.0,
            y: height_at(0.0) - 40.0,
            vy: 0.0,
            speed: 0.0,
            engine_on: false,
            finished: false,
            finish_time: None,
            bump_cooldown: 0.0,
        }
    }

    /// Grounded test: within a small tolerance of the ground-derived floor.
    pub fn on_ground(&self) -> bool {
        (self.y - floor_at(self.x)).abs() < GROUND_EPSILON
    }

    /// Advance vertical motion by one step, settling on the floor, and run
    /// down the bump cooldown.
    pub fn integrate(&mut self, dt: f32) {
        self.vy += GRAVITY * dt;
        self.y += self.vy * dt;
        let floor = floor_at(self.x);
        if self.y >= floor {
            self.y = floor;
            self.vy = 0.0;
        }
        if self.bump_cooldown > 0.0 {
            self.bump_cooldown = (self.bump_cooldown - dt).max(0.0);
        }
    }

    /// Jump with the given upward impulse. A request while airborne is
    /// dropped, never queued.
    pub fn jump(&mut self, impulse: f32) {
        if self.on_ground() {
            self.vy = impulse;
        }
    }

    /// Player speed control for one frame.
    pub fn update_player_speed(&mut self, throttle: bool, brake: bool, dt: f32) {
        if !self.engine_on {
            self.speed = (self.speed - ROLL_DECEL * dt).max(0.0);
        } else if throttle {
            self.speed = (self.speed + ACCEL * dt).clamp(0.0, MAX_SPEED);
        } else if brake {
            self.speed = (self.speed - BRAKE * dt).clamp(0.0, MAX_SPEED);
        } else {
            self.speed = (self.speed - ROLL_DECEL * dt).clamp(0.0, MAX_SPEED);
        }
    }

    /// Advance along the track.
    pub fn advance(&mut self, dt: f32) {
        self.x += self.speed * dt;
    }

    /// Record the finish time once; later calls leave it untouched.
    pub fn cross_finish(&mut self, elapsed: f32) {
        if !self.finished {
            self.finished = true;
            self.finish_time = Some(elapsed);
        }
    }
}
