//! Top-level game session
//!
//! Owns the race state, the persisted stats value and the storage backend.
//! The presentation shell feeds it measured frame deltas, decoded key
//! commands and pointer clicks; everything else happens in here.

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;
use crate::persistence::StatsStore;
use crate::sim::{RacePhase, RaceState, TickInput, tick};
use crate::stats::Stats;
use crate::ui::{self, Button, Command};

pub struct Session {
    pub race: RaceState,
    pub stats: Stats,
    store: Box<dyn StatsStore>,
}

impl Session {
    /// Load stats through the given store and sit on the Home screen.
    pub fn new(store: Box<dyn StatsStore>) -> Self {
        let stats = Stats::load(store.as_ref());
        let mut race = RaceState::new();
        race.set_bot_count(stats.bots);
        Self { race, stats, store }
    }

    /// Advance one frame. `dt` is the measured wall-clock delta; stalls get
    /// clamped so they cannot destabilize the integrator.
    pub fn frame(&mut self, input: &TickInput, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);

        if input.home && self.race.go_home() {
            self.persist_prefs();
        }

        let was_ended = matches!(self.race.phase, RacePhase::End { .. });
        tick(&mut self.race, input, dt);

        if !was_ended {
            if let RacePhase::End { ref results } = self.race.phase {
                self.stats
                    .record_race(results, self.race.player.finish_time);
                self.persist_prefs();
            }
        }
    }

    /// Apply a command resolved from a button click.
    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Start | Command::Restart => self.race.start_race(),
            Command::Resume => {
                if matches!(self.race.phase, RacePhase::Pause) {
                    self.race.phase = RacePhase::Play;
                }
            }
            Command::Home => {
                if self.race.go_home() {
                    self.persist_prefs();
                }
            }
            Command::IncBots => {
                let n = self.race.bot_count() + 1;
                self.race.set_bot_count(n);
                self.persist_prefs();
            }
            Command::DecBots => {
                let n = self.race.bot_count().saturating_sub(1);
                self.race.set_bot_count(n);
                self.persist_prefs();
            }
            Command::ToggleReducedMotion => {
                self.stats.reduced_motion = !self.stats.reduced_motion;
                self.persist_prefs();
            }
        }
    }

    /// Buttons active this frame, for drawing and for `click`.
    pub fn buttons(&self) -> Vec<Button> {
        ui::layout(&self.race.phase, self.stats.reduced_motion)
    }

    /// Resolve a pointer click against the active buttons.
    pub fn click(&mut self, p: Vec2) {
        if let Some(cmd) = ui::hit_test(&self.buttons(), p) {
            self.apply(cmd);
        }
    }

    fn persist_prefs(&mut self) {
        self.stats.bots = self.race.bot_count();
        self.stats.save(self.store.as_ref());
    }
}
