//! Race flow: the per-frame update loop and phase machine
//!
//! Home → Grid countdown → Play ↔ Pause → End, with finish detection and
//! ranked results. `tick` advances everything by one frame step; the session
//! is responsible for clamping wall-clock deltas before calling in.

use glam::Vec2;

use crate::consts::{BOT_COUNT_DEFAULT, BOT_COUNT_MAX, COUNTDOWN_SECS, JUMP_VY, TRACK_LENGTH, TRACK_SEED};

use super::bike::Bike;
use super::bot::BotController;
use super::collision::resolve_obstacles;
use super::track::{Obstacle, generate_obstacles};

/// The player's entry in rosters and results.
pub const PLAYER_NAME: &str = "You";
const PLAYER_COLOR: &str = "#FFD166";
const BOT_COLORS: [&str; 5] = ["#93C5FD", "#86EFAC", "#FCA5A5", "#F0ABFC", "#FDE68A"];

/// Discrete input commands for a single frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Throttle held
    pub throttle: bool,
    /// Brake held
    pub brake: bool,
    /// Jump pressed this frame
    pub jump: bool,
    /// Engine on/off toggle pressed
    pub toggle_engine: bool,
    /// Pause toggle pressed
    pub toggle_pause: bool,
    /// Start/confirm pressed
    pub start: bool,
    /// Restart pressed
    pub restart: bool,
    /// Back-to-menu pressed
    pub home: bool,
}

/// One ranked finish entry, best time first in the results list.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub name: String,
    pub time: f32,
}

/// Current phase of the session. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum RacePhase {
    /// Menu / race setup
    Home,
    /// Starting grid; simulation holds until the countdown runs out
    Grid { countdown: f32 },
    /// Active racing
    Play,
    /// Simulation suspended; rendering continues off snapshots
    Pause,
    /// Ranked results, ascending by time
    End { results: Vec<RaceResult> },
}

/// Complete race state for one session.
///
/// Owns the vehicles and the obstacle set for the lifetime of one race;
/// both are rebuilt on every race start.
#[derive(Debug, Clone)]
pub struct RaceState {
    pub phase: RacePhase,
    pub player: Bike,
    pub bots: Vec<Bike>,
    controllers: Vec<BotController>,
    pub obstacles: Vec<Obstacle>,
    /// Race clock; accumulates only while in Play
    pub elapsed: f32,
    bot_count: u32,
}

impl RaceState {
    /// Fresh session sitting on the Home screen, with a track to show.
    pub fn new() -> Self {
        Self {
            phase: RacePhase::Home,
            player: Bike::new(PLAYER_NAME, PLAYER_COLOR, false),
            bots: Vec::new(),
            controllers: Vec::new(),
            obstacles: generate_obstacles(TRACK_SEED),
            elapsed: 0.0,
            bot_count: BOT_COUNT_DEFAULT,
        }
    }

    pub fn bot_count(&self) -> u32 {
        self.bot_count
    }

    /// Set the opponent count, clamped to the supported range.
    pub fn set_bot_count(&mut self, n: u32) {
        self.bot_count = n.min(BOT_COUNT_MAX);
    }

    /// Reset vehicles and track, rebuild the bot roster, and enter Grid.
    pub fn start_race(&mut self) {
        self.player = Bike::new(PLAYER_NAME, PLAYER_COLOR, false);
        self.obstacles = generate_obstacles(TRACK_SEED);
        self.bots.clear();
        self.controllers.clear();
        for i in 0..self.bot_count as usize {
            let bike = Bike::new(format!("Bot {}", i + 1), BOT_COLORS[i % BOT_COLORS.len()], true);
            self.bots.push(bike);
            self.controllers
                .push(BotController::new(220.0 + 12.0 * i as f32, 10.0 * i as f32));
        }
        self.elapsed = 0.0;
        self.phase = RacePhase::Grid {
            countdown: COUNTDOWN_SECS,
        };
        log::info!("race started with {} bots", self.bot_count);
    }

    /// Leave for the menu from Pause or End. Returns true when it happened.
    pub fn go_home(&mut self) -> bool {
        if matches!(self.phase, RacePhase::Pause | RacePhase::End { .. }) {
            self.phase = RacePhase::Home;
            true
        } else {
            false
        }
    }

    /// Countdown remaining, when on the grid.
    pub fn countdown_remaining(&self) -> Option<f32> {
        match self.phase {
            RacePhase::Grid { countdown } => Some(countdown),
            _ => None,
        }
    }

    /// Big countdown digit for the grid overlay.
    pub fn countdown_display(&self) -> Option<&'static str> {
        self.countdown_remaining().map(|remaining| {
            if remaining >= 2.0 {
                "3"
            } else if remaining >= 1.0 {
                "2"
            } else {
                "1"
            }
        })
    }

    /// Ranked results, when the race has ended.
    pub fn results(&self) -> Option<&[RaceResult]> {
        match self.phase {
            RacePhase::End { ref results } => Some(results),
            _ => None,
        }
    }

    /// Player's current standing by distance: (1-based rank, field size).
    pub fn player_position(&self) -> (usize, usize) {
        let ahead = self.bots.iter().filter(|b| b.x > self.player.x).count();
        (ahead + 1, self.bots.len() + 1)
    }

    /// Read-only view of this frame for the presentation layer.
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            phase: &self.phase,
            player: VehicleView::of(&self.player),
            bots: self.bots.iter().map(VehicleView::of).collect(),
            obstacles: &self.obstacles,
            elapsed: self.elapsed,
        }
    }

    fn everyone_done(&self) -> bool {
        std::iter::once(&self.player)
            .chain(self.bots.iter())
            .all(|b| b.finished || b.x >= TRACK_LENGTH)
    }

    fn ranked_results(&self) -> Vec<RaceResult> {
        let mut results: Vec<RaceResult> = std::iter::once(&self.player)
            .chain(self.bots.iter())
            .map(|b| RaceResult {
                name: b.name.clone(),
                time: b.finish_time.unwrap_or(self.elapsed),
            })
            .collect();
        results.sort_by(|a, b| a.time.total_cmp(&b.time));
        results
    }
}

impl Default for RaceState {
    fn default() -> Self {
        Self::new()
    }
}

/// One vehicle as the renderer sees it.
#[derive(Debug, Clone)]
pub struct VehicleView<'a> {
    pub pos: Vec2,
    pub name: &'a str,
    pub color: &'a str,
    pub finished: bool,
}

impl<'a> VehicleView<'a> {
    fn of(bike: &'a Bike) -> Self {
        Self {
            pos: Vec2::new(bike.x, bike.y),
            name: &bike.name,
            color: bike.color,
            finished: bike.finished,
        }
    }
}

/// Per-frame snapshot handed to the presentation layer. The core draws
/// nothing; this is the entire render query surface.
#[derive(Debug, Clone)]
pub struct FrameSnapshot<'a> {
    pub phase: &'a RacePhase,
    pub player: VehicleView<'a>,
    pub bots: Vec<VehicleView<'a>>,
    pub obstacles: &'a [Obstacle],
    pub elapsed: f32,
}

/// Advance the session by one frame step.
pub fn tick(state: &mut RaceState, input: &TickInput, dt: f32) {
    if input.toggle_engine
        && matches!(
            state.phase,
            RacePhase::Grid { .. } | RacePhase::Play | RacePhase::Pause
        )
    {
        state.player.engine_on = !state.player.engine_on;
    }

    if input.toggle_pause {
        match state.phase {
            RacePhase::Play => state.phase = RacePhase::Pause,
            RacePhase::Pause => state.phase = RacePhase::Play,
            _ => {}
        }
    }

    if input.start && matches!(state.phase, RacePhase::Home | RacePhase::End { .. }) {
        state.start_race();
        return;
    }
    if input.restart
        && matches!(
            state.phase,
            RacePhase::Play | RacePhase::Pause | RacePhase::End { .. }
        )
    {
        state.start_race();
        return;
    }

    match state.phase {
        RacePhase::Grid { countdown } => {
            let remaining = countdown - dt;
            if remaining <= 0.0 {
                // Riders may not launch with a dead engine
                state.player.engine_on = true;
                state.phase = RacePhase::Play;
                log::info!("grid clear, racing");
            } else {
                state.phase = RacePhase::Grid {
                    countdown: remaining,
                };
            }
        }
        RacePhase::Play => update_play(state, input, dt),
        _ => {}
    }
}

/// One frame of active racing: player input and physics, bots, collisions,
/// finish detection, then the race clock.
fn update_play(state: &mut RaceState, input: &TickInput, dt: f32) {
    if input.jump {
        state.player.jump(JUMP_VY);
    }

    state.player.update_player_speed(input.throttle, input.brake, dt);
    state.player.advance(dt);
    state.player.integrate(dt);

    for (bike, ctrl) in state.bots.iter_mut().zip(state.controllers.iter()) {
        ctrl.step(bike, &state.obstacles, dt);
    }

    resolve_obstacles(&mut state.player, &state.obstacles);
    for bike in &mut state.bots {
        resolve_obstacles(bike, &state.obstacles);
    }

    let elapsed = state.elapsed;
    for bike in std::iter::once(&mut state.player).chain(state.bots.iter_mut()) {
        if !bike.finished && bike.x >= TRACK_LENGTH {
            bike.cross_finish(elapsed);
        }
    }

    if state.everyone_done() {
        let results = state.ranked_results();
        log::info!(
            "race over: {} finishers in {:.2}s",
            results.len(),
            state.elapsed
        );
        state.phase = RacePhase::End { results };
    }

    state.elapsed += dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;

    fn race_in_play(bot_count: u32) -> RaceState {
        let mut state = RaceState::new();
        state.set_bot_count(bot_count);
        state.start_race();
        let input = TickInput::default();
        while matches!(state.phase, RacePhase::Grid { .. }) {
            tick(&mut state, &input, FRAME_DT);
        }
        state
    }

    #[test]
    fn test_bot_count_clamped() {
        let mut state = RaceState::new();
        state.set_bot_count(99);
        assert_eq!(state.bot_count(), 5);
        state.start_race();
        assert_eq!(state.bots.len(), 5);
    }

    #[test]
    fn test_countdown_releases_the_grid_once() {
        let mut state = RaceState::new();
        state.set_bot_count(3);
        state.start_race();
        assert!(matches!(state.phase, RacePhase::Grid { .. }));
        assert!(!state.player.engine_on);
        assert_eq!(state.bots.len(), 3);

        let input = TickInput::default();
        let mut transitions = 0;
        let mut in_grid = true;
        for _ in 0..240 {
            tick(&mut state, &input, FRAME_DT);
            let grid_now = matches!(state.phase, RacePhase::Grid { .. });
            if in_grid && !grid_now {
                transitions += 1;
            }
            in_grid = grid_now;
        }
        assert_eq!(transitions, 1);
        assert!(matches!(state.phase, RacePhase::Play));
        assert!(state.player.engine_on);
    }

    #[test]
    fn test_pause_freezes_the_clock_and_the_field() {
        let mut state = race_in_play(1);
        let throttle = TickInput {
            throttle: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &throttle, FRAME_DT);
        }
        let elapsed = state.elapsed;
        let player_x = state.player.x;
        let bot_x = state.bots[0].x;
        assert!(player_x > 0.0);

        let pause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_DT);
        assert!(matches!(state.phase, RacePhase::Pause));
        for _ in 0..30 {
            tick(&mut state, &throttle, FRAME_DT);
        }
        assert_eq!(state.elapsed, elapsed);
        assert_eq!(state.player.x, player_x);
        assert_eq!(state.bots[0].x, bot_x);

        tick(&mut state, &pause, FRAME_DT);
        assert!(matches!(state.phase, RacePhase::Play));
    }

    #[test]
    fn test_toggle_engine_is_inert_on_home() {
        let mut state = RaceState::new();
        let input = TickInput {
            toggle_engine: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert!(matches!(state.phase, RacePhase::Home));
        assert!(!state.player.engine_on);
    }

    #[test]
    fn test_finish_crossing_records_time_once() {
        let mut state = race_in_play(0);
        state.player.x = TRACK_LENGTH - 0.001;
        state.player.speed = 100.0;
        let elapsed_before = state.elapsed;

        tick(&mut state, &TickInput::default(), 0.1);
        assert!(state.player.finished);
        assert_eq!(state.player.finish_time, Some(elapsed_before));
        // Sole entrant, so the race is over and the player took the win
        match state.phase {
            RacePhase::End { ref results } => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].name, PLAYER_NAME);
                assert_eq!(results[0].time, elapsed_before);
            }
            ref other => panic!("expected End, got {:?}", other),
        }
    }

    #[test]
    fn test_finish_time_immutable_while_race_continues() {
        let mut state = race_in_play(1);
        state.player.x = TRACK_LENGTH - 0.001;
        state.player.speed = 100.0;
        let throttle = TickInput {
            throttle: true,
            ..Default::default()
        };
        tick(&mut state, &throttle, FRAME_DT);
        assert!(state.player.finished);
        let recorded = state.player.finish_time;
        let x_at_finish = state.player.x;
        assert!(matches!(state.phase, RacePhase::Play));

        for _ in 0..30 {
            tick(&mut state, &throttle, FRAME_DT);
        }
        assert_eq!(state.player.finish_time, recorded);
        assert!(state.player.x > x_at_finish);
    }

    #[test]
    fn test_ranking_sorts_ascending_with_dnf_at_elapsed() {
        let mut state = race_in_play(2);
        state.player.cross_finish(12.0);
        state.bots[0].cross_finish(11.5);
        state.bots[1].cross_finish(13.0);
        let ranked = state.ranked_results();
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Bot 1", "You", "Bot 2"]);

        // An unfinished entity scores at the current race clock
        let mut state = race_in_play(1);
        state.elapsed = 20.0;
        state.player.cross_finish(15.0);
        let ranked = state.ranked_results();
        assert_eq!(ranked[1].name, "Bot 1");
        assert_eq!(ranked[1].time, 20.0);
    }

    #[test]
    fn test_restart_from_end_rebuilds_the_field() {
        let mut state = race_in_play(0);
        state.player.x = TRACK_LENGTH + 1.0;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert!(matches!(state.phase, RacePhase::End { .. }));

        state.set_bot_count(2);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, FRAME_DT);
        assert!(matches!(state.phase, RacePhase::Grid { .. }));
        assert_eq!(state.bots.len(), 2);
        assert_eq!(state.player.x, 0.0);
        assert_eq!(state.elapsed, 0.0);
        assert!(!state.player.finished);
    }

    #[test]
    fn test_home_only_from_pause_or_end() {
        let mut state = race_in_play(0);
        assert!(!state.go_home());
        assert!(matches!(state.phase, RacePhase::Play));

        tick(
            &mut state,
            &TickInput {
                toggle_pause: true,
                ..Default::default()
            },
            FRAME_DT,
        );
        assert!(state.go_home());
        assert!(matches!(state.phase, RacePhase::Home));
    }

    #[test]
    fn test_countdown_display_steps_down() {
        let mut state = RaceState::new();
        state.start_race();
        assert_eq!(state.countdown_display(), Some("3"));
        let input = TickInput::default();
        for _ in 0..100 {
            tick(&mut state, &input, FRAME_DT);
        }
        assert_eq!(state.countdown_display(), Some("2"));
        assert!(matches!(state.phase, RacePhase::Grid { .. }));
    }

    #[test]
    fn test_player_position_counts_bots_ahead() {
        let mut state = race_in_play(3);
        state.player.x = 100.0;
        state.bots[0].x = 50.0;
        state.bots[1].x = 150.0;
        state.bots[2].x = 100.0;
        assert_eq!(state.player_position(), (2, 4));
    }

    #[test]
    fn test_snapshot_mirrors_the_field() {
        let state = race_in_play(2);
        let snap = state.snapshot();
        assert_eq!(snap.bots.len(), 2);
        assert_eq!(snap.player.name, PLAYER_NAME);
        assert_eq!(snap.obstacles.len(), state.obstacles.len());
        assert!(matches!(*snap.phase, RacePhase::Play));
    }
}
