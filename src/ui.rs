//! Button layout for the presentation layer
//!
//! The active buttons are a pure function of the current phase: a
//! declarative list of (region, command) pairs the shell hit-tests pointer
//! clicks against. Drawing them is the renderer's problem, not ours.

use glam::Vec2;

use crate::sim::RacePhase;

/// Session-level command a button click resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    Resume,
    Home,
    IncBots,
    DecBots,
    ToggleReducedMotion,
}

/// Axis-aligned screen region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min: Vec2,
    pub max: Vec2,
}

impl Region {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// One clickable button.
#[derive(Debug, Clone)]
pub struct Button {
    pub region: Region,
    pub command: Command,
    pub label: String,
}

impl Button {
    fn new(region: Region, command: Command, label: impl Into<String>) -> Self {
        Self {
            region,
            command,
            label: label.into(),
        }
    }
}

/// Buttons active for the given phase.
pub fn layout(phase: &RacePhase, reduced_motion: bool) -> Vec<Button> {
    match phase {
        RacePhase::Home => {
            // Setup panel at (320, 140)
            let (px, py) = (320.0, 140.0);
            vec![
                Button::new(Region::new(px + 140.0, py + 90.0, 28.0, 28.0), Command::DecBots, "-"),
                Button::new(Region::new(px + 174.0, py + 90.0, 28.0, 28.0), Command::IncBots, "+"),
                Button::new(
                    Region::new(px + 30.0, py + 130.0, 210.0, 34.0),
                    Command::ToggleReducedMotion,
                    if reduced_motion {
                        "Reduced Motion: ON"
                    } else {
                        "Reduced Motion: OFF"
                    },
                ),
                Button::new(
                    Region::new(px + 30.0, py + 180.0, 160.0, 38.0),
                    Command::Start,
                    "Start Race (Enter)",
                ),
            ]
        }
        RacePhase::Pause => vec![Button::new(
            Region::new(450.0, 290.0, 200.0, 34.0),
            Command::Resume,
            "Resume (P)",
        )],
        RacePhase::End { results } => {
            // Buttons sit below the ranked list
            let (px, py) = (260.0, 120.0);
            let below_list = py + 70.0 + 24.0 * results.len() as f32 + 10.0;
            vec![
                Button::new(
                    Region::new(px + 20.0, below_list, 160.0, 36.0),
                    Command::Restart,
                    "Race Again (R)",
                ),
                Button::new(
                    Region::new(px + 200.0, below_list, 120.0, 36.0),
                    Command::Home,
                    "Home",
                ),
            ]
        }
        RacePhase::Grid { .. } | RacePhase::Play => Vec::new(),
    }
}

/// First command whose region contains the click, if any.
pub fn hit_test(buttons: &[Button], p: Vec2) -> Option<Command> {
    buttons.iter().find(|b| b.region.contains(p)).map(|b| b.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RaceResult;

    #[test]
    fn test_region_contains_is_inclusive() {
        let region = Region::new(10.0, 10.0, 20.0, 20.0);
        assert!(region.contains(Vec2::new(10.0, 10.0)));
        assert!(region.contains(Vec2::new(30.0, 30.0)));
        assert!(!region.contains(Vec2::new(30.1, 30.0)));
    }

    #[test]
    fn test_home_layout_commands() {
        let buttons = layout(&RacePhase::Home, true);
        let commands: Vec<Command> = buttons.iter().map(|b| b.command).collect();
        assert_eq!(
            commands,
            [
                Command::DecBots,
                Command::IncBots,
                Command::ToggleReducedMotion,
                Command::Start
            ]
        );
        assert_eq!(buttons[2].label, "Reduced Motion: ON");
    }

    #[test]
    fn test_no_buttons_while_racing() {
        assert!(layout(&RacePhase::Play, false).is_empty());
        assert!(layout(&RacePhase::Grid { countdown: 2.0 }, false).is_empty());
    }

    #[test]
    fn test_hit_test_resolves_the_start_button() {
        let buttons = layout(&RacePhase::Home, false);
        // Center of "Start Race": (320+30, 140+180) + half of (160, 38)
        assert_eq!(hit_test(&buttons, Vec2::new(430.0, 339.0)), Some(Command::Start));
        assert_eq!(hit_test(&buttons, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_end_buttons_track_the_result_count() {
        let results = vec![
            RaceResult {
                name: "You".to_string(),
                time: 10.0,
            };
            4
        ];
        let buttons = layout(&RacePhase::End { results }, false);
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].command, Command::Restart);
        // 120 + 70 + 24 * 4 + 10
        assert_eq!(buttons[0].region.min.y, 296.0);
    }
}
