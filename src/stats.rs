//! Persisted aggregate statistics
//!
//! One small JSON record: lifetime race and win counts, best finish time,
//! and the player's menu preferences. Loaded once at startup, written
//! wholesale on every change.

use serde::{Deserialize, Serialize};

use crate::consts::{BOT_COUNT_DEFAULT, BOT_COUNT_MAX};
use crate::persistence::StatsStore;
use crate::sim::{PLAYER_NAME, RaceResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_races: u32,
    pub wins: u32,
    /// Fastest finish in seconds; None until the first finished race
    pub best_time: Option<f32>,
    /// Calmer camera and parallax in the shell
    pub reduced_motion: bool,
    /// Preferred number of AI opponents
    pub bots: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_races: 0,
            wins: 0,
            best_time: None,
            reduced_motion: true,
            bots: BOT_COUNT_DEFAULT,
        }
    }
}

impl Stats {
    /// Load from the store; any failure falls back to defaults.
    pub fn load(store: &dyn StatsStore) -> Self {
        match store.read() {
            Ok(Some(json)) => match serde_json::from_str::<Stats>(&json) {
                Ok(mut stats) => {
                    stats.bots = stats.bots.min(BOT_COUNT_MAX);
                    log::info!(
                        "loaded stats: {} races, {} wins",
                        stats.total_races,
                        stats.wins
                    );
                    stats
                }
                Err(e) => {
                    log::warn!("stats record unreadable, using defaults: {e}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("stats load failed, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Write the record wholesale; failures are logged and dropped.
    pub fn save(&self, store: &dyn StatsStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = store.write(&json) {
                    log::warn!("stats save failed: {e}");
                }
            }
            Err(e) => log::warn!("stats encode failed: {e}"),
        }
    }

    /// Fold one finished race into the record. `player_finish` is the
    /// player's own finish time, None for a did-not-finish.
    pub fn record_race(&mut self, results: &[RaceResult], player_finish: Option<f32>) {
        self.total_races += 1;
        if results.first().is_some_and(|r| r.name == PLAYER_NAME) {
            self.wins += 1;
        }
        if let Some(t) = player_finish {
            if self.best_time.is_none_or(|best| t < best) {
                self.best_time = Some(t);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn results(entries: &[(&str, f32)]) -> Vec<RaceResult> {
        entries
            .iter()
            .map(|&(name, time)| RaceResult {
                name: name.to_string(),
                time,
            })
            .collect()
    }

    #[test]
    fn test_win_requires_rank_zero() {
        let ranked = results(&[("Bot 1", 11.5), ("You", 12.0), ("Bot 2", 13.0)]);
        let mut stats = Stats::default();
        stats.record_race(&ranked, Some(12.0));
        assert_eq!(stats.total_races, 1);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.best_time, Some(12.0));
    }

    #[test]
    fn test_win_counted_at_rank_zero() {
        let ranked = results(&[("You", 10.0), ("Bot 1", 11.0)]);
        let mut stats = Stats::default();
        stats.record_race(&ranked, Some(10.0));
        assert_eq!(stats.wins, 1);
    }

    #[test]
    fn test_best_time_only_improves() {
        let mut stats = Stats {
            best_time: Some(10.0),
            ..Default::default()
        };
        stats.record_race(&results(&[("You", 11.0)]), Some(11.0));
        assert_eq!(stats.best_time, Some(10.0));
        stats.record_race(&results(&[("You", 9.0)]), Some(9.0));
        assert_eq!(stats.best_time, Some(9.0));
    }

    #[test]
    fn test_dnf_never_sets_best_time() {
        let mut stats = Stats::default();
        stats.record_race(&results(&[("Bot 1", 8.0), ("You", 30.0)]), None);
        assert_eq!(stats.best_time, None);
        assert_eq!(stats.total_races, 1);
    }

    #[test]
    fn test_missing_record_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Stats::load(&store), Stats::default());
    }

    #[test]
    fn test_corrupt_record_loads_defaults() {
        let store = MemoryStore::new();
        store.write("{not json").unwrap();
        assert_eq!(Stats::load(&store), Stats::default());
    }

    #[test]
    fn test_out_of_range_bot_count_clamped_on_load() {
        let store = MemoryStore::new();
        Stats {
            bots: 9,
            ..Default::default()
        }
        .save(&store);
        assert_eq!(Stats::load(&store).bots, BOT_COUNT_MAX);
    }

    #[test]
    fn test_round_trip_through_store() {
        let store = MemoryStore::new();
        let stats = Stats {
            total_races: 7,
            wins: 3,
            best_time: Some(42.25),
            reduced_motion: false,
            bots: 4,
        };
        stats.save(&store);
        assert_eq!(Stats::load(&store), stats);
    }
}
