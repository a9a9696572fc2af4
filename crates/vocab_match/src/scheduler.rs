use std::time::Duration;

use bevy::prelude::*;

use crate::config::{ConfigError, GameConfig};

/// What the scheduler wants done at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    SpawnTile,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Spawning,
    RoundTail,
    Finished,
}

/// Drives the round cadence: `tiles_per_round` spawns `spawn_interval`
/// apart, then a tail wait so the round's last tile arrives exactly when
/// the round ends. The wait after the final spawn plus the remaining
/// `travel_time - spawn_interval` tail add up to the full travel time,
/// which also caps how many tiles can be in flight at once.
#[derive(Resource, Debug)]
pub struct RoundScheduler {
    total_rounds: u32,
    tiles_per_round: u32,
    spawn_interval: Duration,
    travel_time: Duration,
    round: u32,
    spawned_this_round: u32,
    phase: Phase,
    until_next: Duration,
}

impl RoundScheduler {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            total_rounds: config.total_rounds,
            tiles_per_round: config.tiles_per_round,
            spawn_interval: config.spawn_interval,
            travel_time: config.travel_time,
            round: 0,
            spawned_this_round: 0,
            phase: Phase::Spawning,
            until_next: Duration::ZERO,
        })
    }

    pub const fn round(&self) -> u32 {
        self.round
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Advance the cadence by `delta` and return every event that became
    /// due, in order. A large delta can cover several events.
    pub fn tick(&mut self, delta: Duration) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();
        let mut budget = delta;
        loop {
            if matches!(self.phase, Phase::Finished) {
                break;
            }
            if budget < self.until_next {
                self.until_next -= budget;
                break;
            }
            budget -= self.until_next;
            self.until_next = Duration::ZERO;

            if matches!(self.phase, Phase::Spawning) {
                events.push(SchedulerEvent::SpawnTile);
                self.spawned_this_round += 1;
                if self.spawned_this_round < self.tiles_per_round {
                    self.until_next = self.spawn_interval;
                } else {
                    self.phase = Phase::RoundTail;
                    self.until_next = self.travel_time;
                }
            } else if self.round + 1 < self.total_rounds {
                self.round += 1;
                self.spawned_this_round = 0;
                self.phase = Phase::Spawning;
            } else {
                self.phase = Phase::Finished;
                events.push(SchedulerEvent::GameOver);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GameConfig {
        GameConfig {
            total_rounds: 5,
            tiles_per_round: 2,
            spawn_interval: Duration::from_millis(2500),
            travel_time: Duration::from_secs(12),
            ..GameConfig::default()
        }
    }

    #[test]
    fn construction_rejects_invalid_configs() {
        let config = GameConfig {
            total_rounds: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            RoundScheduler::new(&config).err(),
            Some(ConfigError::NonPositive("total_rounds"))
        );
    }

    #[test]
    fn emits_the_exact_spawn_cadence() {
        let mut scheduler = RoundScheduler::new(&test_config()).expect("valid config");

        // First spawn of round 0 fires immediately.
        assert_eq!(
            scheduler.tick(Duration::ZERO),
            vec![SchedulerEvent::SpawnTile]
        );
        assert_eq!(scheduler.round(), 0);

        for round in 0u32..5 {
            if round > 0 {
                // Next round's first spawn lands a full travel time after
                // the previous round's last spawn.
                assert_eq!(
                    scheduler.tick(Duration::from_secs(12)),
                    vec![SchedulerEvent::SpawnTile]
                );
                assert_eq!(scheduler.round(), round);
            }
            let second = scheduler.tick(Duration::from_millis(2500));
            assert_eq!(second, vec![SchedulerEvent::SpawnTile]);
        }

        // After the last round's second spawn only the game-over event is
        // left, one travel time later.
        assert_eq!(scheduler.tick(Duration::from_secs(11)), vec![]);
        assert!(!scheduler.is_finished());
        assert_eq!(
            scheduler.tick(Duration::from_secs(1)),
            vec![SchedulerEvent::GameOver]
        );
        assert!(scheduler.is_finished());
    }

    #[test]
    fn five_rounds_of_two_spawn_exactly_ten_tiles() {
        let mut scheduler = RoundScheduler::new(&test_config()).expect("valid config");
        let mut spawns = 0;
        let mut game_overs = 0;
        let step = Duration::from_millis(100);
        for _ in 0..2000 {
            for event in scheduler.tick(step) {
                match event {
                    SchedulerEvent::SpawnTile => spawns += 1,
                    SchedulerEvent::GameOver => {
                        game_overs += 1;
                        assert_eq!(spawns, 10, "game over before all spawns");
                    }
                }
            }
        }
        assert_eq!(spawns, 10);
        assert_eq!(game_overs, 1);
        assert_eq!(scheduler.round(), 4);
    }

    #[test]
    fn one_huge_tick_replays_the_whole_game_in_order() {
        let mut scheduler = RoundScheduler::new(&test_config()).expect("valid config");
        let events = scheduler.tick(Duration::from_secs(1000));
        assert_eq!(events.len(), 11);
        assert_eq!(events.last(), Some(&SchedulerEvent::GameOver));
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, SchedulerEvent::SpawnTile))
                .count(),
            10
        );
    }

    #[test]
    fn stays_silent_after_finishing() {
        let mut scheduler = RoundScheduler::new(&test_config()).expect("valid config");
        scheduler.tick(Duration::from_secs(1000));
        assert!(scheduler.is_finished());
        assert_eq!(scheduler.tick(Duration::from_secs(100)), vec![]);
    }
}
