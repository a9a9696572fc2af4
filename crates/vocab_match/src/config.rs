use std::time::Duration;

use bevy::prelude::*;
use strum::{Display, EnumIter};
use thiserror::Error;

/// Vocabulary concepts shared between tiles and clipboards. A tile scores
/// when it reaches a lane whose clipboard carries the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TileKind {
    Lingerie,
    Pimple,
    #[strum(to_string = "Sanitary Pad")]
    SanitaryPad,
}

impl TileKind {
    pub const fn color(self) -> Color {
        match self {
            Self::Lingerie => Color::srgb(0.93, 0.56, 0.71),
            Self::Pimple => Color::srgb(0.86, 0.44, 0.33),
            Self::SanitaryPad => Color::srgb(0.45, 0.76, 0.85),
        }
    }
}

// Lane centers as fractions of the window height, bottom to top.
pub const LANE_FRACTIONS: [f32; 3] = [0.173, 0.495, 0.828];

// Layers (z translation)
pub const CLIPBOARD_LAYER: f32 = 0.2;
pub const CLIPBOARD_DRAG_LAYER: f32 = 0.3;
pub const TILE_LAYER: f32 = 0.4;
pub const UI_LAYER: f32 = 0.5;
pub const END_SCENE_LAYER: f32 = 1.5;

pub const TEXT_COLOR: Color = Color::srgb(0.082, 0.486, 0.506);

/// Pacing constants for one playthrough. The defaults are the shipped
/// game; everything is validated before the round machinery is built.
#[derive(Resource, Clone, Debug)]
pub struct GameConfig {
    /// Rounds before the end screen.
    pub total_rounds: u32,
    /// Tile spawns per round.
    pub tiles_per_round: u32,
    /// Delay between two spawns inside a round.
    pub spawn_interval: Duration,
    /// Time a tile needs to cross its lane.
    pub travel_time: Duration,
    /// Length of the clipboard snap/swap animation.
    pub swap_duration: Duration,
    /// Fade-in of the end screen; the continue button unlocks after it.
    pub end_fade_duration: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: 5,
            tiles_per_round: 2,
            spawn_interval: Duration::from_millis(2500),
            travel_time: Duration::from_secs(12),
            swap_duration: Duration::from_millis(200),
            end_fade_duration: Duration::from_millis(500),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need at least two tile kinds, got {0}")]
    TooFewKinds(usize),
    #[error("need at least two lanes, got {0}")]
    TooFewLanes(usize),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("travel time {travel:?} is shorter than the spawn interval {interval:?}")]
    TravelShorterThanInterval {
        travel: Duration,
        interval: Duration,
    },
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_rounds == 0 {
            return Err(ConfigError::NonPositive("total_rounds"));
        }
        if self.tiles_per_round == 0 {
            return Err(ConfigError::NonPositive("tiles_per_round"));
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::NonPositive("spawn_interval"));
        }
        if self.travel_time.is_zero() {
            return Err(ConfigError::NonPositive("travel_time"));
        }
        if self.swap_duration.is_zero() {
            return Err(ConfigError::NonPositive("swap_duration"));
        }
        if self.end_fade_duration.is_zero() {
            return Err(ConfigError::NonPositive("end_fade_duration"));
        }
        // The round tail is travel_time - spawn_interval and may not be
        // negative.
        if self.travel_time < self.spawn_interval {
            return Err(ConfigError::TravelShorterThanInterval {
                travel: self.travel_time,
                interval: self.spawn_interval,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_counts_and_durations() {
        let config = GameConfig {
            total_rounds: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("total_rounds"))
        );

        let config = GameConfig {
            tiles_per_round: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("tiles_per_round"))
        );

        let config = GameConfig {
            spawn_interval: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("spawn_interval"))
        );

        let config = GameConfig {
            travel_time: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("travel_time"))
        );
    }

    #[test]
    fn rejects_travel_shorter_than_spawn_interval() {
        let config = GameConfig {
            travel_time: Duration::from_secs(1),
            spawn_interval: Duration::from_secs(2),
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TravelShorterThanInterval {
                travel: Duration::from_secs(1),
                interval: Duration::from_secs(2),
            })
        );
    }

    #[test]
    fn long_labels_render_with_spaces() {
        assert_eq!(TileKind::SanitaryPad.to_string(), "Sanitary Pad");
        assert_eq!(TileKind::Pimple.to_string(), "Pimple");
    }
}
