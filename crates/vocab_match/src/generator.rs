use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::config::{ConfigError, TileKind};

/// Constrained random stream of (kind, lane) pairs. Neither dimension may
/// repeat its immediately preceding value, so the player never sees the
/// same word or the same lane twice in a row.
#[derive(Resource, Debug)]
pub struct TileGenerator {
    rng: fastrand::Rng,
    kind_count: usize,
    lane_count: usize,
    last_kind: Option<usize>,
    last_lane: Option<usize>,
}

impl TileGenerator {
    pub fn new(lane_count: usize) -> Result<Self, ConfigError> {
        Self::with_rng(lane_count, fastrand::Rng::new())
    }

    pub fn with_seed(lane_count: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(lane_count, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(lane_count: usize, rng: fastrand::Rng) -> Result<Self, ConfigError> {
        // A single-member set could never satisfy the no-repeat rule.
        let kind_count = TileKind::iter().count();
        if kind_count < 2 {
            return Err(ConfigError::TooFewKinds(kind_count));
        }
        if lane_count < 2 {
            return Err(ConfigError::TooFewLanes(lane_count));
        }
        Ok(Self {
            rng,
            kind_count,
            lane_count,
            last_kind: None,
            last_lane: None,
        })
    }

    pub fn next_tile(&mut self) -> (TileKind, usize) {
        let kind_index = Self::draw(&mut self.rng, self.kind_count, &mut self.last_kind);
        let lane = Self::draw(&mut self.rng, self.lane_count, &mut self.last_lane);
        let kind = TileKind::iter()
            .nth(kind_index)
            .expect("kind index is below the iterator length");
        (kind, lane)
    }

    // Rejection-resample until the pick differs from the previous one.
    fn draw(rng: &mut fastrand::Rng, set_size: usize, last: &mut Option<usize>) -> usize {
        let mut pick = rng.usize(..set_size);
        while Some(pick) == *last {
            pick = rng.usize(..set_size);
        }
        *last = Some(pick);
        pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_repeats_kind_or_lane_consecutively() {
        let mut generator = TileGenerator::with_seed(3, 0x0005_EED5).expect("valid sets");
        let mut last: Option<(TileKind, usize)> = None;
        for _ in 0..500 {
            let (kind, lane) = generator.next_tile();
            if let Some((last_kind, last_lane)) = last {
                assert_ne!(kind, last_kind, "kind repeated immediately");
                assert_ne!(lane, last_lane, "lane repeated immediately");
            }
            last = Some((kind, lane));
        }
    }

    #[test]
    fn lanes_stay_inside_the_layout() {
        let mut generator = TileGenerator::with_seed(4, 7).expect("valid sets");
        for _ in 0..200 {
            let (_, lane) = generator.next_tile();
            assert!(lane < 4);
        }
    }

    #[test]
    fn rejects_degenerate_lane_sets() {
        assert_eq!(
            TileGenerator::with_seed(1, 1).err(),
            Some(ConfigError::TooFewLanes(1))
        );
        assert_eq!(
            TileGenerator::with_seed(0, 1).err(),
            Some(ConfigError::TooFewLanes(0))
        );
    }

    #[test]
    fn seeded_streams_are_reproducible() {
        let mut first = TileGenerator::with_seed(3, 42).expect("valid sets");
        let mut second = TileGenerator::with_seed(3, 42).expect("valid sets");
        for _ in 0..50 {
            assert_eq!(first.next_tile(), second.next_tile());
        }
    }
}
