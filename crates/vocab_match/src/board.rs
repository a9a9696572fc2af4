use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::config::TileKind;

/// Fixed vertical lane layout. Lane indices are stable for a whole game;
/// only the clipboard occupying a lane changes.
#[derive(Resource, Debug, Clone)]
pub struct Lanes {
    ys: Vec<f32>,
}

impl Lanes {
    pub fn from_fractions(fractions: &[f32], window_height: f32) -> Self {
        Self {
            ys: fractions
                .iter()
                .map(|fraction| (fraction - 0.5) * window_height)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    pub fn y(&self, lane: usize) -> Option<f32> {
        self.ys.get(lane).copied()
    }

    /// Lane whose center is closest to `y`. Ties resolve to the lowest
    /// lane index because only a strictly smaller distance replaces the
    /// current candidate.
    pub fn closest(&self, y: f32) -> usize {
        let mut closest_lane = 0;
        let mut closest_distance = f32::INFINITY;
        for (lane, lane_y) in self.ys.iter().enumerate() {
            let distance = (lane_y - y).abs();
            if distance < closest_distance {
                closest_lane = lane;
                closest_distance = distance;
            }
        }
        closest_lane
    }
}

/// Which clipboard sits in which lane. `slots[lane]` holds a clipboard
/// index; the mapping stays a bijection because it only ever changes
/// through `swap`, and only when a swap animation completes.
#[derive(Resource, Debug, Clone)]
pub struct LaneBoard {
    slots: Vec<usize>,
}

impl LaneBoard {
    pub fn new(lane_count: usize) -> Self {
        Self {
            slots: (0..lane_count).collect(),
        }
    }

    pub fn clipboard_at(&self, lane: usize) -> Option<usize> {
        self.slots.get(lane).copied()
    }

    pub fn lane_of(&self, clipboard: usize) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == clipboard)
    }

    pub fn swap(&mut self, lane_a: usize, lane_b: usize) {
        if lane_a < self.slots.len() && lane_b < self.slots.len() {
            self.slots.swap(lane_a, lane_b);
        } else {
            warn!("ignoring swap outside the board: {lane_a} <-> {lane_b}");
        }
    }

    /// Kind of the clipboard occupying `lane` right now. Clipboard `i`
    /// carries the `i`-th vocabulary kind, so the arrival check never
    /// needs the entity itself.
    pub fn kind_at(&self, lane: usize) -> Option<TileKind> {
        self.clipboard_at(lane)
            .and_then(|clipboard| TileKind::iter().nth(clipboard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_identity() {
        let board = LaneBoard::new(3);
        for lane in 0..3 {
            assert_eq!(board.clipboard_at(lane), Some(lane));
            assert_eq!(board.lane_of(lane), Some(lane));
        }
        assert_eq!(board.clipboard_at(3), None);
    }

    #[test]
    fn stays_a_bijection_under_swaps() {
        let mut board = LaneBoard::new(3);
        for (lane_a, lane_b) in [(0, 2), (1, 2), (0, 1), (2, 0)] {
            board.swap(lane_a, lane_b);
            let mut seen = [false; 3];
            for lane in 0..3 {
                let clipboard = board.clipboard_at(lane).expect("every lane is occupied");
                assert!(
                    !seen[clipboard],
                    "clipboard {clipboard} occupies two lanes at once"
                );
                seen[clipboard] = true;
            }
        }
    }

    #[test]
    fn out_of_range_swap_changes_nothing() {
        let mut board = LaneBoard::new(3);
        board.swap(0, 3);
        for lane in 0..3 {
            assert_eq!(board.clipboard_at(lane), Some(lane));
        }
    }

    #[test]
    fn match_check_reads_the_occupant_at_arrival_time() {
        let mut board = LaneBoard::new(3);
        // Untouched board: a Pimple tile in lane 1 meets the Pimple
        // clipboard.
        assert_eq!(board.kind_at(1), Some(TileKind::Pimple));

        // The player drags the clipboard from lane 2 down into lane 0
        // while a Lingerie tile is still in flight toward lane 0.
        board.swap(2, 0);
        assert_eq!(board.kind_at(0), Some(TileKind::SanitaryPad));
        assert_ne!(board.kind_at(0), Some(TileKind::Lingerie));
        assert_eq!(board.kind_at(2), Some(TileKind::Lingerie));
    }

    #[test]
    fn closest_lane_minimizes_vertical_distance() {
        let lanes = Lanes::from_fractions(&[0.25, 0.5, 0.75], 640.0);
        assert_eq!(lanes.y(0), Some(-160.0));
        assert_eq!(lanes.y(1), Some(0.0));
        assert_eq!(lanes.y(2), Some(160.0));

        assert_eq!(lanes.closest(-200.0), 0);
        assert_eq!(lanes.closest(10.0), 1);
        assert_eq!(lanes.closest(1000.0), 2);
    }

    #[test]
    fn equidistant_drop_resolves_to_the_lower_lane() {
        let lanes = Lanes::from_fractions(&[0.25, 0.5, 0.75], 640.0);
        // -80.0 sits exactly between lanes 0 and 1.
        assert_eq!(lanes.closest(-80.0), 0);
        assert_eq!(lanes.closest(80.0), 1);
    }

    #[test]
    fn dropping_on_the_own_lane_center_keeps_the_lane() {
        let lanes = Lanes::from_fractions(&[0.173, 0.495, 0.828], 640.0);
        for lane in 0..lanes.len() {
            let y = lanes.y(lane).expect("lane exists");
            assert_eq!(lanes.closest(y), lane);
        }
    }
}
