//! Scrolling road lines (cosmetic)

use crate::tuning::Tuning;

/// Vertical offsets of the dashed center lines
#[derive(Debug, Clone)]
pub struct RoadLines {
    pub tops: Vec<f32>,
}

impl RoadLines {
    /// Enough lines to cover the play area plus two spares
    pub fn new(tuning: &Tuning) -> Self {
        let spacing = tuning.road_line_spacing;
        let count = (tuning.arena_height / spacing).ceil() as usize + 2;
        Self {
            tops: (0..count).map(|i| i as f32 * spacing).collect(),
        }
    }

    /// Move every line down by `speed`, wrapping lines past the bottom edge
    pub fn scroll(&mut self, speed: f32, tuning: &Tuning) {
        let limit = tuning.arena_height + tuning.road_line_height;
        for top in &mut self.tops {
            let next = *top + speed;
            *top = if next > limit {
                -tuning.road_line_spacing
            } else {
                next
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_covers_arena() {
        let tuning = Tuning::default();
        let lines = RoadLines::new(&tuning);
        assert_eq!(lines.tops.len(), 12);
        assert_eq!(lines.tops[1], 60.0);
    }

    #[test]
    fn test_scroll_moves_and_wraps() {
        let tuning = Tuning::default();
        let mut lines = RoadLines::new(&tuning);
        lines.scroll(5.0, &tuning);
        assert_eq!(lines.tops[0], 5.0);

        lines.tops[0] = tuning.arena_height + tuning.road_line_height;
        lines.scroll(5.0, &tuning);
        assert_eq!(lines.tops[0], -60.0);
    }
}
