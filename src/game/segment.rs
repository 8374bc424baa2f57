use super::{SEGMENT_COUNT, SEGMENT_SPAN};

/// One of the equal wedges of the wheel, in the wheel's unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
}

impl Segment {
    pub fn new(index: usize) -> Option<Self> {
        (index < SEGMENT_COUNT).then_some(Self { index })
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SEGMENT_COUNT).map(|index| Self { index })
    }

    /// Number printed on the wedge and compared against guesses.
    pub fn number(&self) -> u8 {
        self.index as u8 + 1
    }

    pub fn start_angle(&self) -> f64 {
        self.index as f64 * SEGMENT_SPAN
    }

    pub fn end_angle(&self) -> f64 {
        (self.index + 1) as f64 * SEGMENT_SPAN
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle() + SEGMENT_SPAN / 2.0
    }

    pub fn span(&self) -> f64 {
        SEGMENT_SPAN
    }

    /// Palette slot, cycling when the palette is shorter than the wheel.
    pub fn color_index(&self, palette_len: usize) -> usize {
        self.index % palette_len.max(1)
    }

    pub fn contains(&self, angle: f64) -> bool {
        (self.start_angle()..self.end_angle()).contains(&angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::FULL_TURN;

    #[test]
    fn test_segments_span_is_constant() {
        for segment in Segment::all() {
            assert_eq!(segment.span(), 22.5);
            assert_eq!(segment.end_angle() - segment.start_angle(), 22.5);
        }
    }

    #[test]
    fn test_segments_tile_full_turn() {
        let segments: Vec<_> = Segment::all().collect();
        assert_eq!(segments.len(), SEGMENT_COUNT);
        assert_eq!(segments[0].start_angle(), 0.0);
        assert_eq!(segments[SEGMENT_COUNT - 1].end_angle(), FULL_TURN);

        for pair in segments.windows(2) {
            assert_eq!(pair[0].end_angle(), pair[1].start_angle());
        }

        // every probe angle belongs to exactly one segment
        for tenth in 0..3600 {
            let angle = tenth as f64 / 10.0;
            let owners = segments.iter().filter(|s| s.contains(angle)).count();
            assert_eq!(owners, 1, "angle {angle}");
        }
    }

    #[test]
    fn test_numbers_and_bounds() {
        assert_eq!(Segment::new(0).map(|s| s.number()), Some(1));
        assert_eq!(Segment::new(15).map(|s| s.number()), Some(16));
        assert!(Segment::new(16).is_none());
    }

    #[test]
    fn test_color_index_cycles() {
        let seg = Segment::new(13).unwrap();
        assert_eq!(seg.color_index(16), 13);
        assert_eq!(seg.color_index(5), 3);
        assert_eq!(seg.color_index(0), 0);
    }
}
