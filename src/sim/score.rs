//! Bounded score counter and its seven-segment glyphs

use serde::{Deserialize, Serialize};

/// Score that only ever counts up, saturating at a cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    value: u8,
    max: u8,
}

impl Score {
    /// `max` is clamped to a single display digit
    pub fn new(max: u8) -> Self {
        Self {
            value: 0,
            max: max.min(9),
        }
    }

    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }

    #[inline]
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Add one point; returns false once the cap is reached
    pub fn increment(&mut self) -> bool {
        if self.value >= self.max {
            return false;
        }
        self.value += 1;
        true
    }

    #[inline]
    pub fn is_maxed(&self) -> bool {
        self.value >= self.max
    }
}

/// Segments of a seven-segment digit
///
/// ```text
///  aaa
/// f   b
///  ggg
/// e   c
///  ddd
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];
}

/// Lit segments (a through g) for each digit
const DIGIT_SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],     // 0
    [false, true, true, false, false, false, false], // 1
    [true, true, false, true, true, false, true],    // 2
    [true, true, true, true, false, false, true],    // 3
    [false, true, true, false, false, true, true],   // 4
    [true, false, true, true, false, true, true],    // 5
    [true, false, true, true, true, true, true],     // 6
    [true, true, true, false, false, false, false],  // 7
    [true, true, true, true, true, true, true],      // 8
    [true, true, true, true, false, true, true],     // 9
];

/// Segment flags for `digit`; anything above 9 shows as 9
pub fn digit_segments(digit: u8) -> [bool; 7] {
    DIGIT_SEGMENTS[digit.min(9) as usize]
}

/// Whether `segment` is lit when showing `digit`
#[inline]
pub fn segment_lit(digit: u8, segment: Segment) -> bool {
    digit_segments(digit)[segment as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_saturates() {
        let mut score = Score::new(9);
        for _ in 0..9 {
            assert!(score.increment());
        }
        assert!(score.is_maxed());
        assert!(!score.increment());
        assert_eq!(score.value(), 9);
    }

    #[test]
    fn test_max_is_single_digit() {
        assert_eq!(Score::new(42).max(), 9);
        assert_eq!(Score::new(3).max(), 3);
    }

    #[test]
    fn test_segment_counts() {
        let lit: Vec<usize> = (0..10)
            .map(|d| digit_segments(d).iter().filter(|&&s| s).count())
            .collect();
        assert_eq!(lit, vec![6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
    }

    #[test]
    fn test_middle_segment() {
        assert!(!segment_lit(0, Segment::G));
        assert!(segment_lit(8, Segment::G));
        assert!(!segment_lit(1, Segment::A));
        assert!(segment_lit(7, Segment::A));
    }
}
