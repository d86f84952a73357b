use std::ops::RangeInclusive;

pub const DARTS_PER_TURN: u8 = 3;
pub const MAX_DART_SCORE: u16 = 60;
pub const MAX_TURN_SCORE: u16 = 180;
pub const MAX_CHECKOUT: u16 = 170;

pub const BULL: u8 = 25;

/// Cricket numbers in route order.
pub const CRICKET_NUMBERS: [u8; 7] = [20, 19, 18, 17, 16, 15, BULL];

pub const MARKS_REQUIRED_RANGE: RangeInclusive<u8> = 2..=5;

/// Three darts, each a treble.
pub const MAX_MARKS_PER_TURN: u8 = 9;

/// Position of a cricket number in the mark table.
pub fn cricket_index(number: u8) -> Option<usize> {
    CRICKET_NUMBERS.iter().position(|&n| n == number)
}

/// Highest total `darts` darts can score.
pub fn max_score_for_darts(darts: u8) -> u16 {
    MAX_DART_SCORE * darts as u16
}
