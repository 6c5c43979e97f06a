use core::fmt;

use crate::band::NUM_LEVELS;
use crate::hysteresis::IndicatorState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    Red,
    Yellow,
    Green,
}

impl Line {
    pub const ALL: [Line; 3] = [Line::Red, Line::Yellow, Line::Green];
}

/// Which of the three lamps are lit. Defaults to dark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputVector {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

impl OutputVector {
    pub const ALL_OFF: Self = Self::new(false, false, false);
    pub const ALL_ON: Self = Self::new(true, true, true);

    pub const fn new(red: bool, yellow: bool, green: bool) -> Self {
        Self { red, yellow, green }
    }

    pub fn level(&self, line: Line) -> bool {
        match line {
            Line::Red => self.red,
            Line::Yellow => self.yellow,
            Line::Green => self.green,
        }
    }

    /// Lines in the order they are written.
    pub fn lines(&self) -> impl Iterator<Item = (Line, bool)> + '_ {
        Line::ALL.into_iter().map(|line| (line, self.level(line)))
    }
}

/// `R`, `Y`, `G` for lit lamps and `.` for dark ones.
impl fmt::Display for OutputVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (line, level) in self.lines() {
            let c = match (line, level) {
                (_, false) => '.',
                (Line::Red, true) => 'R',
                (Line::Yellow, true) => 'Y',
                (Line::Green, true) => 'G',
            };

            fmt::Write::write_char(f, c)?;
        }

        Ok(())
    }
}

/// Red with green is deliberately not "ok". It is the below-range error blend.
const PATTERNS: [OutputVector; NUM_LEVELS] = [
    OutputVector::new(true, false, true),
    OutputVector::new(true, false, false),
    OutputVector::new(true, true, false),
    OutputVector::new(false, true, false),
    OutputVector::new(false, true, true),
    OutputVector::new(false, false, true),
    OutputVector::new(true, true, true),
];

pub fn encode(state: IndicatorState) -> OutputVector {
    PATTERNS[state.index()]
}

#[cfg(test)]
mod tests {
    use super::{Line, OutputVector, encode};
    use crate::hysteresis::IndicatorState;

    fn encode_u8(x: u8) -> (u8, u8, u8) {
        let v = encode(IndicatorState::new(x).unwrap());

        (v.red as u8, v.yellow as u8, v.green as u8)
    }

    #[test]
    fn test_table() {
        assert_eq!(encode_u8(0), (1, 0, 1));
        assert_eq!(encode_u8(1), (1, 0, 0));
        assert_eq!(encode_u8(2), (1, 1, 0));
        assert_eq!(encode_u8(3), (0, 1, 0));
        assert_eq!(encode_u8(4), (0, 1, 1));
        assert_eq!(encode_u8(5), (0, 0, 1));
        assert_eq!(encode_u8(6), (1, 1, 1));
    }

    #[test]
    fn test_write_order() {
        let v = OutputVector::new(true, false, true);

        let lines: Vec<_> = v.lines().collect();

        assert_eq!(
            lines,
            [(Line::Red, true), (Line::Yellow, false), (Line::Green, true)]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(encode(IndicatorState::new(0).unwrap()).to_string(), "R.G");
        assert_eq!(encode(IndicatorState::new(4).unwrap()).to_string(), ".YG");
        assert_eq!(OutputVector::ALL_OFF.to_string(), "...");
    }
}
