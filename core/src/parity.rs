use crate::error::{KcsError, Result};
use std::fmt;
use std::str::FromStr;

/// Parity mode of a serial character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

impl Parity {
    /// Parity bit to transmit after `byte`, or `None` when the format carries no parity bit
    pub fn bit_for(self, byte: u8) -> Option<bool> {
        match self {
            Parity::None => None,
            mode => Some(compute_parity(byte, mode)),
        }
    }

    /// Number of bit windows the parity bit occupies in a character (0 or 1)
    pub fn bit_count(self) -> usize {
        match self {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Parity::None => 'N',
            Parity::Even => 'E',
            Parity::Odd => 'O',
        }
    }
}

impl TryFrom<char> for Parity {
    type Error = KcsError;

    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Parity::None),
            'E' => Ok(Parity::Even),
            'O' => Ok(Parity::Odd),
            other => Err(KcsError::InvalidFormat(format!(
                "unknown parity '{}', expected N, E or O",
                other
            ))),
        }
    }
}

impl FromStr for Parity {
    type Err = KcsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Parity::try_from(c),
            _ => Err(KcsError::InvalidFormat(format!("invalid parity '{}'", s))),
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parity bit for `byte` under `mode`
///
/// The returned bit, appended to the byte, makes the total number of set bits
/// even for [`Parity::Even`] and odd for [`Parity::Odd`]. All 8 bits of the
/// input are counted. [`Parity::None`] yields `false`.
pub fn compute_parity(byte: u8, mode: Parity) -> bool {
    let odd_ones = byte.count_ones() % 2 == 1;
    match mode {
        Parity::Even => odd_ones,
        Parity::Odd => !odd_ones,
        Parity::None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_parity_two_bits_set() {
        assert!(!compute_parity(0x03, Parity::Even));
    }

    #[test]
    fn test_odd_parity_two_bits_set() {
        assert!(compute_parity(0x03, Parity::Odd));
    }

    #[test]
    fn test_parity_makes_total_count_match_mode() {
        for byte in 0..=255u8 {
            let ones = byte.count_ones() as usize;
            let even = compute_parity(byte, Parity::Even) as usize;
            let odd = compute_parity(byte, Parity::Odd) as usize;
            assert_eq!((ones + even) % 2, 0, "even parity wrong for {:#04x}", byte);
            assert_eq!((ones + odd) % 2, 1, "odd parity wrong for {:#04x}", byte);
        }
    }

    #[test]
    fn test_parity_edge_bytes() {
        assert!(!compute_parity(0x00, Parity::Even));
        assert!(compute_parity(0x00, Parity::Odd));
        assert!(!compute_parity(0xFF, Parity::Even));
        assert!(compute_parity(0x80, Parity::Even));
    }

    #[test]
    fn test_parity_is_pure() {
        for mode in [Parity::Even, Parity::Odd] {
            let first = compute_parity(0x5A, mode);
            for _ in 0..10 {
                assert_eq!(compute_parity(0x5A, mode), first);
            }
        }
    }

    #[test]
    fn test_bit_for_none_has_no_bit() {
        assert_eq!(Parity::None.bit_for(0x01), None);
        assert_eq!(Parity::Even.bit_for(0x01), Some(true));
        assert_eq!(Parity::None.bit_count(), 0);
        assert_eq!(Parity::Odd.bit_count(), 1);
    }

    #[test]
    fn test_parse_parity() {
        assert_eq!("n".parse::<Parity>(), Ok(Parity::None));
        assert_eq!("E".parse::<Parity>(), Ok(Parity::Even));
        assert_eq!("o".parse::<Parity>(), Ok(Parity::Odd));
        assert!("X".parse::<Parity>().is_err());
        assert!("EO".parse::<Parity>().is_err());
        assert_eq!(Parity::Odd.to_string(), "O");
    }
}
