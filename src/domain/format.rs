//! Output formatters for evaluated results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ZephyrError;

/// How an evaluated result is rendered for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormatterChoice {
    /// Default decimal conversion
    #[default]
    Arithmetic,
    /// Truncated to a 32-bit signed integer, shown as `0x`-prefixed uppercase hex
    Hex,
}

impl FormatterChoice {
    /// All choices in selector order
    pub const ALL: [FormatterChoice; 2] = [FormatterChoice::Arithmetic, FormatterChoice::Hex];

    /// Render a value with this formatter.
    ///
    /// Hex truncates toward zero with a saturating `i32` cast (NaN becomes 0),
    /// then prints the two's-complement bits, so `-1.0` renders as `0xFFFFFFFF`.
    pub fn format(self, value: f64) -> String {
        match self {
            FormatterChoice::Arithmetic => value.to_string(),
            FormatterChoice::Hex => format!("0x{:X}", value as i32),
        }
    }

    /// Cycle to the next choice
    pub fn next(self) -> Self {
        match self {
            FormatterChoice::Arithmetic => FormatterChoice::Hex,
            FormatterChoice::Hex => FormatterChoice::Arithmetic,
        }
    }

    /// Label shown in the selector
    pub fn name(self) -> &'static str {
        match self {
            FormatterChoice::Arithmetic => "ARITHMETIC",
            FormatterChoice::Hex => "HEX",
        }
    }
}

impl fmt::Display for FormatterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatterChoice {
    type Err = ZephyrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ARITHMETIC" => Ok(FormatterChoice::Arithmetic),
            "HEX" => Ok(FormatterChoice::Hex),
            _ => Err(ZephyrError::Config(format!(
                "unknown format '{}' (expected ARITHMETIC or HEX)",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_format() {
        assert_eq!(FormatterChoice::Arithmetic.format(9.0), "9");
        assert_eq!(FormatterChoice::Arithmetic.format(2.5), "2.5");
        assert_eq!(FormatterChoice::Arithmetic.format(-3.0), "-3");
        assert_eq!(FormatterChoice::Arithmetic.format(f64::INFINITY), "inf");
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(FormatterChoice::Hex.format(255.0), "0xFF");
        assert_eq!(FormatterChoice::Hex.format(0.0), "0x0");
        assert_eq!(FormatterChoice::Hex.format(2.5), "0x2");
    }

    #[test]
    fn test_hex_negative_is_twos_complement() {
        assert_eq!(FormatterChoice::Hex.format(-1.0), "0xFFFFFFFF");
        assert_eq!(FormatterChoice::Hex.format(-2.9), "0xFFFFFFFE");
    }

    #[test]
    fn test_hex_saturates_out_of_range() {
        assert_eq!(FormatterChoice::Hex.format(1e12), "0x7FFFFFFF");
        assert_eq!(FormatterChoice::Hex.format(f64::NEG_INFINITY), "0x80000000");
        assert_eq!(FormatterChoice::Hex.format(f64::NAN), "0x0");
    }

    #[test]
    fn test_cycle() {
        assert_eq!(FormatterChoice::Arithmetic.next(), FormatterChoice::Hex);
        assert_eq!(FormatterChoice::Hex.next(), FormatterChoice::Arithmetic);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("HEX".parse::<FormatterChoice>().unwrap(), FormatterChoice::Hex);
        assert_eq!("arithmetic".parse::<FormatterChoice>().unwrap(), FormatterChoice::Arithmetic);
        assert!("octal".parse::<FormatterChoice>().is_err());
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let yaml = serde_yaml::to_string(&FormatterChoice::Hex).unwrap();
        assert_eq!(yaml.trim(), "HEX");
        let parsed: FormatterChoice = serde_yaml::from_str("ARITHMETIC").unwrap();
        assert_eq!(parsed, FormatterChoice::Arithmetic);
    }
}
