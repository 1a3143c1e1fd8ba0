//! Fee calculation modes
//!
//! A fee schedule either charges constant amounts (`Fixed`) or a proportion of
//! the transferred amount expressed in basis points (`Ratio`). The numeric
//! values match the `uint8` the deployed FeeManager contract accepts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fee calculation mode of a schedule
///
/// # Examples
///
/// ```rust
/// use fee_manager_rs::FeeType;
///
/// assert_eq!(FeeType::Fixed.as_u8(), 0);
/// assert_eq!(FeeType::Ratio.as_u8(), 1);
/// assert_eq!(FeeType::from_u8(1), Some(FeeType::Ratio));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FeeType {
    /// Constant amounts, independent of the transferred amount
    #[default]
    Fixed = 0,
    /// Basis points of the transferred amount (denominator 10000)
    Ratio = 1,
}

impl FeeType {
    /// Returns the numeric wire value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Attempts to create a FeeType from its wire value
    ///
    /// # Example
    ///
    /// ```rust
    /// use fee_manager_rs::FeeType;
    ///
    /// assert_eq!(FeeType::from_u8(0), Some(FeeType::Fixed));
    /// assert_eq!(FeeType::from_u8(2), None);
    /// ```
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Fixed),
            1 => Some(Self::Ratio),
            _ => None,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Ratio => "ratio",
        }
    }

    #[inline]
    pub const fn is_ratio(self) -> bool {
        matches!(self, Self::Ratio)
    }
}

impl From<FeeType> for u8 {
    #[inline]
    fn from(fee_type: FeeType) -> Self {
        fee_type.as_u8()
    }
}

impl TryFrom<u8> for FeeType {
    type Error = InvalidFeeType;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(InvalidFeeType(value))
    }
}

impl std::str::FromStr for FeeType {
    type Err = InvalidFeeType;

    /// Accepts the mode name or its wire value, as deployment task arguments do.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "0" => Ok(Self::Fixed),
            "ratio" | "1" => Ok(Self::Ratio),
            other => Err(InvalidFeeType(other.parse().unwrap_or(u8::MAX))),
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u8())
    }
}

/// Error returned when a value does not name a fee type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidFeeType(pub u8);

impl fmt::Display for InvalidFeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fee type: {} (expected 0 or 1)", self.0)
    }
}

impl std::error::Error for InvalidFeeType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(u8::from(FeeType::Fixed), 0);
        assert_eq!(u8::from(FeeType::Ratio), 1);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(FeeType::try_from(7).unwrap_err(), InvalidFeeType(7));
    }

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!("fixed".parse::<FeeType>().unwrap(), FeeType::Fixed);
        assert_eq!("RATIO".parse::<FeeType>().unwrap(), FeeType::Ratio);
        assert_eq!(" 1 ".parse::<FeeType>().unwrap(), FeeType::Ratio);
        assert!("percent".parse::<FeeType>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FeeType::Fixed.to_string(), "fixed (0)");
        assert_eq!(FeeType::Ratio.to_string(), "ratio (1)");
    }

    #[test]
    fn test_default_is_fixed() {
        assert_eq!(FeeType::default(), FeeType::Fixed);
        assert!(!FeeType::default().is_ratio());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FeeType::Ratio).unwrap();
        assert_eq!(json, "\"ratio\"");
        let parsed: FeeType = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(parsed, FeeType::Fixed);
    }
}
