use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How ties are broken by [`Matrix::round_with`](crate::math::Matrix::round_with).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Banker's rounding: 2.5 -> 2, 3.5 -> 4.
    #[default]
    HalfEven,
    /// 2.5 -> 3, -2.5 -> -3.
    HalfAwayFromZero,
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "half_even" | "even" => Ok(RoundingMode::HalfEven),
            "half_away_from_zero" | "away" => Ok(RoundingMode::HalfAwayFromZero),
            _ => Err(format!(
                "Unknown rounding mode: {}. Expected one of: half_even, half_away_from_zero",
                s
            )),
        }
    }
}

/// Options for the textual dump of a matrix.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormatConfig {
    /// Written between elements of a row.
    pub separator: String,

    /// Fixed number of decimals; `None` prints values with their `Display` form.
    pub precision: Option<usize>,
}

impl FormatConfig {
    pub fn new(separator: &str, precision: Option<usize>) -> Self {
        Self {
            separator: separator.to_string(),
            precision,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            precision: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_mode_from_str() {
        assert_eq!(RoundingMode::from_str("half_even").unwrap(), RoundingMode::HalfEven);
        assert_eq!(
            RoundingMode::from_str("Half-Away-From-Zero").unwrap(),
            RoundingMode::HalfAwayFromZero
        );
        assert!(RoundingMode::from_str("up").is_err());
    }

    #[test]
    fn test_format_config_partial_json() {
        let cfg: FormatConfig = serde_json::from_str(r#"{"precision": 3}"#).unwrap();
        assert_eq!(cfg.separator, " ");
        assert_eq!(cfg.precision, Some(3));
    }
}
