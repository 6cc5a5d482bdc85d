//! Repayment plan configuration.
//!
//! A term list is loaded once, checked once, and never changes while amounts
//! are being estimated. Anything wrong with it is reported here rather than at
//! calculation time.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("term month count must be at least 1")]
    ZeroMonths,

    #[error("term with {months} months: annual rate {rate} is negative")]
    NegativeRate { months: u32, rate: Decimal },

    #[error("term with {months} months: fees {fees} are negative")]
    NegativeFees { months: u32, fees: Decimal },

    #[error("no repayment terms configured")]
    NoTerms,

    #[error("failed to read terms from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse terms: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One repayment plan: how many months, the flat rate charged once on the
/// principal, and a fixed fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTermConfig", into = "RawTermConfig")]
pub struct TermConfig {
    months: u32,
    annual_rate: Decimal,
    fees: Decimal,
    title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTermConfig {
    months: u32,
    annual_rate: Decimal,
    fees: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl TryFrom<RawTermConfig> for TermConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTermConfig) -> Result<Self, Self::Error> {
        let term = TermConfig::new(raw.months, raw.annual_rate, raw.fees)?;
        Ok(match raw.title {
            Some(title) => term.with_title(title),
            None => term,
        })
    }
}

impl From<TermConfig> for RawTermConfig {
    fn from(term: TermConfig) -> Self {
        RawTermConfig {
            months: term.months,
            annual_rate: term.annual_rate,
            fees: term.fees,
            title: term.title,
        }
    }
}

impl TermConfig {
    /// Builds a term, rejecting a zero month count and negative rate or fees.
    pub fn new(months: u32, annual_rate: Decimal, fees: Decimal) -> Result<Self, ConfigError> {
        if months == 0 {
            return Err(ConfigError::ZeroMonths);
        }
        if annual_rate < Decimal::ZERO {
            return Err(ConfigError::NegativeRate { months, rate: annual_rate });
        }
        if fees < Decimal::ZERO {
            return Err(ConfigError::NegativeFees { months, fees });
        }

        Ok(TermConfig {
            months,
            annual_rate,
            fees,
            title: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// Percentage applied once to the principal (e.g. `19` for 19%).
    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn fees(&self) -> Decimal {
        self.fees
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Display label: the configured title, or the month count.
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("{} شهر", self.months),
        }
    }
}

/// The three plans offered by default: 6, 12 and 18 months at 19%, 38% and 57%
/// with a 50 fee each.
pub fn reference_terms() -> Vec<TermConfig> {
    let plan = |months: u32, annual_rate: Decimal, title: &str| TermConfig {
        months,
        annual_rate,
        fees: dec!(50),
        title: Some(title.to_string()),
    };

    vec![
        plan(6, dec!(19), "6 شهور"),
        plan(12, dec!(38), "12 شهر"),
        plan(18, dec!(57), "18 شهر"),
    ]
}

/// Parses an ordered JSON array of terms.
pub fn parse_terms(json: &str) -> Result<Vec<TermConfig>, ConfigError> {
    let terms: Vec<TermConfig> = serde_json::from_str(json)?;
    if terms.is_empty() {
        return Err(ConfigError::NoTerms);
    }
    Ok(terms)
}

/// Reads and parses a term file. See [`parse_terms`].
pub fn load_terms(path: impl AsRef<Path>) -> Result<Vec<TermConfig>, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_terms(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_reference_terms() {
        let terms = reference_terms();
        let shape: Vec<(u32, Decimal, Decimal)> =
            terms.iter().map(|t| (t.months(), t.annual_rate(), t.fees())).collect();
        assert_eq!(
            shape,
            vec![
                (6, dec!(19), dec!(50)),
                (12, dec!(38), dec!(50)),
                (18, dec!(57), dec!(50)),
            ]
        );
        assert_eq!(terms[0].label(), "6 شهور");
    }

    #[test]
    fn test_zero_months_error() {
        let result = TermConfig::new(0, dec!(10), dec!(50));
        assert!(matches!(result, Err(ConfigError::ZeroMonths)));
    }

    #[rstest]
    #[case(dec!(-1), dec!(50))]
    #[case(dec!(10), dec!(-0.01))]
    fn test_negative_values_rejected(#[case] rate: Decimal, #[case] fees: Decimal) {
        assert!(TermConfig::new(12, rate, fees).is_err());
    }

    #[test]
    fn test_zero_rate_and_fees_allowed() {
        let term = TermConfig::new(3, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(term.label(), "3 شهر");
        assert_eq!(term.title(), None);
    }

    #[test]
    fn test_parse_terms_keeps_order() {
        let json = r#"[
            {"months": 24, "annual_rate": 60, "fees": 75},
            {"months": 3, "annual_rate": "9.5", "fees": 0, "title": "3 شهور"}
        ]"#;
        let terms = parse_terms(json).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].months(), 24);
        assert_eq!(terms[1].annual_rate(), dec!(9.5));
        assert_eq!(terms[1].title(), Some("3 شهور"));
    }

    #[rstest]
    #[case(r#"[]"#)]
    #[case(r#"[{"months": 0, "annual_rate": 10, "fees": 50}]"#)]
    #[case(r#"[{"months": 6, "annual_rate": 10}]"#)]
    #[case(r#"not json"#)]
    fn test_parse_terms_rejects_bad_config(#[case] json: &str) {
        assert!(parse_terms(json).is_err());
    }

    #[test]
    fn test_serialize_round_trips_through_validation() {
        let json = serde_json::to_string(&reference_terms()).unwrap();
        assert_eq!(parse_terms(&json).unwrap(), reference_terms());
    }

    #[test]
    fn test_load_terms_missing_file() {
        let result = load_terms("/definitely/not/here/terms.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
