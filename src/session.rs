use log::{info, warn};
use serde::Serialize;

use crate::calculator::{RepaymentBreakdown, compute_all};
use crate::storage::AmountStore;
use crate::terms::TermConfig;
use crate::validation::{ValidationResult, is_numeric, validate};

/// Result of one amount change: the validation outcome and, when valid, the
/// breakdown for every configured term.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub validation: ValidationResult,
    pub breakdowns: Vec<RepaymentBreakdown>,
}

impl Estimate {
    pub fn is_valid(&self) -> bool {
        self.validation.is_ok()
    }
}

#[derive(Serialize)]
struct EstimateReport<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    breakdowns: &'a [RepaymentBreakdown],
}

impl Serialize for Estimate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (error, message) = match &self.validation {
            Ok(_) => (None, None),
            Err(reason) => (Some(reason.code()), Some(reason.to_string())),
        };
        EstimateReport {
            valid: self.is_valid(),
            error,
            message,
            breakdowns: &self.breakdowns,
        }
        .serialize(serializer)
    }
}

/// Ties validation, calculation and the remembered amount together.
///
/// Each call is one synchronous validate, compute, persist cycle.
pub struct Estimator<S: AmountStore> {
    terms: Vec<TermConfig>,
    store: S,
}

impl<S: AmountStore> Estimator<S> {
    pub fn new(terms: Vec<TermConfig>, store: S) -> Self {
        Estimator { terms, store }
    }

    pub fn terms(&self) -> &[TermConfig] {
        &self.terms
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates `raw` and, if it is an acceptable amount, computes every term
    /// and remembers the input. Rejected input leaves the stored value alone.
    pub fn on_amount_changed(&mut self, raw: &str) -> Estimate {
        let validation = validate(raw);
        let breakdowns = match validation {
            Ok(principal) => {
                self.remember(raw.trim());
                compute_all(principal, &self.terms)
            }
            Err(_) => Vec::new(),
        };

        Estimate {
            validation,
            breakdowns,
        }
    }

    /// Recomputes from the remembered amount, if there is a numeric one.
    pub fn restore(&mut self) -> Option<Estimate> {
        let saved = match self.store.get() {
            Ok(saved) => saved?,
            Err(e) => {
                warn!("could not read the last amount: {e:#}");
                return None;
            }
        };

        if !is_numeric(&saved) {
            warn!("ignoring stored amount {saved:?}: not a number");
            return None;
        }

        Some(self.on_amount_changed(&saved))
    }

    /// Forgets the remembered amount.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.store.remove()?;
        info!("cleared the last amount");
        Ok(())
    }

    fn remember(&mut self, value: &str) {
        match self.store.get() {
            Ok(Some(current)) if current == value => return,
            _ => {}
        }
        match self.store.set(value) {
            Ok(()) => info!("last amount set to {value}"),
            Err(e) => warn!("could not save the last amount: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::terms::reference_terms;
    use crate::validation::InvalidAmount;
    use rust_decimal_macros::dec;

    struct BrokenStore;

    impl AmountStore for BrokenStore {
        fn get(&self) -> anyhow::Result<Option<String>> {
            anyhow::bail!("disk on fire")
        }
        fn set(&mut self, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        fn remove(&mut self) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    #[test]
    fn test_valid_amount_computes_and_persists() {
        let mut estimator = Estimator::new(reference_terms(), MemoryStore::new());
        let estimate = estimator.on_amount_changed("10000");

        assert_eq!(estimate.validation, Ok(dec!(10000)));
        assert_eq!(estimate.breakdowns.len(), 3);
        assert_eq!(estimate.breakdowns[0].monthly_payment, dec!(1992));
        assert_eq!(estimator.store().get().unwrap().as_deref(), Some("10000"));
    }

    #[test]
    fn test_invalid_amount_keeps_previous_value() {
        let mut estimator = Estimator::new(reference_terms(), MemoryStore::with_value("5000"));
        let estimate = estimator.on_amount_changed("50");

        assert_eq!(estimate.validation, Err(InvalidAmount::BelowMinimum));
        assert!(estimate.breakdowns.is_empty());
        assert_eq!(estimator.store().get().unwrap().as_deref(), Some("5000"));
    }

    #[test]
    fn test_restore_recomputes_saved_amount() {
        let mut estimator = Estimator::new(reference_terms(), MemoryStore::with_value("10000"));
        let estimate = estimator.restore().unwrap();
        assert!(estimate.is_valid());
        assert_eq!(estimate.breakdowns[2].total_amount, dec!(15750));
    }

    #[test]
    fn test_restore_out_of_range_value_reports_reason() {
        let mut estimator = Estimator::new(reference_terms(), MemoryStore::with_value("50"));
        let estimate = estimator.restore().unwrap();
        assert_eq!(estimate.validation, Err(InvalidAmount::BelowMinimum));
    }

    #[test]
    fn test_restore_ignores_non_numeric_or_missing() {
        let mut estimator = Estimator::new(reference_terms(), MemoryStore::with_value("abc"));
        assert!(estimator.restore().is_none());

        let mut estimator = Estimator::new(reference_terms(), MemoryStore::new());
        assert!(estimator.restore().is_none());
    }

    #[test]
    fn test_clear_forgets_amount() {
        let mut estimator = Estimator::new(reference_terms(), MemoryStore::new());
        estimator.on_amount_changed("2500");
        estimator.clear().unwrap();
        assert_eq!(estimator.store().get().unwrap(), None);
    }

    #[test]
    fn test_broken_store_does_not_fail_calculation() {
        let mut estimator = Estimator::new(reference_terms(), BrokenStore);
        let estimate = estimator.on_amount_changed("10000");
        assert_eq!(estimate.breakdowns.len(), 3);
        assert!(estimator.restore().is_none());
        assert!(estimator.clear().is_err());
    }

    #[test]
    fn test_estimate_serializes_reason_code() {
        let mut estimator = Estimator::new(reference_terms(), MemoryStore::new());
        let json = serde_json::to_value(estimator.on_amount_changed("")).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["error"], "empty");
        assert_eq!(json["breakdowns"].as_array().map(Vec::len), Some(0));
    }
}
