use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amount::round_currency;
use crate::terms::TermConfig;

/// Amounts owed under one term for a given principal.
///
/// Every amount except `principal`, `annual_rate` and `fees` is rounded to
/// whole currency units, each from its own unrounded intermediate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentBreakdown {
    /// Number of monthly payments.
    pub months: u32,
    /// Flat percentage charged once on the principal.
    pub annual_rate: Decimal,
    /// The amount borrowed.
    pub principal: Decimal,
    /// Fixed fee added once.
    pub fees: Decimal,
    /// Interest without fees.
    pub interest_only: Decimal,
    /// Interest plus fees.
    pub total_interest: Decimal,
    /// Principal plus interest plus fees.
    pub total_amount: Decimal,
    /// Total amount spread evenly over the months.
    pub monthly_payment: Decimal,
}

/// Calculates a flat, non-compounding repayment plan for one term.
///
/// Interest is `principal * rate / 100`, charged once regardless of term
/// length. The fee is added once, and the total is split evenly across the
/// months.
///
/// # Arguments
///
/// * `principal` - The amount borrowed. Expected to have passed validation;
///   other values still produce an arithmetically consistent result.
/// * `term` - The repayment plan.
pub fn compute_breakdown(principal: Decimal, term: &TermConfig) -> RepaymentBreakdown {
    let rate = term.annual_rate() / dec!(100);

    let interest_amount = principal.saturating_mul(rate);
    let total_amount = principal
        .saturating_add(interest_amount)
        .saturating_add(term.fees());
    // `TermConfig` guarantees at least one month
    let monthly_payment = total_amount / Decimal::from(term.months());

    let breakdown = RepaymentBreakdown {
        months: term.months(),
        annual_rate: term.annual_rate(),
        principal,
        fees: term.fees(),
        interest_only: round_currency(interest_amount),
        total_interest: round_currency(interest_amount.saturating_add(term.fees())),
        total_amount: round_currency(total_amount),
        monthly_payment: round_currency(monthly_payment),
    };

    debug!(
        "{} months at {}% on {}: total {} / monthly {}",
        breakdown.months, breakdown.annual_rate, principal, breakdown.total_amount, breakdown.monthly_payment
    );

    breakdown
}

/// Calculates a breakdown for every term, in configuration order.
pub fn compute_all(principal: Decimal, terms: &[TermConfig]) -> Vec<RepaymentBreakdown> {
    terms
        .iter()
        .map(|term| compute_breakdown(principal, term))
        .collect()
}

/// The plan with the smallest monthly payment. Ties go to the earliest plan.
pub fn cheapest_monthly(breakdowns: &[RepaymentBreakdown]) -> Option<&RepaymentBreakdown> {
    breakdowns
        .iter()
        .reduce(|best, b| if b.monthly_payment < best.monthly_payment { b } else { best })
}

/// The plan that costs the least overall. Ties go to the earliest plan.
pub fn lowest_total(breakdowns: &[RepaymentBreakdown]) -> Option<&RepaymentBreakdown> {
    breakdowns
        .iter()
        .reduce(|best, b| if b.total_amount < best.total_amount { b } else { best })
}
