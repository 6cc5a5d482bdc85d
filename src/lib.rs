//! `installment_estimator` is a Rust library for estimating flat-rate installment plans.
//!
//! Given a principal, it computes what each configured repayment plan costs:
//! - **Flat (simple) interest**: the plan's rate is charged once on the principal,
//!   never compounded and never pro-rated by the number of months.
//! - **Fixed fee**: added once per plan, whatever its length.
//! - **Even installments**: the total is split equally across the months.
//!
//! Input is validated first; only amounts between 100 and 1,000,000 are accepted.
//!
//! ## Usage
//!
//! Add `installment_estimator` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! installment_estimator = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then validate the raw input and compute every plan:
//!
//! ```rust
//! use installment_estimator::{compute_all, reference_terms, validate};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     match validate("10000") {
//!         Ok(principal) => {
//!             for plan in compute_all(principal, &reference_terms()) {
//!                 println!("{} months: {} per month, {} in total",
//!                     plan.months, plan.monthly_payment, plan.total_amount);
//!             }
//!         }
//!         Err(reason) => {
//!             eprintln!("{} ({})", reason, reason.code());
//!         }
//!     }
//!
//!     let six_months = &compute_all(dec!(10000), &reference_terms())[0];
//!     assert_eq!(six_months.monthly_payment, dec!(1992));
//! }
//! ```
//!
//! For an interactive front end, [`Estimator`] runs the whole
//! validate → compute → remember cycle against an injected [`AmountStore`].

pub mod amount;
pub mod calculator;
pub mod format;
pub mod render;
pub mod session;
pub mod storage;
pub mod terms;
pub mod validation;

pub use amount::round_currency;
pub use calculator::{RepaymentBreakdown, cheapest_monthly, compute_all, compute_breakdown, lowest_total};
pub use format::{format_currency, format_number};
pub use render::{ChartOptions, render_chart, render_summary};
pub use session::{Estimate, Estimator};
pub use storage::{AmountStore, FileStore, MemoryStore};
pub use terms::{ConfigError, TermConfig, load_terms, parse_terms, reference_terms};
pub use validation::{InvalidAmount, MAX_AMOUNT, MIN_AMOUNT, ValidationResult, is_numeric, sanitize_digits, validate};
