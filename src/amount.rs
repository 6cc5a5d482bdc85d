use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to whole currency units.
///
/// Midpoints go away from zero, so `1991.5` becomes `1992` and `-0.5` becomes `-1`.
/// Every reported field of a breakdown goes through here exactly once.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
