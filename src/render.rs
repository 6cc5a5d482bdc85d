//! Text presentation of breakdowns.
//!
//! Rendering is a pure function of the breakdown list it is handed; nothing is
//! cached between calls.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tabled::{Table, builder::Builder};

use crate::amount::round_currency;
use crate::calculator::RepaymentBreakdown;
use crate::format::format_currency;

pub const CHART_TITLE: &str = "مقارنة خيارات التقسيط";
pub const MONTHLY_LABEL: &str = "القسط الشهري (ر.س)";
pub const TOTAL_LABEL: &str = "إجمالي المبلغ (ر.س)";
pub const NO_DATA: &str = "لا توجد بيانات";

const SUMMARY_HEADERS: [&str; 4] = ["المدة", "إجمالي المبلغ", "القسط الشهري", "الفوائد والرسوم"];

const MONTHLY_GLYPH: char = '█';
const TOTAL_GLYPH: char = '░';

#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Cells used by the longest bar.
    pub width: usize,
    pub show_legend: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            width: 40,
            show_legend: true,
        }
    }
}

fn term_label(months: u32) -> String {
    format!("{months} شهر")
}

/// One row per term: total amount, monthly payment, and interest plus fees.
///
/// An empty list renders as an empty string.
pub fn render_summary(breakdowns: &[RepaymentBreakdown]) -> String {
    if breakdowns.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    builder.push_record(SUMMARY_HEADERS);
    for b in breakdowns {
        builder.push_record([
            term_label(b.months),
            format_currency(b.total_amount),
            format_currency(b.monthly_payment),
            format_currency(b.total_interest),
        ]);
    }

    let table = Table::from(builder);
    format!("{table}\n")
}

/// Horizontal bar chart comparing monthly payment and total amount per term.
///
/// Bars start at zero and the largest value across both series fills
/// `options.width` cells.
pub fn render_chart(breakdowns: &[RepaymentBreakdown], options: &ChartOptions) -> String {
    let mut lines = vec![CHART_TITLE.to_string()];

    if breakdowns.is_empty() {
        lines.push(NO_DATA.to_string());
        return join_lines(lines);
    }

    if options.show_legend {
        lines.push(format!("{MONTHLY_GLYPH} {MONTHLY_LABEL}   {TOTAL_GLYPH} {TOTAL_LABEL}"));
    }

    let max = breakdowns
        .iter()
        .flat_map(|b| [b.monthly_payment, b.total_amount])
        .max()
        .unwrap_or(Decimal::ZERO);

    for b in breakdowns {
        lines.push(String::new());
        lines.push(term_label(b.months));
        for (value, glyph) in [(b.monthly_payment, MONTHLY_GLYPH), (b.total_amount, TOTAL_GLYPH)] {
            let cells = bar_cells(value, max, options.width);
            let bar: String = std::iter::repeat_n(glyph, cells).collect();
            let padding = options.width.saturating_sub(cells);
            lines.push(format!("  {bar}{:padding$} {}", "", format_currency(value)));
        }
    }

    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn bar_cells(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    let scaled = round_currency(value * Decimal::from(width) / max);
    // a visible sliver for small positive values
    scaled.to_usize().unwrap_or(width).clamp(1, width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_all;
    use crate::terms::reference_terms;
    use rust_decimal_macros::dec;

    fn reference_breakdowns() -> Vec<RepaymentBreakdown> {
        compute_all(dec!(10000), &reference_terms())
    }

    #[test]
    fn test_render_summary() {
        let summary = render_summary(&reference_breakdowns());
        let rows: Vec<&str> = summary.lines().filter(|line| line.contains(" شهر")).collect();

        assert!(summary.contains("القسط الشهري"));
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("6 شهر"));
        assert!(rows[0].contains("١١٬٩٥٠ ر.س"));
        assert!(rows[0].contains("١٬٩٩٢ ر.س"));
        assert!(rows[0].contains("١٬٩٥٠ ر.س"));
        assert!(rows[2].contains("18 شهر"));
        assert!(rows[2].contains("٥٬٧٥٠ ر.س"));
        assert!(summary.ends_with('\n'));
    }

    #[test]
    fn test_render_summary_empty() {
        assert_eq!(render_summary(&[]), "");
    }

    #[test]
    fn test_render_chart_scales_to_largest_value() {
        let options = ChartOptions {
            width: 20,
            show_legend: false,
        };
        let chart = render_chart(&reference_breakdowns(), &options);
        let longest = "░".repeat(20);

        assert!(chart.starts_with(CHART_TITLE));
        assert!(!chart.contains(MONTHLY_LABEL));
        // the 18-month total (15,750) is the largest value
        assert_eq!(chart.matches(longest.as_str()).count(), 1);
        assert!(chart.contains(&format!("  {longest} ١٥٬٧٥٠ ر.س")));
    }

    #[test]
    fn test_render_chart_legend() {
        let chart = render_chart(&reference_breakdowns(), &ChartOptions::default());
        assert!(chart.contains(MONTHLY_LABEL));
        assert!(chart.contains(TOTAL_LABEL));
    }

    #[test]
    fn test_render_chart_empty() {
        let chart = render_chart(&[], &ChartOptions::default());
        assert_eq!(chart, format!("{CHART_TITLE}\n{NO_DATA}\n"));
    }

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(dec!(50), dec!(100), 10), 5);
        assert_eq!(bar_cells(dec!(1), dec!(100000), 10), 1);
        assert_eq!(bar_cells(Decimal::ZERO, dec!(100), 10), 0);
        assert_eq!(bar_cells(dec!(100), dec!(100), 10), 10);
    }
}
