//! Quantity totals and completion ratios.

/// A line item that carries a quantity.
pub trait Quantified {
    fn quantity(&self) -> i64;
}

/// Sum the quantities of a set of lines.
pub fn total_quantity<'a, L>(lines: impl IntoIterator<Item = &'a L>) -> i64
where
    L: Quantified + 'a,
{
    lines.into_iter().map(Quantified::quantity).sum()
}

/// `part / whole` clamped into `[0.0, 1.0]`; `0.0` when `whole <= 0`.
pub fn ratio(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (part as f64 / whole as f64).clamp(0.0, 1.0)
}
