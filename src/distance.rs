use derive_more::Display;
use ordered_float::OrderedFloat;

/// A heuristic distance estimate as returned by callers.
///
/// Backed by `OrderedFloat` so it has a total order and can be used in ranks.
/// NaN sorts above every other value, so NaN-scored states are explored last.
#[derive(Copy, Clone, Default, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[display("{_0}")]
pub struct Distance(pub OrderedFloat<f64>);

impl Distance {
    #[inline(always)]
    #[must_use]
    pub fn new(d: f64) -> Self {
        Self(OrderedFloat(d))
    }

    #[inline(always)]
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0)
    }

    /// The absolute value.
    ///
    /// Callers may return signed offsets (`x - target`), only how far away a
    /// state is matters for ranking.
    #[inline(always)]
    #[must_use]
    pub fn magnitude(self) -> Self {
        Self(OrderedFloat(self.0.0.abs()))
    }
}
