//! Named transforms applied to raw VaR numbers.

use std::fmt;
use std::sync::Arc;

use varlab_core::ReturnType;

/// Maps a raw VaR value (typically a return) to a domain quantity.
///
/// ```rust
/// use varlab_core::ReturnType;
/// use varlab_risk::Interpretation;
///
/// let delta = Interpretation::price_delta(ReturnType::Classic, 200.0);
/// assert_eq!(delta.apply(-0.05), -10.0);
/// ```
#[derive(Clone)]
pub struct Interpretation {
    name: String,
    transform: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl Interpretation {
    /// Creates a named transform.
    pub fn new(
        name: impl Into<String>,
        transform: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            transform: Arc::new(transform),
        }
    }

    /// Price reached from `reference_price` after a VaR return.
    #[must_use]
    pub fn price_level(return_type: ReturnType, reference_price: f64) -> Self {
        Self::new("Price", move |r| return_type.inverse(r, reference_price))
    }

    /// Price change from `reference_price` implied by a VaR return.
    #[must_use]
    pub fn price_delta(return_type: ReturnType, reference_price: f64) -> Self {
        Self::new("Price Delta", move |r| {
            return_type.inverse(r, reference_price) - reference_price
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the transform.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        (self.transform)(value)
    }
}

impl fmt::Debug for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpretation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
