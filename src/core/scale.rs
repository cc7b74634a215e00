use serde::{Deserialize, Serialize};

use crate::core::ticks::linear_ticks;
use crate::interaction::ZoomTransform;

/// Continuous mapping from a data domain to a pixel range.
///
/// A zero-width domain maps every value to the middle of the range so
/// downstream geometry stays finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    round: bool,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            round: false,
        }
    }

    /// Rounds mapped outputs to whole pixels.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 || !span.is_finite() {
            if span.is_nan() { f64::NAN } else { 0.5 }
        } else {
            (value - self.domain_start) / span
        };
        let mapped = self.range_start + normalized * (self.range_end - self.range_start);
        if self.round { mapped.round() } else { mapped }
    }

    /// Pixel → domain. A zero-width range inverts to the domain start.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, count)
    }

    /// Returns the scale whose domain is what the zoomed x range currently shows.
    #[must_use]
    pub fn rescale_x(self, transform: ZoomTransform) -> Self {
        let start = self.invert(transform.invert_x(self.range_start));
        let end = self.invert(transform.invert_x(self.range_end));
        Self {
            domain_start: start,
            domain_end: end,
            ..self
        }
    }
}
