use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BAND_PADDING: f64 = 0.25;

/// Discrete mapping from category keys to equal-width pixel bands.
///
/// Keys keep first-seen order and duplicates collapse into one band. Step,
/// start offset and band width are rounded to whole pixels; leftover space is
/// split evenly on both sides of the band run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    keys: IndexSet<String>,
    range: (f64, f64),
    padding: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    #[must_use]
    pub fn new<I, K>(keys: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::with_padding(keys, range, DEFAULT_BAND_PADDING)
    }

    #[must_use]
    pub fn with_padding<I, K>(keys: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut scale = Self {
            keys: keys.into_iter().map(Into::into).collect(),
            range,
            padding: padding.clamp(0.0, 1.0),
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.layout();
        scale
    }

    fn layout(&mut self) {
        let n = self.keys.len() as f64;
        let reverse = self.range.1 < self.range.0;
        let (mut start, stop) = if reverse {
            (self.range.1, self.range.0)
        } else {
            (self.range.0, self.range.1)
        };
        let inner = self.padding;
        let outer = self.padding;

        let step = ((stop - start) / (n - inner + outer * 2.0).max(1.0)).floor();
        start += (stop - start - step * (n - inner)) * 0.5;
        self.start = start.round();
        self.step = step;
        self.bandwidth = (step * (1.0 - inner)).round();
        if reverse {
            // Mirror so the first key sits at the high end of the range.
            self.start = self.start + step * (n - 1.0).max(0.0);
            self.step = -step;
        }
    }

    /// Left edge of the band for `key`, or `None` for unknown keys.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        self.keys
            .get_index_of(key)
            .map(|index| self.start + self.step * index as f64)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step.abs()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
