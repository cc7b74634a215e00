use serde::{Deserialize, Serialize};

use crate::core::types::{DataSet, FieldMapping};

pub const DEFAULT_Y_PADDING: f64 = 0.1;

const UNIT_DOMAIN: (f64, f64) = (0.0, 1.0);

/// `[min, max]` per axis across a whole data set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Extent {
    #[must_use]
    pub const fn unit() -> Self {
        Self {
            x: UNIT_DOMAIN,
            y: UNIT_DOMAIN,
        }
    }
}

/// Inputs controlling how an [`Extent`] is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentPolicy<'a> {
    pub props: &'a FieldMapping,
    pub x_override: Option<(f64, f64)>,
    pub y_override: Option<(f64, f64)>,
    pub y_padding: f64,
}

impl<'a> ExtentPolicy<'a> {
    #[must_use]
    pub fn new(props: &'a FieldMapping) -> Self {
        Self {
            props,
            x_override: None,
            y_override: None,
            y_padding: DEFAULT_Y_PADDING,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RunningExtent {
    min: f64,
    max: f64,
}

impl RunningExtent {
    const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    fn fold(&mut self, value: f64) {
        // NaN compares false both ways and never moves the bounds.
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    fn resolve(self) -> Option<(f64, f64)> {
        (self.min <= self.max).then_some((self.min, self.max))
    }
}

/// Computes the x/y domain of `data`.
///
/// Overrides are returned verbatim and skip the scan for that axis. The y
/// upper bound is padded by `(max - min) * y_padding` unless y is overridden;
/// x is never padded. Axes without any numeric value fall back to `[0, 1]`.
#[must_use]
pub fn compute_extent(data: &DataSet, policy: ExtentPolicy<'_>) -> Extent {
    if let (Some(x), Some(y)) = (policy.x_override, policy.y_override) {
        return Extent { x, y };
    }
    if data.is_empty() {
        return Extent {
            x: policy.x_override.unwrap_or(UNIT_DOMAIN),
            y: policy.y_override.unwrap_or(UNIT_DOMAIN),
        };
    }

    let mut x = RunningExtent::EMPTY;
    let mut y = RunningExtent::EMPTY;
    for series in data {
        for point in &series.data {
            if policy.x_override.is_none() {
                x.fold(point.number(&policy.props.x));
            }
            if policy.y_override.is_none() {
                y.fold(point.number(&policy.props.y));
            }
        }
    }

    let x = policy
        .x_override
        .unwrap_or_else(|| x.resolve().unwrap_or(UNIT_DOMAIN));
    let y = match policy.y_override {
        Some(y) => y,
        None => {
            let (min, max) = y.resolve().unwrap_or(UNIT_DOMAIN);
            (min, max + (max - min) * policy.y_padding)
        }
    };
    Extent { x, y }
}
