use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::primitives::{
    category_key, datetime_to_unix_seconds, decimal_to_f64, parse_number,
};
use crate::error::{ChartError, ChartResult};

/// Pixel size of the host element the graph is mounted into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot area for axes and labels, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(40.0, 10.0, 10.0, 40.0)
    }
}

/// Plot area size: the viewport minus margins. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: f64,
    pub height: f64,
}

impl PlotSize {
    #[must_use]
    pub fn from_viewport(viewport: Viewport, margin: Margin) -> Self {
        Self {
            width: (f64::from(viewport.width) - margin.left - margin.right).max(0.0),
            height: (f64::from(viewport.height) - margin.top - margin.bottom).max(0.0),
        }
    }
}

/// Names of the point fields read as x and y.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub x: String,
    pub y: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            x: "x".to_owned(),
            y: "y".to_owned(),
        }
    }
}

/// One sample: an ordered set of named fields.
///
/// Only the mapped x/y fields are interpreted; everything else is carried
/// through to hover/click results untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point {
    fields: IndexMap<String, Value>,
}

impl Point {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a point with the default `x`/`y` field names.
    #[must_use]
    pub fn xy(x: impl Into<Value>, y: impl Into<Value>) -> Self {
        Self::new().with("x", x).with("y", y)
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn with_decimal(self, field: impl Into<String>, value: Decimal) -> ChartResult<Self> {
        let field = field.into();
        let number = decimal_to_f64(value, &field)?;
        Ok(self.with(field, number))
    }

    /// Stores a timestamp as unix seconds so it can drive a linear x axis.
    #[must_use]
    pub fn with_time(self, field: impl Into<String>, time: DateTime<Utc>) -> Self {
        self.with(field, datetime_to_unix_seconds(time))
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Numeric reading of `field`; missing or malformed values are `NaN`.
    #[must_use]
    pub fn number(&self, field: &str) -> f64 {
        self.fields.get(field).map_or(f64::NAN, parse_number)
    }

    #[must_use]
    pub fn category(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map_or_else(|| "null".to_owned(), category_key)
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub data: Vec<Point>,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Ordered collection of series with unique ids.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DataSet {
    series: Vec<Series>,
}

impl DataSet {
    pub fn new(series: Vec<Series>) -> ChartResult<Self> {
        let mut seen = IndexMap::with_capacity(series.len());
        for item in &series {
            if seen.insert(item.id.as_str(), ()).is_some() {
                return Err(ChartError::DuplicateSeriesId {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Self { series })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let series: Vec<Series> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse data set: {e}")))?;
        Self::new(series)
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Series> {
        self.series.iter().find(|series| series.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }
}

impl TryFrom<Vec<Series>> for DataSet {
    type Error = ChartError;

    fn try_from(series: Vec<Series>) -> ChartResult<Self> {
        Self::new(series)
    }
}

impl<'de> Deserialize<'de> for DataSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let series = Vec::<Series>::deserialize(deserializer)?;
        Self::new(series).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}
