use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Easing curve a scene applies to animated transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    PolyIn { exponent: f64 },
    PolyOut { exponent: f64 },
    PolyInOut { exponent: f64 },
    SinInOut,
}

impl Default for Easing {
    fn default() -> Self {
        Self::PolyInOut { exponent: 3.0 }
    }
}

impl Easing {
    /// Maps normalized time `t ∈ [0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::PolyIn { exponent } => t.powf(exponent),
            Self::PolyOut { exponent } => 1.0 - (1.0 - t).powf(exponent),
            Self::PolyInOut { exponent } => {
                let doubled = t * 2.0;
                if doubled <= 1.0 {
                    doubled.powf(exponent) / 2.0
                } else {
                    (2.0 - (2.0 - doubled).powf(exponent)) / 2.0
                }
            }
            Self::SinInOut => (1.0 - (std::f64::consts::PI * t).cos()) / 2.0,
        }
    }
}

/// How a scene moves an element to its target geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    Immediate,
    Animated { easing: Easing, duration_ms: u64 },
}

impl Transition {
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::Immediate => Duration::ZERO,
            Self::Animated { duration_ms, .. } => Duration::from_millis(duration_ms),
        }
    }

    #[must_use]
    pub fn is_animated(self) -> bool {
        matches!(self, Self::Animated { duration_ms, .. } if duration_ms > 0)
    }
}

/// Where an axis sits relative to the plot; also picks the scale it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisPosition {
    /// Top/bottom axes draw the x scale, left/right the y scale.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Horizontal pan/zoom applied to a line path: `translate(x,0) scale(k,1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathTransform {
    pub translate_x: f64,
    pub scale_x: f64,
    /// Stroke width stays constant while the path is scaled.
    pub non_scaling_stroke: bool,
}

impl PathTransform {
    #[must_use]
    pub fn to_svg(self) -> String {
        format!("translate({},0)scale({},1)", self.translate_x, self.scale_x)
    }
}

/// Polyline in plot pixels; undefined samples split it into sub-paths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePath {
    pub subpaths: Vec<Vec<(f64, f64)>>,
}

impl LinePath {
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// SVG path data, e.g. `M0,10L5,20M9,3`.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let mut out = String::new();
        for subpath in &self.subpaths {
            for (index, (x, y)) in subpath.iter().enumerate() {
                let command = if index == 0 { 'M' } else { 'L' };
                let _ = write!(out, "{command}{x},{y}");
            }
        }
        out
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = self
            .subpaths
            .iter()
            .flatten()
            .all(|(x, y)| x.is_finite() && y.is_finite());
        if !finite {
            return Err(ChartError::InvalidData(
                "line path coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    pub path: LinePath,
    pub transform: PathTransform,
}

/// Axis-aligned rectangle in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectGeometry {
    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One tick mark: its offset along the axis and its rendered label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub offset: f64,
    pub label: String,
}

/// Axis title, positioned relative to the axis group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub dy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisElement {
    pub position: AxisPosition,
    /// Group offset inside the plot container.
    pub translate: (f64, f64),
    /// Extent of the axis line along its direction.
    pub range: (f64, f64),
    pub tick_size: f64,
    pub ticks: Vec<AxisTick>,
    pub label: Option<AxisLabel>,
}

impl AxisElement {
    pub fn validate(&self) -> ChartResult<()> {
        let (tx, ty) = self.translate;
        if !tx.is_finite() || !ty.is_finite() || !self.tick_size.is_finite() {
            return Err(ChartError::InvalidData(
                "axis translate and tick size must be finite".to_owned(),
            ));
        }
        if self.ticks.iter().any(|tick| !tick.offset.is_finite()) {
            return Err(ChartError::InvalidData(
                "axis tick offsets must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Kind of visual element; together with an id it forms the element key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    Axis,
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementKey {
    pub kind: ElementKind,
    pub id: String,
}

impl ElementKey {
    #[must_use]
    pub fn new(kind: ElementKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn line(id: impl Into<String>) -> Self {
        Self::new(ElementKind::Line, id)
    }

    #[must_use]
    pub fn bar(id: impl Into<String>) -> Self {
        Self::new(ElementKind::Bar, id)
    }

    #[must_use]
    pub fn axis(id: impl Into<String>) -> Self {
        Self::new(ElementKind::Axis, id)
    }
}

/// Geometry of one keyed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Line(LineElement),
    Bar(RectGeometry),
    Axis(AxisElement),
}

impl Element {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Line(_) => ElementKind::Line,
            Self::Bar(_) => ElementKind::Bar,
            Self::Axis(_) => ElementKind::Axis,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => {
                line.path.validate()?;
                if !line.transform.translate_x.is_finite() || !line.transform.scale_x.is_finite()
                {
                    return Err(ChartError::InvalidData(
                        "line transform must be finite".to_owned(),
                    ));
                }
                Ok(())
            }
            Self::Bar(rect) => rect.validate(),
            Self::Axis(axis) => axis.validate(),
        }
    }
}
