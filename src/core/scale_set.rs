use crate::core::band_scale::BandScale;
use crate::core::scale::LinearScale;
use crate::interaction::ZoomTransform;

/// Horizontal scale: continuous for line graphs, banded for bar graphs.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    Linear(LinearScale),
    Band(BandScale),
}

impl XScale {
    #[must_use]
    pub fn as_linear(&self) -> Option<LinearScale> {
        match self {
            Self::Linear(scale) => Some(*scale),
            Self::Band(_) => None,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Linear(_) => None,
            Self::Band(scale) => Some(scale),
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.range(),
            Self::Band(scale) => scale.range(),
        }
    }

    /// Applies a pan/zoom transform; band scales are not continuously zoomable.
    #[must_use]
    pub fn rescaled(&self, transform: ZoomTransform) -> Self {
        match self {
            Self::Linear(scale) => Self::Linear(scale.rescale_x(transform)),
            Self::Band(scale) => Self::Band(scale.clone()),
        }
    }
}

/// Scales computed by one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    pub x: XScale,
    pub y: LinearScale,
}

impl Default for ScaleSet {
    fn default() -> Self {
        Self {
            x: XScale::Linear(LinearScale::new((0.0, 1.0), (0.0, 0.0))),
            y: LinearScale::new((0.0, 1.0), (0.0, 0.0)),
        }
    }
}
