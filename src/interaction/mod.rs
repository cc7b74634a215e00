mod zoom;

use serde::{Deserialize, Serialize};

pub use zoom::{ZoomState, ZoomTransform};

/// Pointer activity the host reports for a rendered bar element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarPointerEvent {
    Over,
    Out,
    Click,
}

/// One active touch contact, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

/// How a render pass reaches the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Data-driven or programmatic change; geometry animates.
    Animated,
    /// Gesture- or resize-driven change; geometry tracks input directly.
    Immediate,
}
