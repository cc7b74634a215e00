mod frame;
mod null_scene;
mod primitives;
mod recording_scene;

pub use frame::{LayoutFrame, SceneBatch, SceneOp};
pub use null_scene::NullScene;
pub use primitives::{
    AxisElement, AxisLabel, AxisPosition, AxisTick, Easing, Element, ElementKey, ElementKind,
    LineElement, LinePath, PathTransform, RectGeometry, Transition,
};
pub use recording_scene::RecordingScene;

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Each render pass hands the scene one ordered, keyed batch. Elements are
/// identified by [`ElementKey`]: an `Enter` for a key whose exit is still
/// animating must cancel the pending removal and reuse the element.
pub trait Scene {
    fn apply(&mut self, batch: &SceneBatch) -> ChartResult<()>;
}
