use crate::error::ChartResult;
use crate::render::{ElementKind, Scene, SceneBatch};

/// No-op scene used by headless engine usage.
///
/// It still validates batch content so invalid geometry surfaces before a
/// real backend is attached.
#[derive(Debug, Default)]
pub struct NullScene {
    pub batches_applied: usize,
    pub last_line_ops: usize,
    pub last_bar_ops: usize,
}

impl Scene for NullScene {
    fn apply(&mut self, batch: &SceneBatch) -> ChartResult<()> {
        batch.validate()?;
        self.batches_applied += 1;
        self.last_line_ops = batch.count_kind(ElementKind::Line);
        self.last_bar_ops = batch.count_kind(ElementKind::Bar);
        Ok(())
    }
}
