use indexmap::IndexMap;

use crate::core::GraphType;
use crate::error::{ChartError, ChartResult};
use crate::render::{Element, ElementKey, ElementKind, LayoutFrame, Scene, SceneBatch, SceneOp};

/// In-memory scene that settles every transition instantly and keeps the
/// resulting element tree, so callers can inspect what a backend would show.
#[derive(Debug, Default)]
pub struct RecordingScene {
    elements: IndexMap<ElementKey, Element>,
    layout: Option<LayoutFrame>,
    mode: Option<GraphType>,
    batches: Vec<SceneBatch>,
}

impl RecordingScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element(&self, key: &ElementKey) -> Option<&Element> {
        self.elements.get(key)
    }

    /// Live elements of one kind, in insertion order.
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = (&ElementKey, &Element)> {
        self.elements.iter().filter(move |(key, _)| key.kind == kind)
    }

    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements_of(kind).count()
    }

    #[must_use]
    pub fn layout(&self) -> Option<LayoutFrame> {
        self.layout
    }

    #[must_use]
    pub fn mode(&self) -> Option<GraphType> {
        self.mode
    }

    #[must_use]
    pub fn batches(&self) -> &[SceneBatch] {
        &self.batches
    }

    #[must_use]
    pub fn last_batch(&self) -> Option<&SceneBatch> {
        self.batches.last()
    }

    pub fn clear_history(&mut self) {
        self.batches.clear();
    }
}

impl Scene for RecordingScene {
    fn apply(&mut self, batch: &SceneBatch) -> ChartResult<()> {
        batch.validate()?;
        for op in &batch.ops {
            match op {
                SceneOp::Layout(layout) => self.layout = Some(*layout),
                SceneOp::Mode(mode) => self.mode = Some(*mode),
                SceneOp::Enter { key, target, .. } => {
                    self.elements.insert(key.clone(), target.clone());
                }
                SceneOp::Update { key, target, .. } => {
                    let Some(slot) = self.elements.get_mut(key) else {
                        return Err(ChartError::Scene(format!(
                            "update for unknown element `{}`",
                            key.id
                        )));
                    };
                    *slot = target.clone();
                }
                SceneOp::Exit { key, .. } => {
                    self.elements.shift_remove(key);
                }
            }
        }
        self.batches.push(batch.clone());
        Ok(())
    }
}
