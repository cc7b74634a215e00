use serde::{Deserialize, Serialize};

use crate::core::{GraphType, Margin, PlotSize, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Element, ElementKey, ElementKind, Transition};

/// Outer geometry of the graph: drawing surface size, plot container offset
/// and the clip rectangle that hides zoomed-out content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub viewport: Viewport,
    pub margin: Margin,
    pub plot: PlotSize,
}

impl LayoutFrame {
    #[must_use]
    pub fn new(viewport: Viewport, margin: Margin) -> Self {
        Self {
            viewport,
            margin,
            plot: PlotSize::from_viewport(viewport, margin),
        }
    }

    /// Translation applied to the plot container.
    #[must_use]
    pub fn container_offset(self) -> (f64, f64) {
        (self.margin.left, self.margin.top)
    }
}

/// One instruction in a scene batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneOp {
    Layout(LayoutFrame),
    /// Mode class switch on the graph root.
    Mode(GraphType),
    /// New element: created with `initial`, then moved to `target`.
    Enter {
        key: ElementKey,
        initial: Element,
        target: Element,
        transition: Transition,
    },
    Update {
        key: ElementKey,
        target: Element,
        transition: Transition,
    },
    /// Leaving element: moved to `target`, then removed.
    Exit {
        key: ElementKey,
        target: Element,
        transition: Transition,
    },
}

impl SceneOp {
    #[must_use]
    pub fn key(&self) -> Option<&ElementKey> {
        match self {
            Self::Enter { key, .. } | Self::Update { key, .. } | Self::Exit { key, .. } => {
                Some(key)
            }
            Self::Layout(_) | Self::Mode(_) => None,
        }
    }

    fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Layout(layout) => {
                if !layout.viewport.is_valid() {
                    return Err(ChartError::InvalidViewport {
                        width: layout.viewport.width,
                        height: layout.viewport.height,
                    });
                }
                Ok(())
            }
            Self::Mode(_) => Ok(()),
            Self::Enter {
                key,
                initial,
                target,
                ..
            } => {
                ensure_kind(key, initial)?;
                ensure_kind(key, target)?;
                initial.validate()?;
                target.validate()
            }
            Self::Update { key, target, .. } | Self::Exit { key, target, .. } => {
                ensure_kind(key, target)?;
                target.validate()
            }
        }
    }
}

fn ensure_kind(key: &ElementKey, element: &Element) -> ChartResult<()> {
    if key.kind != element.kind() {
        return Err(ChartError::Scene(format!(
            "element `{}` keyed as {:?} carries {:?} geometry",
            key.id,
            key.kind,
            element.kind()
        )));
    }
    Ok(())
}

/// Ordered batch of scene ops produced by one render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneBatch {
    pub ops: Vec<SceneOp>,
}

impl SceneBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: SceneOp) {
        self.ops.push(op);
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = SceneOp>) {
        self.ops.extend(ops);
    }

    #[must_use]
    pub fn with_op(mut self, op: SceneOp) -> Self {
        self.ops.push(op);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Number of enter/update/exit ops touching elements of `kind`.
    #[must_use]
    pub fn count_kind(&self, kind: ElementKind) -> usize {
        self.ops
            .iter()
            .filter_map(SceneOp::key)
            .filter(|key| key.kind == kind)
            .count()
    }

    pub fn validate(&self) -> ChartResult<()> {
        for op in &self.ops {
            op.validate()?;
        }
        Ok(())
    }
}
