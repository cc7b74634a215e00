use std::hash::Hash;

use indexmap::IndexMap;

use crate::core::{DataSet, Extent, FieldMapping, LinearScale, PlotSize, ScaleSet};
use crate::interaction::ZoomTransform;
use crate::render::{Element, ElementKey, ElementKind, SceneOp, Transition};

/// Everything a reconciler needs for one pass.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileContext<'a> {
    pub data: &'a DataSet,
    pub props: &'a FieldMapping,
    pub scales: &'a ScaleSet,
    pub extent: Extent,
    pub transform: ZoomTransform,
    pub plot: PlotSize,
    pub transition: Transition,
}

/// Keyed enter/update/exit result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualDiff {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
    pub ops: Vec<SceneOp>,
}

impl VisualDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Maps a data set onto one kind of keyed visual element.
///
/// Implementations own the registry of live elements so that a series id
/// seen again is updated in place rather than recreated.
///
/// `reconcile` diffs against the live registry and stages the result; the
/// staged generation only becomes live on `commit`, once the scene has
/// accepted the ops.
pub trait SeriesReconciler {
    fn kind(&self) -> ElementKind;

    fn reconcile(&mut self, context: &ReconcileContext<'_>) -> VisualDiff;

    /// Promotes the last staged generation to live.
    fn commit(&mut self);

    /// Drops the staged generation; live elements stay as they were.
    fn discard(&mut self);

    /// Ids of live elements, in the order of the last committed data set.
    fn live_ids(&self) -> Vec<&str>;
}

/// Live elements keyed by id, plus the generation awaiting scene acceptance.
#[derive(Debug)]
pub(super) struct Registry<K, G> {
    live: IndexMap<K, G>,
    staged: Option<IndexMap<K, G>>,
}

impl<K, G> Default for Registry<K, G> {
    fn default() -> Self {
        Self {
            live: IndexMap::new(),
            staged: None,
        }
    }
}

impl<K: Hash + Eq, G> Registry<K, G> {
    pub fn live(&self) -> &IndexMap<K, G> {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.live.keys()
    }

    pub fn stage(&mut self, next: IndexMap<K, G>) {
        self.staged = Some(next);
    }

    pub fn commit(&mut self) {
        if let Some(next) = self.staged.take() {
            self.live = next;
        }
    }

    pub fn discard(&mut self) {
        self.staged = None;
    }
}

/// Shapes the keyed diff shared by every reconciler.
pub(super) struct KeyedDiff<G> {
    pub kind: ElementKind,
    pub transition: Transition,
    /// Geometry a new element is created with before it animates in.
    pub entering: fn(&G, &ExitBaseline) -> G,
    /// Geometry a leaving element animates to before removal.
    pub exiting: fn(&G, &ExitBaseline) -> G,
    pub into_element: fn(&G) -> Element,
}

/// Baseline used for flat entering/exiting geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ExitBaseline {
    pub y: f64,
    pub plot_height: f64,
    /// Current continuous x scale, for geometry rebuilt from domain values.
    pub x_scale: Option<LinearScale>,
}

impl<G: Clone> KeyedDiff<G> {
    /// Diffs `targets` (data order, unique ids) against the live registry
    /// and stages exactly the targets. Exits are emitted first.
    pub fn run(
        &self,
        registry: &mut Registry<String, G>,
        targets: Vec<(String, G)>,
        baseline: ExitBaseline,
    ) -> VisualDiff {
        let mut diff = VisualDiff::default();
        let mut next = IndexMap::with_capacity(targets.len());
        for (id, geometry) in targets {
            next.insert(id, geometry);
        }

        let live = registry.live();
        for (id, last) in live {
            if next.contains_key(id) {
                continue;
            }
            diff.ops.push(SceneOp::Exit {
                key: ElementKey::new(self.kind, id.clone()),
                target: (self.into_element)(&(self.exiting)(last, &baseline)),
                transition: self.transition,
            });
            diff.exited.push(id.clone());
        }

        for (id, target) in &next {
            let key = ElementKey::new(self.kind, id.clone());
            if live.contains_key(id) {
                diff.ops.push(SceneOp::Update {
                    key,
                    target: (self.into_element)(target),
                    transition: self.transition,
                });
                diff.updated.push(id.clone());
            } else {
                diff.ops.push(SceneOp::Enter {
                    key,
                    initial: (self.into_element)(&(self.entering)(target, &baseline)),
                    target: (self.into_element)(target),
                    transition: self.transition,
                });
                diff.entered.push(id.clone());
            }
        }

        registry.stage(next);
        diff
    }
}
