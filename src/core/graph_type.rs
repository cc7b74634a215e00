use serde::{Deserialize, Serialize};

use crate::core::types::DataSet;

/// Rendering mode of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Line,
    Bar,
}

impl GraphType {
    /// Class name the host can put on its root element.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Line => "line-graph",
            Self::Bar => "bar-graph",
        }
    }
}

/// A data set where every series holds exactly one point is a bar graph;
/// anything else is a line graph. An empty data set is vacuously a bar graph.
#[must_use]
pub fn detect_type(data: &DataSet) -> GraphType {
    if data.iter().all(|series| series.data.len() == 1) {
        GraphType::Bar
    } else {
        GraphType::Line
    }
}
