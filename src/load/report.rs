//! Flat fault reports for consumers of faulty instances.

use serde::{Deserialize, Serialize};

use super::provider::LoadExceptionTreeProvider;
use super::tree::ExceptionNode;

/// One recorded fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDiagnostic {
    /// Rendered fault path, e.g. `nodes["node_1"].bounds.width`.
    pub path: String,
    pub message: String,
    /// Messages of earlier faults replaced at the same position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<String>,
}

/// Aggregated faults of one loaded instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub is_complete: bool,
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    pub fn from_node(node: Option<&ExceptionNode>) -> Self {
        let diagnostics: Vec<LoadDiagnostic> = node
            .map(ExceptionNode::faults)
            .unwrap_or_default()
            .into_iter()
            .map(|(path, fault)| LoadDiagnostic {
                path: path.to_string(),
                message: fault.to_string(),
                suppressed: fault.suppressed().iter().map(ToString::to_string).collect(),
            })
            .collect();
        Self {
            is_complete: diagnostics.is_empty(),
            diagnostics,
        }
    }

    pub fn of(instance: &impl LoadExceptionTreeProvider) -> Self {
        Self::from_node(instance.exception_node().map(|node| &**node))
    }

    /// Paths of all faults, in report order.
    pub fn paths(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.path.as_str()).collect()
    }

    /// Diagnostics at or below `prefix`.
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a LoadDiagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| {
            d.path == prefix
                || d.path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
        })
    }
}
