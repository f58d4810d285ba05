//! Presentation Metadata
//!
//! Lookup tables the rendering layer needs but the validity engine must not
//! depend on: how each category looks, and how report violations and refused
//! connections are worded.

use serde::Serialize;

use crate::error::RejectedMutation;
use crate::graph::NodeCategory;
use crate::validate::{ValidationReport, Violation};

/// Display metadata for a node category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    /// Human-readable name, as shown in the creation menu.
    pub name: &'static str,
    /// Short badge text.
    pub prefix: &'static str,
    /// Node fill color.
    pub color: &'static str,
    /// Icon identifier understood by the renderer.
    pub icon: &'static str,
}

const SOURCE: CategoryStyle = CategoryStyle {
    name: "Data Source",
    prefix: "DS",
    color: "#2563eb",
    icon: "database",
};

const PROCESSING: CategoryStyle = CategoryStyle {
    name: "Processing",
    prefix: "PR",
    color: "#7c3aed",
    icon: "settings",
};

const OUTPUT: CategoryStyle = CategoryStyle {
    name: "Output",
    prefix: "OUT",
    color: "#dc2626",
    icon: "target",
};

/// Styling for categories the table does not know yet.
pub const FALLBACK_STYLE: CategoryStyle = CategoryStyle {
    name: "Node",
    prefix: "N",
    color: "#6b7280",
    icon: "settings",
};

/// Look up the display metadata for a category.
#[allow(unreachable_patterns)]
pub fn style(category: NodeCategory) -> &'static CategoryStyle {
    match category {
        NodeCategory::Source => &SOURCE,
        NodeCategory::Processing => &PROCESSING,
        NodeCategory::Output => &OUTPUT,
        _ => &FALLBACK_STYLE,
    }
}

/// Headline for the status panel.
pub fn headline(report: &ValidationReport) -> &'static str {
    if report.is_valid_dag {
        "Valid DAG"
    } else {
        "Invalid DAG"
    }
}

/// Wording for a single violation, given the validator's minimum size.
pub fn describe(violation: Violation, min_nodes: usize) -> String {
    match violation {
        Violation::TooFewNodes => format!("Need at least {min_nodes} nodes"),
        Violation::IsolatedNodes => "All nodes must be connected".to_owned(),
        Violation::CycleDetected => "Cycles detected".to_owned(),
    }
}

/// Warnings shown under the headline.
///
/// An empty graph shows no warnings at all, and with fewer than two nodes
/// only the size warning is shown.
pub fn status_messages(report: &ValidationReport, min_nodes: usize) -> Vec<String> {
    if report.node_count == 0 {
        return Vec::new();
    }
    report
        .violations()
        .into_iter()
        .filter(|v| report.node_count >= 2 || *v == Violation::TooFewNodes)
        .map(|v| describe(v, min_nodes))
        .collect()
}

/// Transient notice for a refused connection.
pub fn rejection_notice(rejection: &RejectedMutation) -> &'static str {
    match rejection {
        RejectedMutation::SelfLoop { .. } => "Invalid Connection: Cannot connect node to itself",
        RejectedMutation::UnknownNode { .. } => "Invalid Connection: Node no longer exists",
        RejectedMutation::DuplicateEdge { .. } => "Invalid Connection: Nodes are already connected",
    }
}
