//! Python Bindings
//!
//! Exposes an editing session to a Python host UI. Ids cross the boundary in
//! their textual form (`node-3`, `edge-7`), reports and snapshots as JSON.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::EditorError;
use crate::graph::{EdgeId, NodeCategory, NodeId, Selection};
use crate::presentation;

fn parse<T>(raw: &str) -> PyResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e: T::Err| PyValueError::new_err(e.to_string()))
}

fn parse_category(raw: &str) -> PyResult<NodeCategory> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| PyValueError::new_err(format!("unknown node category {raw:?}")))
}

/// Python-exposed editing session.
///
/// Sessions hold Rust callbacks and layouts that are not thread-safe, so the
/// object stays on the thread that created it.
#[pyclass(name = "PipelineEditor", unsendable)]
pub struct PyPipelineEditor {
    editor: Editor,
    last_notice: Option<&'static str>,
}

#[pymethods]
impl PyPipelineEditor {
    /// Create a session, optionally from a JSON configuration.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(json)
                .map_err(|e| PyValueError::new_err(format!("config parse error: {}", e)))?,
            None => EditorConfig::default(),
        };
        Ok(Self {
            editor: Editor::new(config),
            last_notice: None,
        })
    }

    /// Restore a session from a JSON snapshot.
    #[staticmethod]
    #[pyo3(signature = (snapshot_json, config_json=None))]
    fn load(snapshot_json: &str, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(json)
                .map_err(|e| PyValueError::new_err(format!("config parse error: {}", e)))?,
            None => EditorConfig::default(),
        };
        let editor = Editor::load_json(config, snapshot_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self {
            editor,
            last_notice: None,
        })
    }

    /// Add a node and return its id.
    fn add_node(&mut self, label: &str, category: &str) -> PyResult<String> {
        let category = parse_category(category)?;
        self.editor
            .add_node(label, category)
            .map(|id| id.to_string())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Remove a node. Returns the ids of the edges removed with it.
    fn remove_node(&mut self, node_id: &str) -> PyResult<Vec<String>> {
        let removal = self.editor.remove_node(parse::<NodeId>(node_id)?);
        Ok(removal.edges.iter().map(ToString::to_string).collect())
    }

    /// Connect two nodes.
    ///
    /// Returns the new edge id, or `None` if the connection was refused.
    /// The refusal text is then available as `last_notice`.
    fn connect(&mut self, source: &str, target: &str) -> PyResult<Option<String>> {
        let source = parse::<NodeId>(source)?;
        let target = parse::<NodeId>(target)?;

        match self.editor.connect(source, target) {
            Ok(id) => {
                self.last_notice = None;
                Ok(Some(id.to_string()))
            }
            Err(EditorError::Rejected(rejection)) => {
                self.last_notice = Some(presentation::rejection_notice(&rejection));
                Ok(None)
            }
            Err(other) => Err(PyRuntimeError::new_err(other.to_string())),
        }
    }

    /// Remove an edge. Returns whether it existed.
    fn remove_edge(&mut self, edge_id: &str) -> PyResult<bool> {
        let removal = self.editor.remove_edge(parse::<EdgeId>(edge_id)?);
        Ok(!removal.is_empty())
    }

    /// Remove selected nodes and edges. Returns `(nodes, edges)` removed.
    fn remove_selection(
        &mut self,
        nodes: Vec<String>,
        edges: Vec<String>,
    ) -> PyResult<(usize, usize)> {
        let nodes = nodes
            .iter()
            .map(|raw| parse::<NodeId>(raw))
            .collect::<PyResult<Vec<_>>>()?;
        let edges = edges
            .iter()
            .map(|raw| parse::<EdgeId>(raw))
            .collect::<PyResult<Vec<_>>>()?;

        let removal = self.editor.remove_selection(Selection::of(nodes, edges));
        Ok((removal.nodes.len(), removal.edges.len()))
    }

    /// Lay out all nodes. Returns `False` with fewer than two nodes.
    fn auto_layout(&mut self) -> bool {
        self.editor.auto_layout()
    }

    /// The current validation report as JSON.
    fn report_json(&self) -> PyResult<String> {
        serde_json::to_string(self.editor.report())
            .map_err(|e| PyRuntimeError::new_err(format!("serialization error: {}", e)))
    }

    /// The current graph as JSON.
    fn snapshot_json(&self) -> PyResult<String> {
        self.editor
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Warnings for the status panel.
    fn status_messages(&self) -> Vec<String> {
        let min_nodes = self.editor.validator().min_nodes();
        presentation::status_messages(self.editor.report(), min_nodes)
    }

    #[getter]
    fn is_valid(&self) -> bool {
        self.editor.report().is_valid_dag
    }

    #[getter]
    fn last_notice(&self) -> Option<&'static str> {
        self.last_notice
    }

    fn __repr__(&self) -> String {
        let report = self.editor.report();
        format!(
            "PipelineEditor(nodes={}, edges={}, valid={})",
            report.node_count, report.edge_count, report.is_valid_dag
        )
    }
}
