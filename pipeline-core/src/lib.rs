//! Pipeline Core
//!
//! This crate provides the core of the pipeline editor: the graph state that
//! users edit and the engine that decides, after every edit, whether that
//! graph is a well-formed pipeline.
//! It implements:
//!
//! - A graph store with cascading deletes and self-loop rejection
//! - A stateless DAG validator (minimum size, acyclicity, edge coverage)
//! - An editing session that revalidates and notifies after each command
//! - A layout contract with a layered reference layout
//!
//! The crate is designed to be used both as a native Rust library and, with
//! the `python` feature, as a Python extension module via PyO3.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: Nodes, edges, snapshots and the mutable `GraphStore`
//! - `validate`: The validity report and the checks behind it
//! - `editor`: Command-driven session wiring store, validator and subscribers
//! - `layout`: Layout collaborator contract and fallback placement
//! - `presentation`: Category styling and status wording for renderers
//!
//! # Example
//!
//! ```rust
//! use pipeline_core::editor::Editor;
//! use pipeline_core::graph::NodeCategory;
//!
//! let mut editor = Editor::default();
//! let source = editor.add_node("Source", NodeCategory::Source).unwrap();
//! let sink = editor.add_node("Sink", NodeCategory::Output).unwrap();
//!
//! // Connecting a node to itself is refused and changes nothing.
//! assert!(editor.connect(source, source).is_err());
//!
//! editor.connect(source, sink).unwrap();
//! assert!(editor.report().is_valid_dag);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod layout;
pub mod presentation;
pub mod validate;

#[cfg(feature = "python")]
mod python;

pub use config::EditorConfig;
pub use editor::{Command, Editor, Outcome};
pub use error::{EditorError, LoadError, RejectedMutation, SnapshotError};
pub use graph::{EdgeId, GraphSnapshot, GraphStore, NodeCategory, NodeId, Selection};
pub use validate::{validate, DagValidator, ValidationReport, Violation};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyPipelineEditor>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
