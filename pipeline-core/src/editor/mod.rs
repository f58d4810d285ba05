//! Editor Session
//!
//! The session is the single owner of a pipeline being edited. The
//! presentation layer talks to it with explicit `Command`s and listens
//! through subscribers; there is no ambient event bus and no global state.
//!
//! # How It Works
//!
//! 1. A command arrives through `Editor::apply` or one of the shorthand
//!    methods such as `Editor::connect`.
//!
//! 2. Boundary checks run first. Blank labels are refused here, before the
//!    store sees them.
//!
//! 3. The command is applied to the `GraphStore`. A refused mutation returns
//!    an error and nothing else happens.
//!
//! 4. If anything changed, the session takes a fresh snapshot, revalidates
//!    it from scratch and notifies every subscriber before returning.
//!
//! Everything runs synchronously on the caller's thread, so a command is
//! fully applied and validated before the next one can start.

mod subscriber;

pub use subscriber::{Subscriber, SubscriberId, Update};

use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::error::{EditorError, LoadError, SnapshotError};
use crate::graph::{
    EdgeId, GraphSnapshot, GraphStore, NodeCategory, NodeId, Position, Removal, Selection,
};
use crate::layout::{layout_snapshot, LayeredLayout, Layout};
use crate::validate::{DagValidator, ValidationReport};

/// A request from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a node. Without a position it lands on the placement grid.
    AddNode {
        label: String,
        category: NodeCategory,
        position: Option<Position>,
    },
    /// Delete a node and its edges.
    RemoveNode(NodeId),
    /// Draw an edge from `source` to `target`.
    Connect { source: NodeId, target: NodeId },
    /// Delete one edge.
    RemoveEdge(EdgeId),
    /// Delete everything selected, plus edges touching selected nodes.
    RemoveSelection(Selection),
    /// Drag a node to a new position.
    MoveNode { id: NodeId, position: Position },
    /// Re-position every node with the session's layout.
    AutoLayout,
}

/// The effect of a successfully applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NodeAdded(NodeId),
    EdgeAdded(EdgeId),
    Removed(Removal),
    Moved(NodeId),
    LaidOut,
    /// The command was valid but had nothing to do.
    Unchanged,
}

impl Outcome {
    fn changed(&self) -> bool {
        match self {
            Outcome::Removed(removal) => !removal.is_empty(),
            Outcome::Unchanged => false,
            _ => true,
        }
    }
}

/// An editing session.
pub struct Editor {
    config: EditorConfig,
    store: GraphStore,
    validator: DagValidator,
    layout: Box<dyn Layout>,

    snapshot: GraphSnapshot,
    report: ValidationReport,

    subscribers: Vec<Subscriber>,
    next_subscriber: u64,
}

impl Editor {
    /// Start a session with an empty graph and the bundled layered layout.
    pub fn new(config: EditorConfig) -> Self {
        let layout = LayeredLayout::new(&config.layout);
        Self::with_layout(config, layout)
    }

    /// Start a session with a custom layout collaborator.
    pub fn with_layout<L>(config: EditorConfig, layout: L) -> Self
    where
        L: Layout + 'static,
    {
        let store = GraphStore::with_config(&config);
        Self::from_store(config, store, Box::new(layout))
    }

    /// Start a session from a previously saved snapshot.
    pub fn load(config: EditorConfig, snapshot: GraphSnapshot) -> Result<Self, LoadError> {
        let layout = LayeredLayout::new(&config.layout);
        Self::load_with_layout(config, snapshot, layout)
    }

    /// Start a session from a saved snapshot with a custom layout collaborator.
    pub fn load_with_layout<L>(
        config: EditorConfig,
        snapshot: GraphSnapshot,
        layout: L,
    ) -> Result<Self, LoadError>
    where
        L: Layout + 'static,
    {
        let store = GraphStore::from_snapshot(snapshot, &config)?;
        Ok(Self::from_store(config, store, Box::new(layout)))
    }

    /// Start a session from a JSON snapshot.
    pub fn load_json(config: EditorConfig, json: &str) -> Result<Self, SnapshotError> {
        let snapshot = GraphSnapshot::from_json(json)?;
        Ok(Self::load(config, snapshot)?)
    }

    fn from_store(config: EditorConfig, store: GraphStore, layout: Box<dyn Layout>) -> Self {
        let validator = DagValidator::from_config(&config);
        let snapshot = store.snapshot();
        let report = validator.validate(&snapshot);

        Self {
            config,
            store,
            validator,
            layout,
            snapshot,
            report,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Apply a command.
    ///
    /// On error the graph is unchanged and subscribers are not notified.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, EditorError> {
        debug!(?command, "applying command");

        let outcome = match command {
            Command::AddNode {
                label,
                category,
                position,
            } => Outcome::NodeAdded(self.insert_node(&label, category, position)?),
            Command::RemoveNode(id) => Outcome::Removed(self.store.remove_node(id)),
            Command::Connect { source, target } => {
                Outcome::EdgeAdded(self.insert_edge(source, target)?)
            }
            Command::RemoveEdge(id) => Outcome::Removed(self.store.remove_edge(id)),
            Command::RemoveSelection(selection) => {
                Outcome::Removed(self.store.remove_selection(&selection))
            }
            Command::MoveNode { id, position } => {
                if self.store.set_position(id, position) {
                    Outcome::Moved(id)
                } else {
                    Outcome::Unchanged
                }
            }
            Command::AutoLayout => self.auto_layout_store(),
        };

        self.commit(&outcome);
        Ok(outcome)
    }

    /// Add a node at the next default position.
    pub fn add_node(&mut self, label: &str, category: NodeCategory) -> Result<NodeId, EditorError> {
        let id = self.insert_node(label, category, None)?;
        self.commit(&Outcome::NodeAdded(id));
        Ok(id)
    }

    /// Connect two nodes.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, EditorError> {
        let id = self.insert_edge(source, target)?;
        self.commit(&Outcome::EdgeAdded(id));
        Ok(id)
    }

    /// Remove a node and its edges.
    pub fn remove_node(&mut self, id: NodeId) -> Removal {
        self.removal(Command::RemoveNode(id))
    }

    /// Remove an edge.
    pub fn remove_edge(&mut self, id: EdgeId) -> Removal {
        self.removal(Command::RemoveEdge(id))
    }

    /// Remove the current selection.
    pub fn remove_selection(&mut self, selection: Selection) -> Removal {
        self.removal(Command::RemoveSelection(selection))
    }

    /// Re-position all nodes. Does nothing with fewer than two nodes.
    pub fn auto_layout(&mut self) -> bool {
        matches!(self.apply(Command::AutoLayout), Ok(Outcome::LaidOut))
    }

    /// Register a callback to run after every change.
    pub fn subscribe<F>(&mut self, notify: F) -> SubscriberId
    where
        F: Fn(&Update<'_>) + 'static,
    {
        let id = SubscriberId::new(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push(Subscriber::new(id, notify));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id() != id);
        self.subscribers.len() != before
    }

    /// The snapshot the current report was computed from.
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    /// Validation of the current graph.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn validator(&self) -> &DagValidator {
        &self.validator
    }

    /// The current graph as indented JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        self.snapshot.to_json_pretty()
    }

    fn insert_node(
        &mut self,
        label: &str,
        category: NodeCategory,
        position: Option<Position>,
    ) -> Result<NodeId, EditorError> {
        let label = label.trim();
        if label.is_empty() {
            warn!("refused node with blank label");
            return Err(EditorError::EmptyLabel);
        }
        Ok(match position {
            Some(position) => self.store.add_node_at(label, category, position),
            None => self.store.add_node(label, category),
        })
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, EditorError> {
        self.store.add_edge(source, target).map_err(|err| {
            warn!(%source, %target, %err, "connection refused");
            EditorError::Rejected(err)
        })
    }

    fn removal(&mut self, command: Command) -> Removal {
        match self.apply(command) {
            Ok(Outcome::Removed(removal)) => removal,
            _ => Removal::default(),
        }
    }

    fn auto_layout_store(&mut self) -> Outcome {
        if self.store.node_count() < 2 {
            debug!(nodes = self.store.node_count(), "not enough nodes to lay out");
            return Outcome::Unchanged;
        }

        let laid = layout_snapshot(
            &self.store.snapshot(),
            self.layout.as_ref(),
            &self.config.layout,
        );
        for node in laid.nodes() {
            self.store.set_position(node.id, node.position);
        }
        Outcome::LaidOut
    }

    /// Revalidate and notify subscribers if `outcome` changed the graph.
    fn commit(&mut self, outcome: &Outcome) {
        if !outcome.changed() {
            return;
        }
        self.snapshot = self.store.snapshot();
        self.report = self.validator.validate(&self.snapshot);

        debug!(
            nodes = self.report.node_count,
            edges = self.report.edge_count,
            valid = self.report.is_valid_dag,
            subscribers = self.subscribers.len(),
            "graph changed"
        );

        let update = Update {
            outcome,
            snapshot: &self.snapshot,
            report: &self.report,
        };
        for subscriber in &self.subscribers {
            subscriber.notify(&update);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("nodes", &self.store.node_count())
            .field("edges", &self.store.edge_count())
            .field("valid", &self.report.is_valid_dag)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
