//! Layered layout for DAGs declared as flat node lists
//!
//! Every node names its parents by id. Nodes are placed in rows by depth (the
//! longest chain of parents above them) and parents are centered over the
//! leaves below them. Malformed parent references and cycles are tolerated:
//! they are reported as [`Diagnostic`]s and the layout always completes.
//!
//! # Layout Engines
//!
//! - [`LayeredLayout`]: depth and leaf count based layered layout
//!
//! # Example
//!
//! ```
//! use dag_layout::{DagNode, LayeredLayout, LayoutConfig, LayoutEngine};
//!
//! let nodes = vec![
//!     DagNode::new(1).with_title("root"),
//!     DagNode::new(2).with_parents([1]),
//!     DagNode::new(3).with_parents([1]),
//!     DagNode::new(4).with_parents([2, 3]),
//! ];
//!
//! // Create a layout engine
//! let engine = LayeredLayout::new(LayoutConfig::default());
//!
//! // Use the LayoutEngine trait (simple, single-phase), without size
//! // overrides nor a diagnostics sink:
//! let layout = engine.layout(&nodes, &(), &());
//! assert_eq!(layout.edges.len(), 4);
//!
//! // Or directly by calling each step for better control
//! let layers = engine.compute_layers(&nodes, &());
//! assert_eq!(layers.rows, vec![vec![1], vec![2, 3], vec![4]]);
//! let layout = engine.compute_positions(&layers, &(), &());
//!
//! // Draw the edges of node 3 last
//! let layout = layout.prioritize(Some(3));
//! assert_eq!(layout.edges.last().map(|e| e.from.id()), Some(4));
//! ```

mod config;
mod diagnostics;
mod engine;
mod geometry;
mod layout;
mod node;
mod sizes;

pub mod layered;

pub use config::{LayoutConfig, PartialLayoutConfig};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use engine::LayoutEngine;
pub use geometry::{Point, Rect, Vec2};
pub use layout::{prioritize_edges, Edge, LaidOutNode, Layout};
pub use node::{DagNode, NodeId, ParentRef};
pub use sizes::NodeSizes;

// Re-export layered layout types
pub use layered::{LayeredLayout, Layers};
