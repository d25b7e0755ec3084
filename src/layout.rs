mod engine;
mod types;

pub use engine::LayoutEngine;
pub use types::{
    Geometry, Layout, LayoutEdge, LayoutNode, LayoutOptions, LevelMetrics, NodeKind, NodeStyle,
    Shape, ViewBox,
};
