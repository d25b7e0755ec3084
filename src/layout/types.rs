//! Data structures for layout computation.

use crate::label::LabelStyle;

/// Sizes and spacing of the drawing, in SVG user units.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub node_radius: f64,
    /// Minimum gap between neighbouring nodes on the deepest level
    pub min_x_spacing: f64,
    /// Gap between the bottom of one row and the top of the next
    pub y_spacing: f64,
    pub text_size: f64,
    pub outline_width: f64,
    /// Margins only affect the view box
    pub horizontal_margin: f64,
    pub vertical_margin: f64,
    pub dash_pattern: String,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            min_x_spacing: 15.0,
            y_spacing: 8.0,
            text_size: 10.0,
            outline_width: 3.0,
            horizontal_margin: 10.0,
            vertical_margin: 10.0,
            dash_pattern: "5 3".to_string(),
        }
    }
}

impl Geometry {
    pub fn node_diameter(&self) -> f64 {
        self.node_radius * 2.0
    }

    /// Distance from the left edge of the leftmost node to the right edge of
    /// the rightmost node when `count` nodes sit at minimum spacing.
    pub fn row_width(&self, count: usize) -> f64 {
        let count = count as f64;
        count * self.node_diameter() + (count - 1.0) * self.min_x_spacing
    }

    pub fn row_y(&self, level: usize) -> f64 {
        (level - 1) as f64 * (self.node_diameter() + self.y_spacing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    /// Give every real node placeholder children one level down
    pub add_blank_external_nodes: bool,
    pub make_blank_external_nodes_black: bool,
    pub add_white_bg: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A node stored in the tree.
    Labeled { style: LabelStyle, text: String },
    /// Placeholder with nothing drawn beneath it.
    Blank,
    /// Missing ancestor of a drawn node.
    Ghost,
}

/// Resolved paint for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text_color: &'static str,
    pub dashed: bool,
}

/// A positioned node in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub level: usize,
    /// 1-based position within the level
    pub number: usize,
    pub x: f64,
    pub y: f64,
    pub shape: Shape,
    pub kind: NodeKind,
    pub style: NodeStyle,
}

impl LayoutNode {
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Labeled { text, .. } => Some(text),
            NodeKind::Blank | NodeKind::Ghost => None,
        }
    }
}

/// A straight edge from a parent center to a child center.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelMetrics {
    pub level: usize,
    pub y: f64,
    pub slots: usize,
    /// Effective row width; shrinks by one diameter per level above the bottom
    pub row_width: f64,
    /// Center-to-center distance between neighbouring slots
    pub spacing: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// The complete layout result.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Nodes in draw order (deepest level first)
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Root level first
    pub levels: Vec<LevelMetrics>,
    /// Span of the deepest row
    pub width: f64,
    pub height: f64,
    pub view_box: ViewBox,
    pub geometry: Geometry,
    pub options: LayoutOptions,
}
