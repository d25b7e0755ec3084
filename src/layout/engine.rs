//! Layout engine core implementation.

use crate::label::{self, LabelStyle};
use crate::tree::IndexedCompleteBinaryTree;

use super::types::{
    Geometry, Layout, LayoutEdge, LayoutNode, LayoutOptions, LevelMetrics, NodeKind, NodeStyle,
    Shape, ViewBox,
};

/// Layout engine configuration and computation.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    pub(crate) geometry: Geometry,
    pub(crate) options: LayoutOptions,
}

/// What was drawn on the level below, indexed by slot.
struct Row {
    offsets: Vec<f64>,
    drawn: Vec<bool>,
}

impl Row {
    fn drawn(&self, slot: usize) -> bool {
        self.drawn.get(slot).copied().unwrap_or(false)
    }
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            geometry: Geometry::default(),
            options,
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Compute layout for the given tree.
    ///
    /// Levels are walked bottom-up. The deepest row is spread evenly at minimum
    /// spacing, and every slot above sits at the midpoint of its two child slots,
    /// so parents end up centered over their children and the root over the
    /// whole drawing.
    pub fn layout(&self, tree: &IndexedCompleteBinaryTree) -> Layout {
        let g = &self.geometry;
        let diameter = g.node_diameter();

        let num_levels = if self.options.add_blank_external_nodes {
            tree.height() + 1
        } else {
            tree.height()
        };

        let bottom_slots = IndexedCompleteBinaryTree::max_node_count(num_levels);
        let final_width = g.row_width(bottom_slots);
        let final_height =
            num_levels as f64 * diameter + (num_levels - 1) as f64 * g.y_spacing;
        let left_center_x = -final_width / 2.0 + g.node_radius;

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut levels = Vec::with_capacity(num_levels);
        let mut below: Option<Row> = None;

        for level in (1..=num_levels).rev() {
            let labels = tree.nodes_at_level(level);
            let offsets = match &below {
                None => spread(g.row_width(labels.len()) - diameter, labels.len()),
                Some(row) => (0..labels.len())
                    .map(|i| (row.offsets[2 * i] + row.offsets[2 * i + 1]) / 2.0)
                    .collect(),
            };
            let y = g.row_y(level);
            let mut drawn = vec![false; labels.len()];

            for (i, raw) in labels.iter().enumerate() {
                let (left_drawn, right_drawn) = match &below {
                    Some(row) => (row.drawn(2 * i), row.drawn(2 * i + 1)),
                    None => (false, false),
                };
                let external = !(left_drawn || right_drawn);

                let kind = match raw {
                    Some(raw) => {
                        let (style, text) = label::decode(raw);
                        NodeKind::Labeled {
                            style,
                            text: text.to_string(),
                        }
                    }
                    None if !external => NodeKind::Ghost,
                    None if self.options.add_blank_external_nodes
                        && tree.has_parent(level, i + 1) =>
                    {
                        NodeKind::Blank
                    }
                    None => continue,
                };

                let shape = if external { Shape::Square } else { Shape::Circle };
                let style = self.node_style(&kind);
                let x = left_center_x + offsets[i];

                if let Some(row) = &below {
                    let child_y = g.row_y(level + 1);
                    for (child, was_drawn) in [(2 * i, left_drawn), (2 * i + 1, right_drawn)] {
                        if was_drawn {
                            edges.push(LayoutEdge {
                                from: (x, y),
                                to: (left_center_x + row.offsets[child], child_y),
                                dashed: style.dashed,
                            });
                        }
                    }
                }

                drawn[i] = true;
                nodes.push(LayoutNode {
                    level,
                    number: i + 1,
                    x,
                    y,
                    shape,
                    kind,
                    style,
                });
            }

            levels.push(LevelMetrics {
                level,
                y,
                slots: labels.len(),
                row_width: final_width - diameter * (num_levels - level) as f64,
                spacing: if offsets.len() > 1 {
                    offsets[1] - offsets[0]
                } else {
                    0.0
                },
            });
            below = Some(Row { offsets, drawn });
        }
        levels.reverse();

        tracing::debug!(
            levels = num_levels,
            nodes = nodes.len(),
            edges = edges.len(),
            width = final_width,
            "tree laid out"
        );

        Layout {
            nodes,
            edges,
            levels,
            width: final_width,
            height: final_height,
            view_box: ViewBox {
                min_x: -final_width / 2.0 - g.horizontal_margin,
                min_y: -g.node_radius - g.vertical_margin,
                width: final_width + g.horizontal_margin * 2.0,
                height: final_height + g.vertical_margin * 2.0,
            },
            geometry: g.clone(),
            options: self.options,
        }
    }

    fn node_style(&self, kind: &NodeKind) -> NodeStyle {
        match kind {
            NodeKind::Labeled { style, .. } => NodeStyle {
                fill: style.fill(),
                stroke: "black",
                text_color: style.text_color(),
                dashed: false,
            },
            NodeKind::Blank => NodeStyle {
                fill: if self.options.make_blank_external_nodes_black {
                    "black"
                } else {
                    "white"
                },
                stroke: "black",
                text_color: LabelStyle::Plain.text_color(),
                dashed: false,
            },
            NodeKind::Ghost => NodeStyle {
                fill: "white",
                stroke: "black",
                text_color: LabelStyle::Plain.text_color(),
                dashed: true,
            },
        }
    }
}

/// Evenly distribute `count` offsets across `[0, span]`.
fn spread(span: f64, count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![0.0; count];
    }
    (0..count)
        .map(|i| span * (i as f64 / (count - 1) as f64))
        .collect()
}
