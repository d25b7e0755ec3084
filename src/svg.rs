use crate::layout::{Geometry, Layout, LayoutEdge, LayoutNode, Shape};
use crate::scene::Element;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A rendered diagram together with its canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub root: Element,
    /// Span of the deepest row, without margins
    pub width: f64,
    pub height: f64,
    view_box_width: f64,
}

impl Scene {
    pub fn to_svg_string(&self) -> String {
        self.root.render()
    }

    /// Whole-number width of the view box, margins included.
    pub fn view_box_width(&self) -> u32 {
        self.view_box_width as u32
    }

    /// Pixel width to rasterize at: twice the view box width.
    pub fn raster_width(&self) -> u32 {
        self.view_box_width() * 2
    }
}

#[derive(Debug, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn render(&self, layout: &Layout) -> Scene {
        let vb = &layout.view_box;
        let mut svg = Element::new("svg").attr("xmlns", SVG_NS).attr(
            "viewBox",
            format!("{} {} {} {}", vb.min_x, vb.min_y, vb.width, vb.height),
        );

        if layout.options.add_white_bg {
            svg.push(
                Element::new("rect")
                    .attr("x", vb.min_x)
                    .attr("y", vb.min_y)
                    .attr("width", vb.width)
                    .attr("height", vb.height)
                    .attr("fill", "white"),
            );
        }

        // Edges first so nodes are painted over their ends
        svg.extend(
            layout
                .edges
                .iter()
                .map(|edge| self.render_edge(edge, &layout.geometry)),
        );

        for node in &layout.nodes {
            svg.push(self.render_shape(node, &layout.geometry));
            if let Some(text) = node.text() {
                svg.push(
                    Element::new("text")
                        .attr("x", node.x)
                        .attr("y", node.y)
                        .attr("font-size", layout.geometry.text_size)
                        .attr("fill", node.style.text_color)
                        .attr("text-anchor", "middle")
                        .attr("dominant-baseline", "central")
                        .text(text),
                );
            }
        }

        Scene {
            root: svg,
            width: layout.width,
            height: layout.height,
            view_box_width: vb.width,
        }
    }

    fn render_shape(&self, node: &LayoutNode, g: &Geometry) -> Element {
        let shape = match node.shape {
            Shape::Circle => Element::new("circle")
                .attr("cx", node.x)
                .attr("cy", node.y)
                .attr("r", g.node_radius),
            Shape::Square => Element::new("rect")
                .attr("x", node.x - g.node_radius)
                .attr("y", node.y - g.node_radius)
                .attr("width", g.node_diameter())
                .attr("height", g.node_diameter()),
        };
        let shape = shape
            .attr("fill", node.style.fill)
            .attr("stroke", node.style.stroke)
            .attr("stroke-width", g.outline_width);
        if node.style.dashed {
            shape.attr("stroke-dasharray", &g.dash_pattern)
        } else {
            shape
        }
    }

    fn render_edge(&self, edge: &LayoutEdge, g: &Geometry) -> Element {
        let (x1, y1) = edge.from;
        let (x2, y2) = edge.to;
        let line = Element::new("line")
            .attr("x1", x1)
            .attr("y1", y1)
            .attr("x2", x2)
            .attr("y2", y2)
            .attr("stroke", "black")
            .attr("stroke-width", g.outline_width);
        if edge.dashed {
            line.attr("stroke-dasharray", &g.dash_pattern)
        } else {
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutEngine, LayoutOptions};
    use crate::tree::IndexedCompleteBinaryTree;

    fn render(items: &[Option<&str>], options: LayoutOptions) -> Scene {
        let tree =
            IndexedCompleteBinaryTree::new(items.iter().map(|s| s.map(String::from)).collect())
                .unwrap();
        let layout = LayoutEngine::new(options).layout(&tree);
        SvgRenderer.render(&layout)
    }

    fn tags(scene: &Scene) -> Vec<&str> {
        scene.root.elements().map(|e| e.tag.as_str()).collect()
    }

    #[test]
    fn test_render_basic() {
        let scene = render(&[Some("1"), Some("2"), Some("3")], LayoutOptions::default());
        let svg = scene.to_svg_string();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="-57.5 -30 115 108""#));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(
            tags(&scene),
            vec!["line", "line", "rect", "text", "rect", "text", "circle", "text"]
        );
    }

    #[test]
    fn test_widths() {
        let scene = render(&[Some("1"), Some("2"), Some("3")], LayoutOptions::default());
        assert_eq!(scene.width, 95.0);
        assert_eq!(scene.view_box_width(), 115);
        assert_eq!(scene.raster_width(), 230);
    }

    #[test]
    fn test_white_background_first() {
        let scene = render(
            &[Some("1"), Some("2")],
            LayoutOptions {
                add_white_bg: true,
                ..LayoutOptions::default()
            },
        );
        let first = scene.root.elements().next().unwrap();
        assert_eq!(first.tag, "rect");
        assert_eq!(first.get_attr("fill"), Some("white"));
        assert_eq!(first.get_attr("width"), Some("115"));
        assert_eq!(tags(&scene)[1], "line");
    }

    #[test]
    fn test_edges_before_shapes() {
        let scene = render(
            &[None, None, Some("C"), Some("D"), None, Some("F")],
            LayoutOptions {
                add_blank_external_nodes: true,
                add_white_bg: true,
                ..LayoutOptions::default()
            },
        );
        let tags = tags(&scene);
        let last_line = tags.iter().rposition(|t| *t == "line").unwrap();
        let first_shape = tags
            .iter()
            .skip(1)
            .position(|t| *t != "line")
            .unwrap()
            + 1;
        assert!(last_line < first_shape);
    }

    #[test]
    fn test_dashed_ghost() {
        let scene = render(
            &[Some("A"), None, Some("C"), Some("D")],
            LayoutOptions::default(),
        );
        let dashed: Vec<&Element> = scene
            .root
            .elements()
            .filter(|e| e.get_attr("stroke-dasharray").is_some())
            .collect();
        assert_eq!(dashed.len(), 2);
        assert_eq!(dashed[0].tag, "line");
        assert_eq!(dashed[1].tag, "circle");
    }

    #[test]
    fn test_square_geometry() {
        let scene = render(&[Some("A")], LayoutOptions::default());
        let rect = scene.root.elements().next().unwrap();
        assert_eq!(rect.tag, "rect");
        assert_eq!(rect.get_attr("x"), Some("-20"));
        assert_eq!(rect.get_attr("y"), Some("-20"));
        assert_eq!(rect.get_attr("width"), Some("40"));
    }

    #[test]
    fn test_color_tokens_rendered() {
        let scene = render(
            &[Some("$red 5"), None, Some("$black 9")],
            LayoutOptions::default(),
        );
        let svg = scene.to_svg_string();
        assert!(svg.contains(r#"fill="red""#));
        assert!(!svg.contains("$red"));
        assert!(!svg.contains("$black"));

        let texts: Vec<&Element> = scene.root.elements().filter(|e| e.tag == "text").collect();
        assert_eq!(texts.len(), 2);
        // Deepest level is drawn first
        assert_eq!(texts[0].get_attr("fill"), Some("white"));
        assert_eq!(texts[1].get_attr("fill"), Some("black"));
    }

    #[test]
    fn test_escapes_label() {
        let scene = render(&[Some("a<b")], LayoutOptions::default());
        assert!(scene.to_svg_string().contains("a&lt;b"));
    }
}
