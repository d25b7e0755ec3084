pub mod label;
pub mod layout;
pub mod measure;
pub mod request;
pub mod scene;
pub mod svg;
pub mod tree;

use wasm_bindgen::prelude::*;

use layout::{LayoutEngine, LayoutOptions};
use svg::{Scene, SvgRenderer};
use tree::{IndexedCompleteBinaryTree, TreeError};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Lay out and render a level-order list of labels. `None` marks a missing node.
pub fn render_tree(
    slots: Vec<Option<String>>,
    options: LayoutOptions,
) -> Result<Scene, TreeError> {
    let tree = IndexedCompleteBinaryTree::new(slots)?;
    let layout = LayoutEngine::new(options).layout(&tree);
    Ok(SvgRenderer.render(&layout))
}

/// Render an array of labels to SVG. `null`, `undefined` and empty strings are
/// missing nodes.
#[wasm_bindgen(js_name = "treeToSvg")]
pub fn tree_to_svg(
    elements: js_sys::Array,
    blank_external_nodes: Option<bool>,
    black_blanks: Option<bool>,
    white_background: Option<bool>,
) -> Result<String, String> {
    let slots = elements
        .iter()
        .map(|value| value.as_string().filter(|s| !s.trim().is_empty()))
        .collect();
    let options = LayoutOptions {
        add_blank_external_nodes: blank_external_nodes.unwrap_or(false),
        make_blank_external_nodes_black: black_blanks.unwrap_or(false),
        add_white_bg: white_background.unwrap_or(false),
    };
    let scene = render_tree(slots, options).map_err(|e| e.to_string())?;
    Ok(scene.to_svg_string())
}

/// Handle a JSON request body and return the JSON response.
#[wasm_bindgen(js_name = "requestToSvg")]
pub fn request_to_svg(body: &str) -> Result<String, String> {
    let response = request::handle(body.as_bytes()).map_err(|e| e.to_string())?;
    serde_json::to_string(&response).map_err(|e| e.to_string())
}
