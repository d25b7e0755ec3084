//! JSON request and response payloads for serving diagrams over a transport.
//!
//! The transport hands over the raw request body and sends back either the
//! JSON response or the status from [`RequestError::status`].

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::layout::{LayoutEngine, LayoutOptions};
use crate::measure::TextMetrics;
use crate::svg::{Scene, SvgRenderer};
use crate::tree::{IndexedCompleteBinaryTree, TreeError};

pub const MAX_BODY_LEN: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request too long: {0} bytes")]
    TooLong(usize),
    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("malformed request: {0}")]
    Malformed(serde_json::Error),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl RequestError {
    /// HTTP status code and reason phrase for the rejection.
    pub fn status(&self) -> (u16, &'static str) {
        match self {
            Self::TooLong(_) => (400, "request too long"),
            Self::InvalidJson(_) => (400, "invalid JSON"),
            Self::Malformed(_) | Self::Tree(_) => (400, "malformed request"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeRequest {
    pub elements: Vec<String>,
    /// Draw blank placeholder children under every node
    pub squares: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SvgResponse {
    pub width: u32,
    pub url: String,
}

impl TreeRequest {
    pub fn parse(body: &[u8]) -> Result<Self, RequestError> {
        if body.len() > MAX_BODY_LEN {
            return Err(RequestError::TooLong(body.len()));
        }
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(RequestError::InvalidJson)?;
        serde_json::from_value(value).map_err(RequestError::Malformed)
    }

    /// Trim each element, turn blanks into missing slots and cut long labels.
    pub fn slots(&self, metrics: &TextMetrics) -> Vec<Option<String>> {
        self.elements
            .iter()
            .map(|e| match e.trim() {
                "" => None,
                s => Some(metrics.truncate(s).to_string()),
            })
            .collect()
    }

    pub fn options(&self) -> LayoutOptions {
        LayoutOptions {
            add_blank_external_nodes: self.squares,
            ..LayoutOptions::default()
        }
    }

    pub fn render(&self) -> Result<Scene, RequestError> {
        let tree = IndexedCompleteBinaryTree::new(self.slots(&TextMetrics::default()))?;
        let layout = LayoutEngine::new(self.options()).layout(&tree);
        Ok(SvgRenderer.render(&layout))
    }
}

impl SvgResponse {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            width: scene.view_box_width(),
            url: data_url(&scene.to_svg_string()),
        }
    }
}

/// Decode, render and package one request body.
pub fn handle(body: &[u8]) -> Result<SvgResponse, RequestError> {
    let request = match TreeRequest::parse(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "denied request");
            return Err(e);
        }
    };
    let scene = request.render().inspect_err(|e| {
        tracing::debug!(error = %e, "denied request");
    })?;
    tracing::info!(
        elements = request.elements.len(),
        squares = request.squares,
        "processed request"
    );
    Ok(SvgResponse::from_scene(&scene))
}

pub fn data_url(svg: &str) -> String {
    let mut url = String::from("data:image/svg+xml,");
    for byte in svg.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                url.push(byte as char)
            }
            _ => write!(url, "%{:02X}", byte).expect("writing to a String cannot fail"),
        }
    }
    url
}
