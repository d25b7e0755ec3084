//! Retained vector scene: tagged elements with ordered attributes and children.

use std::fmt::{self, Display, Write};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    /// Insertion-ordered; keys are unique
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Child>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value for the same key.
    pub fn attr(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key.to_string(), value)),
        }
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Child::Element(child));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Child::Element(child));
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = Element>) {
        self.children
            .extend(children.into_iter().map(Child::Element));
    }

    /// Direct element children, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Child::Element(e) => Some(e),
            Child::Text(_) => None,
        })
    }

    /// Serialize with four-space indentation, one element or text run per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, 0)
            .expect("writing to a String cannot fail");
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) -> fmt::Result {
        let tab = INDENT.repeat(depth);
        write!(out, "{}<{}", tab, self.tag)?;
        for (key, value) in &self.attrs {
            write!(out, r#" {}="{}""#, key, escape_xml(value))?;
        }
        if self.children.is_empty() {
            return out.write_str("/>");
        }
        out.write_str(">\n")?;
        for child in &self.children {
            match child {
                Child::Element(e) => e.write_to(out, depth + 1)?,
                Child::Text(t) => write!(out, "{}{}{}", tab, INDENT, escape_xml(t))?,
            }
            out.write_char('\n')?;
        }
        write!(out, "{}</{}>", tab, self.tag)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element() {
        let circle = Element::new("circle").attr("cx", 45).attr("r", 40.5);
        assert_eq!(circle.render(), r#"<circle cx="45" r="40.5"/>"#);
    }

    #[test]
    fn test_nested() {
        let svg = Element::new("svg")
            .attr("viewBox", "0 0 100 100")
            .child(Element::new("text").attr("x", 0).text("hi"));
        assert_eq!(
            svg.render(),
            "<svg viewBox=\"0 0 100 100\">\n    <text x=\"0\">\n        hi\n    </text>\n</svg>"
        );
    }

    #[test]
    fn test_attr_replaces() {
        let e = Element::new("rect").attr("fill", "white").attr("fill", "black");
        assert_eq!(e.attrs.len(), 1);
        assert_eq!(e.get_attr("fill"), Some("black"));
    }

    #[test]
    fn test_escaping() {
        let e = Element::new("text").attr("data", "a\"b").text("<&>");
        let out = e.render();
        assert!(out.contains(r#"data="a&quot;b""#));
        assert!(out.contains("&lt;&amp;&gt;"));
    }

    #[test]
    fn test_elements_skips_text() {
        let e = Element::new("g")
            .text("x")
            .child(Element::new("line"));
        assert_eq!(e.elements().count(), 1);
    }
}
