//! Color tokens embedded in node labels.
//!
//! A label may start with `"$red "` or `"$black "`. The token picks the node's
//! fill and text colors and is stripped before the text is drawn.

const RED_TOKEN: &str = "$red ";
const BLACK_TOKEN: &str = "$black ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    #[default]
    Plain,
    Red,
    Black,
}

impl LabelStyle {
    pub fn fill(self) -> &'static str {
        match self {
            Self::Plain => "white",
            Self::Red => "red",
            Self::Black => "black",
        }
    }

    pub fn text_color(self) -> &'static str {
        match self {
            Self::Plain | Self::Red => "black",
            Self::Black => "white",
        }
    }
}

/// Split a raw label into its style and the text to display.
pub fn decode(raw: &str) -> (LabelStyle, &str) {
    if let Some(text) = raw.strip_prefix(RED_TOKEN) {
        (LabelStyle::Red, text)
    } else if let Some(text) = raw.strip_prefix(BLACK_TOKEN) {
        (LabelStyle::Black, text)
    } else {
        (LabelStyle::Plain, raw)
    }
}
