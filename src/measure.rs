use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct TextMetrics {
    /// Widest label, in terminal-style display columns, that fits a node.
    pub max_label_columns: usize,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            max_label_columns: 10,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    /// Longest prefix of `text` that fits in `max_label_columns`.
    pub fn truncate<'a>(&self, text: &'a str) -> &'a str {
        let mut width = 0;
        for (i, c) in text.char_indices() {
            width += UnicodeWidthChar::width(c).unwrap_or(0);
            if width > self.max_label_columns {
                return &text[..i];
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("root"), 4);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // 全角文字は幅2
        assert_eq!(m.text_width("ノード"), 6);
    }

    #[test]
    fn test_truncate_short() {
        let m = TextMetrics::default();
        assert_eq!(m.truncate("abc"), "abc");
    }

    #[test]
    fn test_truncate_ascii() {
        let m = TextMetrics::default();
        assert_eq!(m.truncate("0123456789abc"), "0123456789");
    }

    #[test]
    fn test_truncate_wide() {
        let m = TextMetrics::default();
        // 6 wide chars = 12 columns; only 5 fit
        assert_eq!(m.truncate("ああああああ"), "あああああ");
    }

    #[test]
    fn test_truncate_counts_color_token() {
        let m = TextMetrics::default();
        assert_eq!(m.truncate("$red 12345678"), "$red 12345");
    }
}
