use pinboard_core::{Cell, Point, Style};

/// Text drawn with a single base style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    style: Style,
}

impl StyledText {
    /// Create a styled text from a plain string with default style.
    pub fn text(s: &str) -> Self {
        Self::new(s, Style::default())
    }

    /// Create a styled text with the given text and style.
    pub fn new(text: &str, style: Style) -> Self {
        Self {
            text: text.to_string(),
            style,
        }
    }

    /// Set the text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Set the base style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Return the raw text content.
    pub fn content(&self) -> &str {
        &self.text
    }

    /// Return the base style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Iterate over styled characters, calling `callback` for each with its
    /// grid position and cell. Returns the point one past the last character.
    pub fn iter(&self, mut callback: impl FnMut(Point, Cell)) -> Point {
        let mut x: i32 = 0;
        let mut y: i32 = 0;
        for ch in self.text.chars() {
            if ch == '\n' {
                x = 0;
                y += 1;
                continue;
            }
            callback(
                Point::new(x, y),
                Cell::default().with_char(ch).with_style(self.style),
            );
            x += 1;
        }
        Point::new(x, y)
    }

    /// Return the minimum bounding size required to display this text.
    pub fn size(&self) -> Point {
        let mut max_x: i32 = 0;
        let mut max_y: i32 = 0;
        self.iter(|p, _| {
            max_x = max_x.max(p.x + 1);
            max_y = max_y.max(p.y + 1);
        });
        Point::new(max_x, max_y)
    }

    /// Word-wrap the text to the given width and return a new `StyledText`.
    ///
    /// Words longer than `width` are broken across lines. A width of zero
    /// leaves the text unchanged.
    pub fn format(&self, width: usize) -> StyledText {
        if width == 0 {
            return self.clone();
        }
        let mut result = String::new();
        for (i, line) in self.text.split('\n').enumerate() {
            if i > 0 {
                result.push('\n');
            }
            let mut col = 0usize;
            for word in line.split(' ') {
                let chars: Vec<char> = word.chars().collect();
                if col > 0 {
                    if col + 1 + chars.len() <= width {
                        result.push(' ');
                        col += 1;
                    } else {
                        result.push('\n');
                        col = 0;
                    }
                }
                let mut rest = &chars[..];
                while rest.len() > width {
                    result.extend(&rest[..width]);
                    result.push('\n');
                    rest = &rest[width..];
                }
                result.extend(rest);
                col += rest.len();
            }
        }
        StyledText {
            text: result,
            style: self.style,
        }
    }

    /// Split the text at newlines, returning single-line `StyledText`s.
    pub fn lines(&self) -> Vec<StyledText> {
        self.text
            .split('\n')
            .map(|line| StyledText {
                text: line.to_string(),
                style: self.style,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(s: &str, width: usize) -> Vec<String> {
        StyledText::text(s)
            .format(width)
            .lines()
            .iter()
            .map(|l| l.content().to_string())
            .collect()
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(wrapped("a sunny day at the lake", 10), vec!["a sunny", "day at the", "lake"]);
    }

    #[test]
    fn breaks_long_words() {
        assert_eq!(wrapped("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
        assert_eq!(wrapped("abcdef", 3), vec!["abc", "def"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        assert_eq!(wrapped("one\ntwo three", 20), vec!["one", "two three"]);
    }

    #[test]
    fn zero_width_is_identity() {
        assert_eq!(wrapped("no wrap here", 0), vec!["no wrap here"]);
    }

    #[test]
    fn size_counts_lines_and_columns() {
        assert_eq!(StyledText::text("ab\ncde").size(), Point::new(3, 2));
        assert_eq!(StyledText::text("").size(), Point::ZERO);
    }
}
