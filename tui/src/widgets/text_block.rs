//! TextBlock Widget
//!
//! A borderless text region anchored to its newest line. Scrolling counts
//! lines up from the bottom, so new content stays in view unless the user has
//! scrolled back. When there is more content past an edge, the two rows at
//! that edge are shaded.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::UnicodeWidthChar;

/// One logical line of content, wrapped at render time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledLine {
    /// Line text (no newlines)
    pub text: String,
    /// Style applied to every wrapped row
    pub style: Style,
}

impl StyledLine {
    /// Create a styled line
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// An empty spacer line
    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new(), Style::default())
    }
}

/// Scroll state for a bottom-anchored text block
#[derive(Clone, Copy, Debug, Default)]
pub struct TextBlockState {
    /// Rows scrolled up from the newest line (0 = latest)
    pub scroll_offset: usize,
    /// Wrapped rows at the last render
    pub total_lines: usize,
}

impl TextBlockState {
    /// Scroll towards older content
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = (self.scroll_offset + rows).min(self.total_lines.saturating_sub(1));
    }

    /// Scroll towards newer content
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    /// Jump back to the newest line
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }
}

/// A borderless, bottom-anchored text block
pub struct TextBlock<'a> {
    lines: &'a [StyledLine],
}

impl<'a> TextBlock<'a> {
    /// Create a block over `lines`
    pub fn new(lines: &'a [StyledLine]) -> Self {
        Self { lines }
    }
}

/// Wrap `text` to `width` display columns; empty text yields one empty row
pub fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() || width == 0 {
        return vec![String::new()];
    }
    wrap(text, width)
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}

/// Truncate `text` to at most `width` display columns
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;
        let height = area.height as usize;

        let rows: Vec<(String, Style)> = self
            .lines
            .iter()
            .flat_map(|line| {
                wrap_rows(&line.text, width)
                    .into_iter()
                    .map(move |row| (row, line.style))
            })
            .collect();

        state.total_lines = rows.len();

        // Clamp scroll
        let max_scroll = state.total_lines.saturating_sub(height);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        let visible_end = state.total_lines - state.scroll_offset;
        let visible_start = visible_end.saturating_sub(height);
        let has_content_above = visible_start > 0;
        let has_content_below = state.scroll_offset > 0;
        let shown = visible_end - visible_start;

        for (i, (row, style)) in rows[visible_start..visible_end].iter().enumerate() {
            let style = if has_content_above && i < 2 {
                edge_shade(i)
            } else if has_content_below && i + 2 >= shown {
                edge_shade(shown - 1 - i)
            } else {
                *style
            };
            let row = truncate_to_width(row, width);
            buf.set_string(area.x, area.y + i as u16, &row, style);
        }
    }
}

/// Shade for the row `distance` rows in from a clipped edge
fn edge_shade(distance: usize) -> Style {
    let shade = if distance == 0 {
        Color::Rgb(80, 80, 80)
    } else {
        Color::Rgb(120, 120, 120)
    };
    Style::default().fg(shade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn lines(texts: &[&str]) -> Vec<StyledLine> {
        texts
            .iter()
            .map(|t| StyledLine::new(*t, Style::default()))
            .collect()
    }

    #[test]
    fn test_anchored_to_newest_line() {
        let content = lines(&["one", "two", "three", "four"]);
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();

        TextBlock::new(&content).render(area, &mut buf, &mut state);

        assert_eq!(state.total_lines, 4);
        assert_eq!(row_text(&buf, 0), "three");
        assert_eq!(row_text(&buf, 1), "four");
    }

    #[test]
    fn test_scroll_up_shows_older_rows() {
        let content = lines(&["one", "two", "three", "four"]);
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState {
            scroll_offset: 2,
            total_lines: 0,
        };

        TextBlock::new(&content).render(area, &mut buf, &mut state);

        assert_eq!(row_text(&buf, 0), "one");
        assert_eq!(row_text(&buf, 1), "two");
    }

    #[test]
    fn test_scroll_is_clamped() {
        let content = lines(&["one", "two", "three"]);
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState {
            scroll_offset: 50,
            total_lines: 0,
        };

        TextBlock::new(&content).render(area, &mut buf, &mut state);

        assert_eq!(state.scroll_offset, 1);
        assert_eq!(row_text(&buf, 0), "one");
    }

    #[test]
    fn test_long_lines_wrap() {
        let content = lines(&["alpha beta gamma"]);
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();

        TextBlock::new(&content).render(area, &mut buf, &mut state);

        assert_eq!(state.total_lines, 3);
        assert_eq!(row_text(&buf, 0), "alpha");
        assert_eq!(row_text(&buf, 2), "gamma");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        assert_eq!(truncate_to_width("考え中", 4), "考え");
        assert_eq!(truncate_to_width("考え中", 5), "考え");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_state_scroll_helpers() {
        let mut state = TextBlockState {
            scroll_offset: 0,
            total_lines: 10,
        };
        state.scroll_up(4);
        assert_eq!(state.scroll_offset, 4);
        state.scroll_up(100);
        assert_eq!(state.scroll_offset, 9);
        state.scroll_down(3);
        assert_eq!(state.scroll_offset, 6);
        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset, 0);
    }
}
