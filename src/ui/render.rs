use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;

use super::{overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let find_active = model.find_open;
    let toast_active = model.active_toast().is_some();
    let bar_active = model.prompt.is_some() || model.pending.is_some();
    let footer_rows =
        1 + u16::from(find_active) + u16::from(toast_active) + u16::from(bar_active);

    let editor_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    // Bars stack upward from the status line.
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    let find_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(find_active)),
        height: 1,
        ..area
    };
    let bar_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(find_active) + u16::from(bar_active)),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(footer_rows),
        height: 1,
        ..area
    };

    render_editor(model, frame, editor_area);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if let Some(prompt) = &model.prompt {
        status::render_prompt_bar(prompt, frame, bar_area);
    } else if model.pending.is_some() {
        status::render_confirm_bar(model, frame, bar_area);
    }
    if find_active {
        status::render_find_bar(model, frame, find_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let total_lines = model.buffer.line_count();
    let gutter_width = usize::from(model.surface.gutter_width(total_lines));
    let text_width = usize::from(model.surface.text_width(total_lines));
    let col_offset = model.surface.col_offset();
    let cursor = model.buffer.cursor();
    let selection = model.buffer.selection();

    let start = model.surface.viewport.offset();
    let end = (start + area.height as usize).min(total_lines);

    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for line_idx in start..end {
        let text = model.buffer.line_at(line_idx).unwrap_or_default();
        let number = format!("{:>width$} ", line_idx + 1, width = gutter_width - 1);
        let mut spans = vec![Span::styled(number, Style::default().fg(Color::DarkGray))];

        // Selection range relative to this line's bytes.
        let line_start = model.buffer.line_start_byte(line_idx);
        let line_selection = selection.as_ref().and_then(|sel| {
            let sel_start = sel.start.saturating_sub(line_start);
            let sel_end = sel.end.saturating_sub(line_start);
            (sel.end > line_start && sel.start < line_start + text.len())
                .then_some(sel_start..sel_end.min(text.len()))
        });
        let cursor_col = (line_idx == cursor.line).then_some(cursor.col);

        spans.extend(line_spans(
            &text,
            col_offset,
            text_width,
            cursor_col,
            line_selection,
        ));
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Style a single line's visible window, char by char.
///
/// Precedence: cursor cell over selection over plain text. The window is
/// sliced by display columns so wide characters pan correctly.
fn line_spans(
    text: &str,
    col_offset: usize,
    text_width: usize,
    cursor_col: Option<usize>,
    selection: Option<std::ops::Range<usize>>,
) -> Vec<Span<'static>> {
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let selection_style = Style::default().bg(Color::Yellow).fg(Color::Black);
    let plain = Style::default();

    let mut out: Vec<Span> = Vec::new();
    let mut run = String::new();
    let mut run_style = plain;
    let mut width = 0usize;
    let mut cursor_drawn = false;

    for (byte_idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        let col_end = width + ch_width;
        width = col_end;
        if col_end <= col_offset {
            continue;
        }
        if width > col_offset + text_width {
            break;
        }

        let style = if cursor_col == Some(byte_idx) {
            cursor_drawn = true;
            cursor_style
        } else if selection.as_ref().is_some_and(|sel| sel.contains(&byte_idx)) {
            selection_style
        } else {
            plain
        };

        if style != run_style && !run.is_empty() {
            out.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        out.push(Span::styled(run, run_style));
    }

    // Cursor past the end of the line renders as a highlighted cell.
    if let Some(col) = cursor_col
        && !cursor_drawn
        && col >= text.len()
        && width < col_offset + text_width
    {
        out.push(Span::styled(" ".to_string(), cursor_style));
    }

    out
}

#[cfg(test)]
mod line_span_tests {
    use super::*;

    fn flatten(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_window_slices_by_display_columns() {
        let spans = line_spans("abcdefgh", 2, 3, None, None);
        assert_eq!(flatten(&spans), "cde");
    }

    #[test]
    fn test_cursor_cell_is_split_out() {
        let spans = line_spans("abc", 0, 10, Some(1), None);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content.as_ref(), "b");
    }

    #[test]
    fn test_cursor_at_line_end_gets_phantom_cell() {
        let spans = line_spans("ab", 0, 10, Some(2), None);
        assert_eq!(flatten(&spans), "ab ");
    }

    #[test]
    fn test_selection_groups_into_one_span() {
        let spans = line_spans("abcdef", 0, 10, None, Some(1..4));
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content.as_ref(), "bcd");
    }

    #[test]
    fn test_wide_chars_counted_as_two_columns() {
        let spans = line_spans("你好xy", 0, 5, None, None);
        // 2 + 2 + 1 columns fit.
        assert_eq!(flatten(&spans), "你好x");
    }
}
