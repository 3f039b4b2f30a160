use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("File", section_style));
    lines.push(Line::raw("  Ctrl-n              New file"));
    lines.push(Line::raw("  Ctrl-o              Open file"));
    lines.push(Line::raw("  Ctrl-s              Save"));
    lines.push(Line::raw("  Ctrl-Shift-s        Save as"));
    lines.push(Line::raw("  Ctrl-q              Quit"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Find / Replace", section_style));
    lines.push(Line::raw("  Ctrl-f              Find and replace"));
    lines.push(Line::raw("  F3 / Shift-F3       Next / previous match"));
    lines.push(Line::raw("  Enter, Alt-n/Alt-p  Next / previous (in bar)"));
    lines.push(Line::raw("  Alt-r / Alt-a       Replace one / replace all"));
    lines.push(Line::raw("  Alt-c               Toggle case sensitivity"));
    lines.push(Line::raw("  Tab                 Switch find/replace field"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw("  Arrows, Home/End    Move cursor"));
    lines.push(Line::raw("  Ctrl-Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl-Home/End       Buffer start / end"));
    lines.push(Line::raw("  PageUp/PageDown     Page movement"));
    lines.push(Line::raw("  Mouse               Click to place cursor, wheel scrolls"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("View", section_style));
    lines.push(Line::raw("  Ctrl-+ / Ctrl--     Zoom in / out"));
    lines.push(Line::raw("  Ctrl-0              Reset zoom"));
    lines.push(Line::raw("  F2                  Editor font"));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Settings", section_style));
    lines.push(Line::raw(format!(
        "  File: {}",
        model.settings_path.display()
    )));
    lines.push(Line::raw(format!(
        "  Font: {}",
        model.settings.font_spec()
    )));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = lines
        .into_iter()
        .take(content_height as usize)
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
