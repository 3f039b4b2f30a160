use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{FindField, Model, Prompt, PromptKind, ToastLevel};
use crate::ui::surface::display_col;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let cursor = model.buffer.cursor();
    let line_text = model.buffer.line_at(cursor.line).unwrap_or_default();
    let col = display_col(&line_text, cursor.col) + 1;

    let modified_marker = if model.document.is_modified() { " [modified]" } else { "" };
    let zoom_marker = if model.surface.is_zoomed() { "*" } else { "" };

    let status = format!(
        " {}{}  Ln {}, Col {}  {} lines  {}pt{}  F1:help",
        model.document.display_name(),
        modified_marker,
        cursor.line + 1,
        col,
        model.buffer.line_count(),
        model.surface.font_size(),
        zoom_marker,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

pub fn render_find_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar = &model.find;
    let base = Style::default().bg(Color::Blue).fg(Color::White);
    let focused = base.add_modifier(Modifier::BOLD).add_modifier(Modifier::UNDERLINED);

    let (query_style, replacement_style) = match bar.field {
        FindField::Query => (focused, base),
        FindField::Replacement => (base, focused),
    };

    let case_marker = if bar.state.case_sensitive { "[Aa]" } else { "[aa]" };
    let match_info = if bar.state.query.is_empty() {
        String::new()
    } else {
        format!("  [{} matches]", bar.match_count)
    };

    let spans = vec![
        Span::styled(" Find: ", base),
        Span::styled(bar.state.query.clone(), query_style),
        Span::styled("  Replace: ", base),
        Span::styled(bar.replacement.clone(), replacement_style),
        Span::styled(format!("  {case_marker}{match_info}"), base),
        Span::styled(
            "  Enter:next Alt+p:prev Alt+r:replace Alt+a:all Alt+c:case Tab:field Esc:close",
            base.fg(Color::Gray),
        ),
    ];

    let find_bar = Paragraph::new(Line::from(spans)).style(base);
    frame.render_widget(find_bar, area);
}

pub fn render_prompt_bar(prompt: &Prompt, frame: &mut Frame, area: Rect) {
    let label = match prompt.kind {
        PromptKind::OpenPath => "Open: ",
        PromptKind::SaveAsPath => "Save as: ",
        PromptKind::Font => "Font: ",
    };
    let base = Style::default().bg(Color::Blue).fg(Color::White);
    let spans = vec![
        Span::styled(format!(" {label}"), base.add_modifier(Modifier::BOLD)),
        Span::styled(prompt.input.clone(), base),
        Span::styled("█", base),
        Span::styled("  Enter:ok Esc:cancel", base.fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

pub fn render_confirm_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let message = format!(
        " Save changes to {}?  (s)ave  (d)iscard  (c)ancel",
        model.document.display_name()
    );
    let confirm =
        Paragraph::new(message).style(Style::default().bg(Color::Yellow).fg(Color::Black));
    frame.render_widget(confirm, area);
}
