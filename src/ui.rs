use crate::app::App;
use crate::binder::Region;
use crate::i18n::t;
use crate::render::{Action, OptionsView, Widget};
use crate::types::AppMode;
use crate::utils::decode_url;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(if app.presenter().error().is_some() { 3 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let Some(ctx) = &app.context else {
        f.render_widget(
            Paragraph::new(t!("ui.unbound")).fg(Color::Red),
            chunks[2],
        );
        return;
    };

    render_input(f, app, chunks[0]);
    if ctx.has(Region::ErrorBanner) {
        render_error(f, app, chunks[1]);
    }
    if ctx.has(Region::Results) && ctx.has(Region::Options) {
        render_results(f, app, chunks[2]);
    }
    render_status_bar(f, app, chunks[3]);
    render_hints(f, app, chunks[4]);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(area);

    let mut spans = Vec::new();
    if app.mode == AppMode::Insert {
        let (l, r) = app.input.split();
        spans.push(Span::raw(l.to_string()));
        spans.push(Span::styled("█", Style::default().fg(Color::White)));
        spans.push(Span::raw(r.to_string()));
    } else {
        spans.push(Span::raw(decode_url(app.input.as_str())));
    }

    let border = if app.mode == AppMode::Insert {
        Color::Yellow
    } else {
        Color::Gray
    };
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} · {} ", t!("ui.title"), t!("ui.url_label"))),
        ),
        cols[0],
    );

    let presenter = app.presenter();
    let mut find = vec![];
    if presenter.submit_enabled() {
        find.push(Span::styled(t!("ui.find"), Style::default().fg(Color::Green).bold()));
    } else {
        find.push(Span::styled(
            t!("ui.find_disabled"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if presenter.spinner_visible() {
        find.push(Span::styled(
            "⏳",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::RAPID_BLINK),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(find))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        cols[1],
    );
}

fn render_error(f: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.presenter().error() else {
        return;
    };
    f.render_widget(
        Paragraph::new(message.to_string())
            .fg(Color::Red)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(t!("ui.error_title")),
            ),
        area,
    );
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    if !app.presenter().results_visible() {
        return;
    }
    let Some(view) = &app.flow.container else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(t!("ui.options_title"));
    f.render_widget(
        Paragraph::new(widget_lines(view))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn widget_lines(view: &OptionsView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, widget) in view.widgets.iter().enumerate() {
        let focused = i == view.focus;
        let marker = if focused { "▶ " } else { "  " };
        match widget {
            Widget::Picker(picker) => {
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(picker.label.clone(), Style::default().bold()),
                ]));
                let current = match picker.options.get(picker.selected) {
                    Some(option) => {
                        let mut text = format!(
                            "‹ {} ›  {}/{}",
                            option.label,
                            picker.selected + 1,
                            picker.options.len()
                        );
                        if let Some(detail) = &option.detail {
                            text.push_str(&format!("  ({detail})"));
                        }
                        text
                    }
                    None => "‹ - ›".to_string(),
                };
                let style = if focused {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                lines.push(Line::from(vec![Span::raw("    "), Span::styled(current, style)]));
            }
            Widget::Button(button) => {
                let color = match button.action {
                    Action::SaveLink => Color::Green,
                    Action::Back => Color::Gray,
                    _ => Color::Yellow,
                };
                let style = if focused {
                    Style::default().fg(Color::Black).bg(color).bold()
                } else {
                    Style::default().fg(color)
                };
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("[ {} ]", button.label), style),
                ]));
            }
        }
    }
    if let Some(notice) = &view.notice {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::LightGreen),
        )));
    }
    lines
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let (bg, txt) = match app.mode {
        AppMode::Normal => (Color::Blue, format!(" {} ", t!("status.normal"))),
        AppMode::Insert => (Color::Yellow, format!(" {} ", t!("status.insert"))),
    };

    let mut left_spans = vec![
        Span::styled(txt, Style::default().bg(bg).fg(Color::Black).bold()),
        Span::raw(" "),
    ];
    if let Some(session) = app.flow.step.session() {
        left_spans.push(Span::raw(decode_url(&session.submitted_url)));
        if let Some(kind) = session.media_kind {
            left_spans.push(Span::styled(
                format!(" [{}]", kind.name()),
                Style::default().fg(Color::Green),
            ));
        }
    }
    if app.presenter().is_loading() {
        left_spans.push(Span::styled(
            format!(" {}", t!("status.busy")),
            Style::default().fg(Color::Cyan),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(left_spans)).bg(Color::DarkGray),
        status_chunks[0],
    );

    f.render_widget(
        Paragraph::new(t!("status.step", step = app.flow.step.name()))
            .alignment(Alignment::Right)
            .bg(Color::DarkGray)
            .fg(Color::Gray),
        status_chunks[1],
    );
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        AppMode::Insert => t!("hints.insert"),
        AppMode::Normal => t!("hints.normal"),
    };
    let hints = match &app.flow.container {
        Some(view) if app.mode == AppMode::Normal && view.has_action(Action::SaveLink) => {
            format!("{hints}  ▸ {}", t!("render.download_link"))
        }
        _ => hints,
    };
    f.render_widget(
        Paragraph::new(hints).bg(Color::Black).fg(Color::Gray),
        area,
    );
}
