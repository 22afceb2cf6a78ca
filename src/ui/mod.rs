pub mod screens;
pub mod theme;
pub mod widgets;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, ScreenKind};
use crate::plan::{DayEntry, WEEKDAYS};
use crate::utils::text::truncate_to_width;
use crate::wheel::scroll_lock;
use theme::Theme;

const BACK_LABEL: &str = "← Back";

pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.size();
    let theme = {
        let config = app.state.config.read();
        Theme::from_config(&config)
    };

    let background = Block::default().style(Style::default().bg(Color::Reset));
    f.render_widget(background, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Wheel + side panel
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_header(f, chunks[0], &mut app.state, &theme);

    match app.state.router.screen() {
        ScreenKind::Home => screens::home::render(f, chunks[1], &mut app.state, &theme),
        ScreenKind::Day(_) => screens::day::render(f, chunks[1], &mut app.state, &theme),
    }

    render_footer(f, chunks[2], &app.state, &theme);

    if app.state.diagnostics_open {
        render_diagnostics(f, size, &app.state, &theme);
    }
}

fn render_header(f: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.foreground));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let title_style = Style::default()
        .fg(theme.foreground)
        .add_modifier(Modifier::BOLD);

    match state.router.screen() {
        ScreenKind::Home => {
            state.back_button = None;
            let app_name = state.config.read().general.app_name.clone();
            let text = Paragraph::new(vec![
                Line::from(Span::styled(truncate_to_width(&app_name, width), title_style)),
                Line::from(Span::styled(
                    "Weekly meal plan",
                    Style::default().fg(theme.muted),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(text, inner);
        }
        ScreenKind::Day(index) => {
            let button = Rect {
                x: inner.x,
                y: inner.y,
                width: (BACK_LABEL.chars().count() as u16 + 2).min(inner.width),
                height: 1.min(inner.height),
            };
            state.back_button = Some(button);

            let focus = state
                .router
                .day()
                .and_then(|d| d.plan.as_ref())
                .map(|p| p.focus.clone())
                .unwrap_or_default();
            let mut lines = vec![Line::from(Span::styled(
                WEEKDAYS[index].to_uppercase(),
                title_style,
            ))];
            if !focus.is_empty() {
                lines.push(Line::from(Span::styled(
                    truncate_to_width(&format!("({})", focus), width),
                    Style::default().fg(theme.muted),
                )));
            }
            f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

            f.render_widget(
                Paragraph::new(format!("[{}]", BACK_LABEL))
                    .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                button,
            );
        }
    }
}

pub(crate) fn render_side_panel(
    f: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    state: &mut AppState,
    theme: &Theme,
) {
    let max_scroll = (lines.len() as u16).saturating_sub(1);
    state.page_scroll = state.page_scroll.min(max_scroll);
    state.page_area = Some(area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(theme.foreground))
        .scroll((state.page_scroll, 0));

    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let help = match state.router.screen() {
        ScreenKind::Home => "[↑/↓] Turn │ [Enter] Open │ [F1] Diagnostics │ [q] Quit │ ",
        ScreenKind::Day(_) => "[↑/↓] Turn │ [←/→] Day │ [Esc] Back │ [F1] Diagnostics │ ",
    };

    let mut selected = WEEKDAYS[state.router.active_day()].to_string();
    if let Some(wheel) = state.router.day().and_then(|d| d.wheel.as_ref()) {
        let entry = match wheel.active_item() {
            DayEntry::Meal(meal) => meal.name.as_str(),
            DayEntry::Summary { .. } => "Summary",
        };
        selected = format!("{} · {}", selected, entry);
    }

    let spans = vec![
        Span::raw(help),
        Span::styled(
            format!("({})", selected),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.muted));

    f.render_widget(paragraph, area);
}

fn render_diagnostics(f: &mut Frame, _area: Rect, state: &AppState, theme: &Theme) {
    let popup_area = centered_rect(60, 60, f.size());

    f.render_widget(Clear, popup_area);

    let (wheel_len, active, dragging, line_visible, bounds) = match state.router.screen() {
        ScreenKind::Home => {
            let wheel = &state.router.home().wheel;
            (
                wheel.len(),
                wheel.active_index(),
                wheel.is_dragging(),
                wheel.center_line_visible(),
                wheel.bounds(),
            )
        }
        ScreenKind::Day(_) => match state.router.day().and_then(|d| d.wheel.as_ref()) {
            Some(wheel) => (
                wheel.len(),
                wheel.active_index(),
                wheel.is_dragging(),
                wheel.center_line_visible(),
                wheel.bounds(),
            ),
            None => (0, 0, false, false, None),
        },
    };
    let wheel_area = bounds
        .map(|b| format!("{}x{} at {},{}", b.width, b.height, b.x, b.y))
        .unwrap_or_else(|| "hidden".to_string());

    let mouse_support = state.config.read().ui.mouse_support;
    let rows = [
        ("Config", state.config_path.display().to_string()),
        ("Meal plan", state.router.plan().source().to_string()),
        ("Days loaded", state.router.plan().days().len().to_string()),
        ("Screen", state.router.screen().as_str().to_string()),
        ("Active day", WEEKDAYS[state.router.active_day()].to_string()),
        ("Wheel", format!("{}/{}", active + 1, wheel_len)),
        ("Wheel area", wheel_area),
        ("Dragging", dragging.to_string()),
        ("Center line", line_visible.to_string()),
        ("Scroll locks", scroll_lock::active_count().to_string()),
        ("Mouse", mouse_support.to_string()),
    ];

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", label), Style::default().fg(theme.muted)),
                Span::styled(value, Style::default().fg(theme.foreground)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Diagnostics (F1)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
