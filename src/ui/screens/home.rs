use parking_lot::RwLock;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders},
    Frame,
};
use std::sync::Arc;

use crate::app::{AppState, Config};
use crate::plan::WEEKDAYS;
use crate::ui::render_side_panel;
use crate::ui::theme::Theme;
use crate::ui::widgets::WheelView;
use crate::utils::text::truncate_to_width;
use crate::wheel::RenderItem;

const DAY_ICON: &str = "✔";

pub fn day_item_renderer(config: Arc<RwLock<Config>>) -> RenderItem<&'static str> {
    Box::new(move |day: &&'static str, is_active: bool, _distance: usize| {
        let theme = Theme::from_config(&config.read());
        let (icon_style, name_style) = if is_active {
            (
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                Style::default().add_modifier(Modifier::BOLD),
            )
        } else {
            (Style::default().fg(theme.muted), Style::default())
        };

        Text::from(vec![
            Line::default(),
            Line::from(vec![
                Span::styled(DAY_ICON, icon_style),
                Span::raw("  "),
                Span::styled(day.to_string(), name_style),
            ]),
        ])
    })
}

pub fn render(f: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let block = Block::default()
        .title("Days")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);
    f.render_stateful_widget(
        WheelView::new(theme),
        inner,
        &mut state.router.home_mut().wheel,
    );

    let lines = week_lines(state, theme, chunks[1].width.saturating_sub(2) as usize);
    render_side_panel(f, chunks[1], "Week at a glance", lines, state, theme);
}

fn week_lines(state: &AppState, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let active = state.router.home().wheel.active_index();
    let plan = state.router.plan();
    let mut lines = Vec::new();

    for (index, name) in WEEKDAYS.iter().enumerate() {
        let name_style = if index == active {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };

        match plan.day_at(index) {
            Some(day) => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<10}", name), name_style),
                    Span::raw(format!("{:>5} kcal", day.total_nutrition.calories)),
                ]));
                if !day.focus.is_empty() {
                    lines.push(Line::from(Span::styled(
                        truncate_to_width(&format!("  {}", day.focus), width),
                        Style::default().fg(theme.muted),
                    )));
                }
            }
            None => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<10}", name), name_style),
                    Span::styled("no plan", Style::default().fg(theme.muted)),
                ]));
            }
        }
    }

    lines
}
