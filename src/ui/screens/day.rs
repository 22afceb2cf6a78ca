use parking_lot::RwLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;

use crate::app::{AppState, Config};
use crate::plan::{DayEntry, DayPlan, Meal, Nutrition, WEEKDAYS};
use crate::ui::render_side_panel;
use crate::ui::theme::Theme;
use crate::ui::widgets::WheelView;
use crate::utils::text::truncate_to_width;
use crate::wheel::RenderItem;

pub fn entry_renderer(config: Arc<RwLock<Config>>) -> RenderItem<DayEntry> {
    Box::new(move |entry: &DayEntry, is_active: bool, _distance: usize| {
        let theme = Theme::from_config(&config.read());
        match entry {
            DayEntry::Meal(meal) => meal_text(meal, is_active, &theme),
            DayEntry::Summary { hydration, total } => summary_text(hydration, total, is_active, &theme),
        }
    })
}

fn meal_text(meal: &Meal, is_active: bool, theme: &Theme) -> Text<'static> {
    let title_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut header = Vec::new();
    if !meal.time.is_empty() {
        header.push(Span::styled(meal.time.clone(), Style::default().fg(theme.accent)));
        header.push(Span::raw("  "));
    }
    header.push(Span::styled(meal.name.clone(), title_style));

    let mut lines = vec![Line::default(), Line::from(header)];
    lines.extend(
        meal.dishes
            .iter()
            .map(|dish| Line::from(format!("  • {}", dish))),
    );
    lines.push(Line::from(Span::styled(
        format!("Total: {}", meal.nutrition),
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    Text::from(lines)
}

fn summary_text(hydration: &str, total: &Nutrition, is_active: bool, theme: &Theme) -> Text<'static> {
    let mut title_style = Style::default().fg(theme.summary);
    if is_active {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    Text::from(vec![
        Line::default(),
        Line::from(Span::styled("Day summary", title_style)),
        Line::from(hydration.to_string()),
        Line::from(format!("Daily totals: ~{} kcal", total.calories)),
        Line::from(format!(
            "(P: {}g, F: {}g, C: {}g)",
            total.protein, total.fat, total.carbs
        )),
    ])
}

pub fn render(f: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let block = Block::default()
        .title("Meals")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    let Some(day) = state.router.day_mut() else {
        return;
    };
    let day_name = WEEKDAYS[day.day_index];

    match day.wheel.as_mut() {
        Some(wheel) => f.render_stateful_widget(WheelView::new(theme), inner, wheel),
        None => {
            let text = Paragraph::new(format!("No meal plan for {}", day_name))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted));
            f.render_widget(text, inner);
        }
    }

    let lines = match day.plan.as_ref() {
        Some(plan) => overview_lines(plan, theme, chunks[1].width.saturating_sub(2) as usize),
        None => Vec::new(),
    };
    render_side_panel(f, chunks[1], "Day overview", lines, state, theme);
}

fn overview_lines(plan: &DayPlan, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for meal in &plan.meals {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<6}", meal.time), Style::default().fg(theme.accent)),
            Span::styled(
                truncate_to_width(&meal.name, width.saturating_sub(16)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {} kcal", meal.nutrition.calories)),
        ]));
        for dish in &meal.dishes {
            lines.push(Line::from(Span::styled(
                truncate_to_width(&format!("      {}", dish), width),
                Style::default().fg(theme.muted),
            )));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        truncate_to_width(&plan.hydration, width),
        Style::default().fg(theme.summary),
    )));
    lines.push(Line::from(truncate_to_width(
        &format!("Total: {}", plan.total_nutrition),
        width,
    )));

    lines
}
