use std::marker::PhantomData;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, StatefulWidget, Widget},
};

use crate::ui::theme::{fade, Theme};
use crate::wheel::{ItemSlot, Wheel};

// Below this opacity the terminal DIM attribute is added as well, for
// palettes that cannot be blended.
const DIM_BELOW: f32 = 0.75;

pub struct WheelView<T> {
    foreground: Color,
    background: Color,
    accent: Color,
    _items: PhantomData<fn(&T)>,
}

impl<T> WheelView<T> {
    pub fn new(theme: &Theme) -> Self {
        Self {
            foreground: theme.foreground,
            background: theme.background,
            accent: theme.accent,
            _items: PhantomData,
        }
    }
}

impl<T> StatefulWidget for WheelView<T> {
    type State = Wheel<T>;

    fn render(self, area: Rect, buf: &mut Buffer, wheel: &mut Wheel<T>) {
        if area.width == 0 || area.height == 0 {
            wheel.hide();
            return;
        }

        let item_height = wheel.item_height();
        let rows = item_height.round().max(1.0) as i32;
        let center = f32::from(area.y) + f32::from(area.height) / 2.0;
        let top_limit = i32::from(area.y);
        let bottom_limit = top_limit + i32::from(area.height);

        let mut order: Vec<usize> = (0..wheel.len()).collect();
        order.sort_by_key(|&index| wheel.displayed_placement(index).stack_order);

        let active = wheel.active_index();
        let show_line = wheel.center_line_visible();
        let mut slots = Vec::with_capacity(order.len());

        for index in order {
            let placement = wheel.displayed_placement(index);
            if placement.opacity <= 0.0 || placement.scale <= 0.0 {
                continue;
            }

            let top = (center + placement.offset - item_height / 2.0).round() as i32;
            let y0 = top.max(top_limit);
            let y1 = (top + rows).min(bottom_limit);
            if y1 <= y0 {
                continue;
            }

            let width = ((f32::from(area.width) * placement.scale).round() as u16).clamp(1, area.width);
            let x = area.x + (area.width - width) / 2;
            let rect = Rect::new(x, y0 as u16, width, (y1 - y0) as u16);

            let mut style =
                Style::default().fg(fade(self.foreground, self.background, placement.opacity));
            if placement.opacity < DIM_BELOW {
                style = style.add_modifier(Modifier::DIM);
            }

            let block = if index == active && show_line {
                Block::default()
                    .borders(Borders::LEFT)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(self.accent))
            } else {
                Block::default().padding(Padding::new(1, 0, 0, 0))
            };

            Clear.render(rect, buf);
            Paragraph::new(wheel.render_item(index))
                .block(block)
                .style(style)
                .scroll(((y0 - top) as u16, 0))
                .render(rect, buf);

            slots.push(ItemSlot { index, area: rect });
        }

        wheel.set_layout(area, slots);
    }
}
