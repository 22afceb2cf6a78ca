use anyhow::Result;
use chrono::{Datelike, Local};
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use parking_lot::RwLock;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::Arc;

use super::{Config, Router, ScreenKind};
use crate::plan::MealPlan;
use crate::wheel::{scroll_lock, WheelResponse};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub config_path: PathBuf,
    pub router: Router,

    // UI state
    pub diagnostics_open: bool,
    pub page_scroll: u16,
    pub page_area: Option<Rect>,
    pub back_button: Option<Rect>,
    animating: bool,
}

impl AppState {
    pub fn new(config: Arc<RwLock<Config>>, config_path: PathBuf, plan: MealPlan) -> Result<Self> {
        let start_day = if config.read().general.start_on_today {
            Local::now().weekday().num_days_from_monday() as usize
        } else {
            0
        };

        let router = Router::new(Arc::clone(&config), Arc::new(plan), start_day)?;

        Ok(Self {
            config,
            config_path,
            router,

            diagnostics_open: false,
            page_scroll: 0,
            page_area: None,
            back_button: None,
            animating: false,
        })
    }

    /// Returns `Ok(false)` when the app should exit.
    pub fn handle_event(&mut self, event: CrosstermEvent) -> Result<bool> {
        match event {
            CrosstermEvent::Key(key_event) => Ok(self.handle_key_event(key_event)),
            CrosstermEvent::Mouse(mouse_event) => {
                self.handle_mouse_event(mouse_event);
                Ok(true)
            }
            _ => Ok(true),
        }
    }

    /// Returns true when the frame changed and needs a redraw.
    pub fn on_tick(&mut self, dt: f32) -> bool {
        let moving = self.router.tick(dt);
        // The settling step still moves items onto their targets
        let changed = moving || self.animating;
        self.animating = moving;
        changed
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        // Windows reports releases too
        if key.kind != KeyEventKind::Press {
            return true;
        }

        // Handle Ctrl+C to quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return false;
        }

        if key.code == KeyCode::F(1) {
            self.diagnostics_open = !self.diagnostics_open;
            return true;
        }

        if self.diagnostics_open {
            if key.code == KeyCode::Esc {
                self.diagnostics_open = false;
            }
            return true;
        }

        let step = self.config.read().ui.page_scroll_step.max(1);

        // Keys shared by both screens. Up shows the previous item, like a
        // downward swipe.
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Up | KeyCode::Char('k') => {
                self.router.advance(1);
                return true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.router.advance(-1);
                return true;
            }
            KeyCode::PageUp => {
                self.page_scroll = self.page_scroll.saturating_sub(step * 5);
                return true;
            }
            KeyCode::PageDown => {
                self.page_scroll = self.page_scroll.saturating_add(step * 5);
                return true;
            }
            _ => {}
        }

        match self.router.screen() {
            ScreenKind::Home => {
                if let KeyCode::Enter | KeyCode::Char(' ') = key.code {
                    let index = self.router.home().wheel.active_index();
                    self.open_day(index);
                }
            }
            ScreenKind::Day(_) => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.go_back(),
                KeyCode::Left | KeyCode::Char('h') => {
                    self.router.shift_day(-1);
                    self.page_scroll = 0;
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.router.shift_day(1);
                    self.page_scroll = 0;
                }
                _ => {}
            },
        }

        true
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let (mouse_support, step) = {
            let config = self.config.read();
            (config.ui.mouse_support, config.ui.page_scroll_step.max(1))
        };
        if !mouse_support {
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if scroll_lock::intercepts(mouse.column, mouse.row) {
                    log::trace!("page scroll suppressed over wheel at {},{}", mouse.column, mouse.row);
                    return;
                }
                let over_page = self
                    .page_area
                    .map(|area| scroll_lock::contains(area, mouse.column, mouse.row))
                    .unwrap_or(false);
                if over_page {
                    self.page_scroll = if mouse.kind == MouseEventKind::ScrollUp {
                        self.page_scroll.saturating_sub(step)
                    } else {
                        self.page_scroll.saturating_add(step)
                    };
                }
                return;
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let on_back = self
                    .back_button
                    .map(|button| scroll_lock::contains(button, mouse.column, mouse.row))
                    .unwrap_or(false);
                if on_back && matches!(self.router.screen(), ScreenKind::Day(_)) {
                    self.go_back();
                    return;
                }
            }
            _ => {}
        }

        if let WheelResponse::Clicked { index, was_active: true } = self.router.handle_mouse(mouse) {
            if self.router.screen() == ScreenKind::Home {
                self.open_day(index);
            }
        }
    }

    fn open_day(&mut self, index: usize) {
        self.router.open_day(index);
        self.page_scroll = 0;
    }

    fn go_back(&mut self) {
        self.router.back();
        self.back_button = None;
        self.page_scroll = 0;
    }
}
