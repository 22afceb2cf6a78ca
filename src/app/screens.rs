use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::sync::Arc;

use super::Config;
use crate::plan::{DayEntry, DayPlan, MealPlan, WEEKDAYS};
use crate::ui::screens::{day, home};
use crate::wheel::{Wheel, WheelResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Home,
    Day(usize),
}

impl ScreenKind {
    pub fn as_str(&self) -> &str {
        match self {
            ScreenKind::Home => "home",
            ScreenKind::Day(_) => "day",
        }
    }
}

pub struct HomeScreen {
    pub wheel: Wheel<&'static str>,
}

pub struct DayScreen {
    pub day_index: usize,
    pub plan: Option<DayPlan>,
    pub wheel: Option<Wheel<DayEntry>>,
}

pub struct Router {
    config: Arc<RwLock<Config>>,
    plan: Arc<MealPlan>,
    active_day: Arc<RwLock<usize>>,
    home: HomeScreen,
    day: Option<DayScreen>,
}

impl Router {
    pub fn new(config: Arc<RwLock<Config>>, plan: Arc<MealPlan>, start_day: usize) -> Result<Self> {
        let active_day = Arc::new(RwLock::new(start_day % WEEKDAYS.len()));
        let home = build_home(&config, &active_day)?;

        Ok(Self {
            config,
            plan,
            active_day,
            home,
            day: None,
        })
    }

    pub fn screen(&self) -> ScreenKind {
        match &self.day {
            Some(day) => ScreenKind::Day(day.day_index),
            None => ScreenKind::Home,
        }
    }

    pub fn active_day(&self) -> usize {
        *self.active_day.read()
    }

    pub fn plan(&self) -> &MealPlan {
        &self.plan
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut HomeScreen {
        &mut self.home
    }

    pub fn day(&self) -> Option<&DayScreen> {
        self.day.as_ref()
    }

    pub fn day_mut(&mut self) -> Option<&mut DayScreen> {
        self.day.as_mut()
    }

    pub fn open_day(&mut self, index: usize) {
        let index = index % WEEKDAYS.len();
        *self.active_day.write() = index;
        self.home.wheel.hide();
        self.day = Some(build_day(&self.config, &self.plan, index));
        log::debug!("navigate -> day {} ({})", index, WEEKDAYS[index]);
    }

    pub fn shift_day(&mut self, delta: i32) {
        if let Some(current) = self.day.as_ref().map(|d| d.day_index) {
            let len = WEEKDAYS.len() as i64;
            let next = (current as i64 + i64::from(delta)).rem_euclid(len) as usize;
            self.open_day(next);
        }
    }

    pub fn back(&mut self) {
        if self.day.take().is_some() {
            let index = self.active_day();
            self.home.wheel.sync_external(index);
            // The home wheel was off screen; show it already at rest
            self.home.wheel.settle();
            log::debug!("navigate -> home (day {})", index);
        }
    }

    pub fn advance(&mut self, direction: i32) {
        match self.day.as_mut() {
            Some(day) => {
                if let Some(wheel) = day.wheel.as_mut() {
                    wheel.advance(direction);
                }
            }
            None => {
                self.home.wheel.advance(direction);
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) -> WheelResponse {
        match self.day.as_mut() {
            Some(day) => day
                .wheel
                .as_mut()
                .map(|w| w.handle_mouse(mouse))
                .unwrap_or(WheelResponse::Ignored),
            None => self.home.wheel.handle_mouse(mouse),
        }
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        match self.day.as_mut() {
            Some(day) => day.wheel.as_mut().map(|w| w.tick(dt)).unwrap_or(false),
            None => self.home.wheel.tick(dt),
        }
    }
}

fn build_home(config: &Arc<RwLock<Config>>, active_day: &Arc<RwLock<usize>>) -> Result<HomeScreen> {
    let options = {
        let cfg = config.read();
        cfg.wheel.options(cfg.wheel.home_item_height, *active_day.read())
    };

    let context = Arc::clone(active_day);
    let wheel = Wheel::new(
        WEEKDAYS.to_vec(),
        home::day_item_renderer(Arc::clone(config)),
        Some(Box::new(move |day: &&'static str| {
            if let Some(index) = WEEKDAYS.iter().position(|d| d == day) {
                *context.write() = index;
            }
        })),
        options,
    )
    .context("Failed to build home wheel")?;

    Ok(HomeScreen { wheel })
}

fn build_day(config: &Arc<RwLock<Config>>, plan: &MealPlan, index: usize) -> DayScreen {
    let Some(day_plan) = plan.day_at(index).cloned() else {
        log::error!("Day not found in meal plan: {}", WEEKDAYS[index]);
        return DayScreen {
            day_index: index,
            plan: None,
            wheel: None,
        };
    };

    let options = {
        let cfg = config.read();
        let mut options = cfg.wheel.options(cfg.wheel.day_item_height, 0);
        options.hide_center_line_for_last_item = cfg.wheel.hide_center_line_on_summary;
        options
    };

    let wheel = Wheel::new(
        day_plan.wheel_entries(),
        day::entry_renderer(Arc::clone(config)),
        Some(Box::new(|entry: &DayEntry| match entry {
            DayEntry::Meal(meal) => log::debug!("meal selected: {}", meal.name),
            DayEntry::Summary { .. } => log::debug!("day summary selected"),
        })),
        options,
    );

    match wheel {
        Ok(wheel) => DayScreen {
            day_index: index,
            plan: Some(day_plan),
            wheel: Some(wheel),
        },
        Err(e) => {
            log::error!("Failed to build day wheel for {}: {}", WEEKDAYS[index], e);
            DayScreen {
                day_index: index,
                plan: Some(day_plan),
                wheel: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DataSource;

    fn router_with(plan: MealPlan, start_day: usize) -> Router {
        let config = Arc::new(RwLock::new(Config::bundled().unwrap()));
        Router::new(config, Arc::new(plan), start_day).expect("router")
    }

    fn router(start_day: usize) -> Router {
        router_with(MealPlan::bundled().unwrap(), start_day)
    }

    #[test]
    fn starts_on_home_with_requested_day() {
        let router = router(9);
        assert_eq!(router.screen(), ScreenKind::Home);
        assert_eq!(router.active_day(), 2);
        assert_eq!(router.home().wheel.active_index(), 2);
    }

    #[test]
    fn home_selection_updates_active_day() {
        let mut router = router(0);
        router.advance(-1);
        assert_eq!(router.home().wheel.active_index(), 1);
        assert_eq!(router.active_day(), 1);
    }

    #[test]
    fn open_and_back_restores_home_selection() {
        let mut router = router(0);
        router.open_day(3);
        assert_eq!(router.screen(), ScreenKind::Day(3));
        assert_eq!(router.home().wheel.bounds(), None);

        router.shift_day(1);
        assert_eq!(router.screen(), ScreenKind::Day(4));
        router.shift_day(-5);
        assert_eq!(router.screen(), ScreenKind::Day(6));

        router.back();
        assert_eq!(router.screen(), ScreenKind::Home);
        assert_eq!(router.home().wheel.active_index(), 6);
        assert_eq!(router.active_day(), 6);
        let wheel = &router.home().wheel;
        assert_eq!(wheel.displayed_placement(0), wheel.placement(0));
        assert!(!router.tick(1.0 / 60.0));
    }

    #[test]
    fn day_wheel_lists_meals_then_summary() {
        let mut router = router(0);
        router.open_day(0);

        let day = router.day().expect("day screen");
        let wheel = day.wheel.as_ref().expect("wheel");
        let meals = day.plan.as_ref().unwrap().meals.len();
        assert_eq!(wheel.len(), meals + 1);
        assert!(matches!(wheel.items().last(), Some(DayEntry::Summary { .. })));
        assert!(!wheel.options().hide_center_line_for_last_item);
    }

    #[test]
    fn summary_center_line_follows_config() {
        let mut router = router(0);
        router.config.write().wheel.hide_center_line_on_summary = true;
        router.open_day(0);

        let wheel = router.day().unwrap().wheel.as_ref().unwrap();
        assert!(wheel.options().hide_center_line_for_last_item);
    }

    #[test]
    fn missing_day_shows_empty_state() {
        let plan = MealPlan::from_json(r#"[{"day": "Monday", "meals": []}]"#, DataSource::Bundled)
            .unwrap();
        let mut router = router_with(plan, 0);

        router.open_day(5);
        let day = router.day().unwrap();
        assert!(day.plan.is_none());
        assert!(day.wheel.is_none());

        // Keys on an empty day are harmless.
        router.advance(1);
        assert!(!router.tick(0.016));
    }
}
