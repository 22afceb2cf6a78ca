pub mod config;
pub mod screens;
pub mod state;

pub use config::{Config, ConfigManager};
pub use screens::{Router, ScreenKind};
pub use state::AppState;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use std::env;

use crate::plan::MealPlan;

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new() -> Result<Self> {
        let mut config_path = env::current_exe()?;
        config_path.set_file_name("config.toml");

        let config = Config::load_or_default(&config_path)?;
        let plan = MealPlan::load_or_bundled(config.general.data_path())?;
        log::info!(
            "Loaded meal plan ({} days) from {}",
            plan.days().len(),
            plan.source()
        );

        // The watcher thread keeps its own handle on the shared config
        let config_manager = ConfigManager::new(config, config_path.clone());

        // Start watching for config changes
        if let Err(e) = config_manager.clone().watch() {
            log::warn!("Failed to start config hot reload: {}", e);
        } else {
            log::info!("Config hot reload enabled");
        }

        let state = AppState::new(config_manager.get_config(), config_path, plan)?;

        Ok(Self { state })
    }

    pub fn handle_event(&mut self, event: CrosstermEvent) -> Result<bool> {
        self.state.handle_event(event)
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.state.config.read().general.tick_rate_ms
    }
}
