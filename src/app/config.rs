use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::wheel::{Falloff, Spring, Thresholds, WheelOptions};

// Embedded default configuration that can be written next to the executable
// when an external config file is missing.
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub wheel: WheelConfig,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub app_name: String,
    pub tick_rate_ms: u64,
    #[serde(default)]
    pub start_on_today: bool,
    /// Meal plan JSON to use instead of the bundled one. Empty = bundled.
    #[serde(default)]
    pub data_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WheelConfig {
    pub home_item_height: f32,
    pub day_item_height: f32,
    pub threshold_up: f32,
    pub threshold_down: f32,
    pub scale_step: f32,
    pub opacity_step: f32,
    pub clamp_placement: bool,
    pub hide_center_line_on_summary: bool,
    #[serde(default)]
    pub spring: SpringConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        let spring = Spring::default();
        Self {
            stiffness: spring.stiffness,
            damping: spring.damping,
            mass: spring.mass,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub mouse_support: bool,
    pub page_scroll_step: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub dark: DarkTheme,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DarkTheme {
    pub background: String,
    pub foreground: String,
    pub accent: String,
    pub muted: String,
    pub summary: String,
}

impl WheelConfig {
    pub fn options(&self, item_height: f32, initial_index: usize) -> WheelOptions {
        WheelOptions {
            initial_index,
            hide_center_line_for_last_item: false,
            item_height: item_height.max(1.0),
            thresholds: Thresholds {
                up: self.threshold_up,
                down: self.threshold_down,
            },
            falloff: Falloff {
                scale_step: self.scale_step,
                opacity_step: self.opacity_step,
                clamp: self.clamp_placement,
            },
            spring: Spring {
                stiffness: self.spring.stiffness,
                damping: self.spring.damping,
                mass: self.spring.mass,
            },
        }
    }
}

impl GeneralConfig {
    pub fn data_path(&self) -> Option<&Path> {
        let trimmed = self.data_file.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Path::new(trimmed))
        }
    }
}

impl Config {
    pub fn bundled() -> Result<Self> {
        toml::from_str(DEFAULT_CONFIG).context("Failed to parse bundled default config")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Ok(config) => Ok(config),
            Err(load_err) => {
                log::warn!(
                    "Falling back to bundled default config: {}. A new config will be written to {:?} if possible.",
                    load_err,
                    path.as_ref()
                );

                let default_config = Self::bundled()?;

                if let Err(save_err) = default_config.save(path.as_ref()) {
                    log::warn!("Failed to write default config: {}", save_err);
                }

                Ok(default_config)
            }
        }
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<Config>>,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config: Config, config_path: PathBuf) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    pub fn get_config(&self) -> Arc<RwLock<Config>> {
        Arc::clone(&self.config)
    }

    pub fn watch(self: Arc<Self>) -> Result<()> {
        use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
        use std::sync::mpsc::channel;

        let (tx, rx) = channel::<Result<Event, notify::Error>>();

        let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())
            .context("Failed to create file watcher")?;

        watcher
            .watch(self.config_path.as_ref(), RecursiveMode::NonRecursive)
            .context("Failed to watch config file")?;

        let config = Arc::clone(&self.config);
        let config_path = self.config_path.clone();

        std::thread::spawn(move || {
            // Keep watcher alive
            let _watcher = watcher;

            loop {
                match rx.recv() {
                    Ok(Ok(event)) => {
                        use notify::EventKind;
                        if let EventKind::Modify(_) | EventKind::Create(_) = event.kind {
                            // Small delay to ensure file is fully written
                            std::thread::sleep(std::time::Duration::from_millis(100));

                            match Config::load(&config_path) {
                                Ok(new_config) => {
                                    *config.write() = new_config;
                                    log::info!("Configuration reloaded successfully");
                                }
                                Err(e) => {
                                    log::error!("Failed to reload config: {}", e);
                                }
                            }
                        }
                    }
                    Ok(Err(e)) => {
                        log::error!("Watch error: {:?}", e);
                    }
                    Err(e) => {
                        log::error!("Channel error: {:?}", e);
                        break;
                    }
                }
            }
        });

        Ok(())
    }
}
