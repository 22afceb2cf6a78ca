use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::json::parse_records;

const BUNDLED_PLAN: &str = include_str!("../../data/meals.json");

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
}

impl fmt::Display for Nutrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal (P: {}g, F: {}g, C: {}g)",
            self.calories, self.protein, self.fat, self.carbs
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub time: String,
    pub name: String,
    #[serde(default)]
    pub dishes: Vec<String>,
    #[serde(default)]
    pub nutrition: Nutrition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    #[serde(default)]
    pub focus: String,
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub hydration: String,
    #[serde(default, alias = "totalNutrition")]
    pub total_nutrition: Nutrition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayEntry {
    Meal(Meal),
    Summary {
        hydration: String,
        total: Nutrition,
    },
}

impl DayPlan {
    pub fn wheel_entries(&self) -> Vec<DayEntry> {
        let mut entries: Vec<DayEntry> = self.meals.iter().cloned().map(DayEntry::Meal).collect();
        entries.push(DayEntry::Summary {
            hydration: self.hydration.clone(),
            total: self.total_nutrition,
        });
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Bundled => write!(f, "bundled"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MealPlan {
    days: Vec<DayPlan>,
    source: DataSource,
}

impl MealPlan {
    pub fn from_json(input: &str, source: DataSource) -> Result<Self> {
        let days = parse_records(input, "days").context("Failed to parse meal plan")?;
        Ok(Self { days, source })
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PLAN, DataSource::Bundled)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read meal plan: {:?}", path.as_ref()))?;
        Self::from_json(&content, DataSource::File(path.as_ref().to_path_buf()))
    }

    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::bundled();
        };

        match Self::load(path) {
            Ok(plan) => Ok(plan),
            Err(e) => {
                log::warn!("Falling back to bundled meal plan: {:#}", e);
                Self::bundled()
            }
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn find_day(&self, name: &str) -> Option<&DayPlan> {
        self.days
            .iter()
            .find(|d| d.day == name || d.day.to_lowercase() == name.to_lowercase())
    }

    pub fn day_at(&self, index: usize) -> Option<&DayPlan> {
        WEEKDAYS.get(index).and_then(|name| self.find_day(name))
    }
}
