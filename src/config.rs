use chrono::NaiveDate;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealprep_mealplan::{RuleCollection, RuleKind};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory of `<Meal Name>.yaml` recipe files
    #[serde(default = "default_recipes_dir")]
    pub recipes_dir: PathBuf,
    #[serde(default = "default_diary_file")]
    pub diary_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            recipes_dir: default_recipes_dir(),
            diary_file: default_diary_file(),
        }
    }
}

fn default_recipes_dir() -> PathBuf {
    PathBuf::from("data/meals")
}

fn default_diary_file() -> PathBuf {
    PathBuf::from("data/meal_diary.json")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlanConfig {
    /// Dates to plan when none are given on the command line
    #[serde(default)]
    pub dates: Vec<String>,
    /// Rule names; every built-in rule when unset
    #[serde(default)]
    pub rules: Option<Vec<String>>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PlanConfig {
    pub fn dates(&self) -> mealprep_shared::Result<Vec<NaiveDate>> {
        self.dates
            .iter()
            .map(|d| mealprep_shared::parse_date(d))
            .collect()
    }

    pub fn rule_collection(&self) -> mealprep_shared::Result<RuleCollection> {
        match &self.rules {
            Some(names) => RuleCollection::from_names(names),
            None => Ok(RuleCollection::from_kinds(RuleKind::all())),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_max_entries")]
    pub max_before: usize,
    #[serde(default = "default_max_entries")]
    pub max_after: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_before: default_max_entries(),
            max_after: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    7
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALPREP__DATA__DIARY_FILE, etc.)
    /// 2. Config file given by path, MEALPREP_CONFIG or config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_file_path = config_path
            .or_else(|| env::var("MEALPREP_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Missing file is fine, defaults cover every key
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALPREP")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("plan.dates")
                .with_list_parse_key("plan.rules")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.plan.dates().map_err(|e| format!("plan.dates: {e}"))?;
        self.plan
            .rule_collection()
            .map_err(|e| format!("plan.rules: {e}"))?;

        if self.data.recipes_dir.as_os_str().is_empty() {
            return Err("data.recipes_dir must not be empty".to_string());
        }
        if self.data.diary_file.as_os_str().is_empty() {
            return Err("data.diary_file must not be empty".to_string());
        }

        Ok(())
    }
}
