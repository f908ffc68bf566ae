use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::categorize::CategoryRules;
use crate::import::ErrorPolicy;

const CONFIG_FILE: &str = "config.json";

/// Statements carry no year, so every compact date lands in this one.
pub(crate) const DEFAULT_YEAR: i32 = 2022;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) year: i32,
    pub(crate) on_error: ErrorPolicy,
    pub(crate) rules: CategoryRules,
    /// Named keyword lists for `search --set` and `sum --set`.
    pub(crate) keyword_sets: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            on_error: ErrorPolicy::default(),
            rules: CategoryRules::default(),
            keyword_sets: default_keyword_sets(),
        }
    }
}

fn default_keyword_sets() -> BTreeMap<String, Vec<String>> {
    let sets: [(&str, &[&str]); 8] = [
        ("uber", &["UBER"]),
        ("amazon", &["Amazon", "AMZ"]),
        (
            "groceries",
            &[
                "FARMBOY",
                "FOOD BASICS",
                "GALLERIA",
                "HMART",
                "H-MART",
                "IKEA",
                "LCBO",
                "LONGOS",
                "NOFRILLS",
                "SHOPPERS",
                "T&T",
            ],
        ),
        ("rogers", &["ROGERS"]),
        ("presto", &["PRESTO"]),
        ("nslsc", &["NSLSC"]),
        ("games", &["GOG", "HUMBLEBUNDLE", "SteamPurchase"]),
        ("minis", &["401", "MEEPLEMART"]),
    ];
    sets.into_iter()
        .map(|(name, words)| {
            (
                name.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

impl Config {
    /// Load `explicit` if given, else the per-user config file if it
    /// exists, else the defaults.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub(crate) fn keyword_set(&self, name: &str) -> Result<&[String]> {
        self.keyword_sets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow::anyhow!("Unknown keyword set: {name}"))
    }
}

fn default_config_path() -> Option<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendtrail", "spendtrail")?;
    Some(proj_dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests;
