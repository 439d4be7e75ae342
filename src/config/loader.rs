//! Load a [GeneratorConfig] from YAML or JSON and validate it before use.
//!
//! File shape (YAML):
//!
//! ```yaml
//! global:
//!   min_trend: -5
//!   max_trend: 15
//!   min_contribution: 5
//!   max_contribution: 40
//!   margin_range: [30, 60]
//!   sales_range: [500000, 5000000]
//! portfolio_overrides:
//!   Hair/APDO: { min_trend: 0, max_contribution: 30 }
//! brand_overrides:
//!   Frederic Malle: { min_trend: -3, max_trend: 4 }
//! hierarchy:            # optional; defaults to the Acme catalog
//!   portfolios: [...]
//!   geographies: [...]
//!   categories: [...]
//!   brands: [...]
//!   segments: [...]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::{
    acme_catalog, ConfigError, ConfigResult, GeneratorConfig, GlobalDefaults, HierarchyCatalog,
    IntRange,
};
use crate::constraints::{ConfigLayer, ConstraintSet, Percent};

/// Environment variable naming the config file used when none is passed explicitly.
pub const CONFIG_ENV_VAR: &str = "ACME_SYNTH_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` is JSON; everything else is treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GlobalSection {
    min_trend: Option<Percent>,
    max_trend: Option<Percent>,
    min_contribution: Option<Percent>,
    max_contribution: Option<Percent>,
    margin_range: Option<IntRange>,
    sales_range: Option<IntRange>,
}

impl GlobalSection {
    fn into_defaults(self) -> ConfigResult<GlobalDefaults> {
        fn required<T>(value: Option<T>, name: &'static str) -> ConfigResult<T> {
            value.ok_or(ConfigError::MissingField(name))
        }
        Ok(GlobalDefaults {
            constraints: ConstraintSet {
                min_trend: required(self.min_trend, "min_trend")?,
                max_trend: required(self.max_trend, "max_trend")?,
                min_contribution: required(self.min_contribution, "min_contribution")?,
                max_contribution: required(self.max_contribution, "max_contribution")?,
            },
            margin_range: required(self.margin_range, "margin_range")?,
            sales_range: required(self.sales_range, "sales_range")?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    global: GlobalSection,
    #[serde(default)]
    portfolio_overrides: ConfigLayer,
    #[serde(default)]
    brand_overrides: ConfigLayer,
    #[serde(default)]
    hierarchy: Option<HierarchyCatalog>,
}

impl GeneratorConfig {
    /// Parse and validate configuration text. `Parse` errors carry `<inline>` as the path.
    pub fn from_text(raw: &str, format: ConfigFormat) -> ConfigResult<Self> {
        parse(raw, format, "<inline>")
    }
}

fn parse(raw: &str, format: ConfigFormat, origin: &str) -> ConfigResult<GeneratorConfig> {
    let file: ConfigFile = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(raw).map_err(|err| err.to_string()),
        ConfigFormat::Json => serde_json::from_str(raw).map_err(|err| err.to_string()),
    }
    .map_err(|message| ConfigError::Parse {
        path: origin.to_string(),
        message,
    })?;

    let config = GeneratorConfig {
        global: file.global.into_defaults()?,
        portfolio_overrides: file.portfolio_overrides,
        brand_overrides: file.brand_overrides,
        hierarchy: file.hierarchy.unwrap_or_else(acme_catalog),
    };
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a config file. Any failure is returned before generation starts.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<GeneratorConfig> {
    let path = path.as_ref();
    let shown = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: shown.clone(),
        source,
    })?;
    let config = parse(&raw, ConfigFormat::from_path(path), &shown)?;
    tracing::info!(
        path = %path.display(),
        portfolio_overrides = config.portfolio_overrides.len(),
        brand_overrides = config.brand_overrides.len(),
        "loaded generator config"
    );
    Ok(config)
}
