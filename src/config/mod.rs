//! Process-wide generator configuration: global defaults, override layers and
//! hierarchy catalogs. Built once (from the Acme defaults or a file), validated
//! eagerly, then only read.

mod defaults;
mod error;
mod loader;

use serde::{Deserialize, Serialize};

use crate::constraints::{resolve, ConfigLayer, ConstraintSet, Percent};

pub use defaults::{acme_brand_overrides, acme_catalog, acme_global_defaults, acme_portfolio_overrides};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, ConfigFormat, CONFIG_ENV_VAR};

/// Inclusive integer range used for sampling. Serialized as `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct IntRange {
    pub low: i64,
    pub high: i64,
}

impl IntRange {
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }
}

impl From<(i64, i64)> for IntRange {
    fn from((low, high): (i64, i64)) -> Self {
        Self { low, high }
    }
}

impl From<IntRange> for (i64, i64) {
    fn from(range: IntRange) -> Self {
        (range.low, range.high)
    }
}

/// Lowest-priority constraint tier plus the sampling ranges, which are never overridden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalDefaults {
    #[serde(flatten)]
    pub constraints: ConstraintSet,
    /// Margin percentage bounds.
    pub margin_range: IntRange,
    /// Initial sales bounds, in currency units.
    pub sales_range: IntRange,
}

/// The five categorical dimensions a record draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyCatalog {
    pub portfolios: Vec<String>,
    pub geographies: Vec<String>,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub segments: Vec<String>,
}

impl HierarchyCatalog {
    /// Catalogs in draw order, with their names.
    pub fn dimensions(&self) -> [(&'static str, &[String]); 5] {
        [
            ("portfolios", &self.portfolios),
            ("geographies", &self.geographies),
            ("categories", &self.categories),
            ("brands", &self.brands),
            ("segments", &self.segments),
        ]
    }
}

/// Serializes to the same shape [load_config] reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorConfig {
    pub global: GlobalDefaults,
    pub portfolio_overrides: ConfigLayer,
    pub brand_overrides: ConfigLayer,
    pub hierarchy: HierarchyCatalog,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::acme()
    }
}

impl GeneratorConfig {
    /// Built-in Acme configuration. Kilian, Balmain and Aveda intentionally have no
    /// brand override and resolve to the portfolio/global tiers.
    pub fn acme() -> Self {
        Self {
            global: acme_global_defaults(),
            portfolio_overrides: acme_portfolio_overrides(),
            brand_overrides: acme_brand_overrides(),
            hierarchy: acme_catalog(),
        }
    }

    /// Check sampling ranges, catalogs and that every constraint bound is finite.
    /// Whether `min <= max` holds for a constraint pair is not checked.
    pub fn validate(&self) -> ConfigResult<()> {
        let global = self
            .global
            .constraints
            .fields()
            .into_iter()
            .map(|(field, value)| (format!("global.{field}"), value));
        let mut bounds = global
            .chain(overridden_fields("portfolio_overrides", &self.portfolio_overrides))
            .chain(overridden_fields("brand_overrides", &self.brand_overrides));
        if let Some((field, value)) = bounds.find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFiniteConstraint {
                field,
                value: value.as_f64(),
            });
        }

        for (name, range) in [
            ("margin_range", self.global.margin_range),
            ("sales_range", self.global.sales_range),
        ] {
            if range.low > range.high {
                return Err(ConfigError::InvalidRange {
                    name,
                    low: range.low,
                    high: range.high,
                });
            }
        }
        for (name, values) in self.hierarchy.dimensions() {
            if values.is_empty() {
                return Err(ConfigError::EmptyCatalog(name));
            }
        }
        Ok(())
    }

    /// Effective constraints for a (portfolio, brand) pair.
    pub fn resolve(&self, portfolio: &str, brand: &str) -> ConstraintSet {
        resolve(
            &self.global.constraints,
            &self.portfolio_overrides,
            &self.brand_overrides,
            portfolio,
            brand,
        )
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

fn overridden_fields<'a>(
    tier: &'a str,
    layer: &'a ConfigLayer,
) -> impl Iterator<Item = (String, Percent)> + 'a {
    layer.iter().flat_map(move |(name, overrides)| {
        overrides
            .fields()
            .map(move |(field, value)| (format!("{tier}.{name}.{field}"), value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acme_config_is_valid() {
        assert!(GeneratorConfig::acme().validate().is_ok());
    }

    #[test]
    fn inverted_sales_range_is_rejected() {
        let mut config = GeneratorConfig::acme();
        config.global.sales_range = IntRange::new(10, 1);
        match config.validate() {
            Err(ConfigError::InvalidRange { name, low, high }) => {
                assert_eq!(name, "sales_range");
                assert_eq!((low, high), (10, 1));
            }
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn single_value_range_is_valid() {
        let mut config = GeneratorConfig::acme();
        config.global.margin_range = IntRange::new(45, 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let mut config = GeneratorConfig::acme();
        config.hierarchy.segments.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyCatalog("segments"))
        ));
    }

    #[test]
    fn non_finite_override_is_rejected() {
        let mut config = GeneratorConfig::acme();
        if let Some(overrides) = config.brand_overrides.get_mut("Frederic Malle") {
            overrides.max_trend = Some(Percent::Float(f64::INFINITY));
        }
        match config.validate() {
            Err(ConfigError::NonFiniteConstraint { field, .. }) => {
                assert_eq!(field, "brand_overrides.Frederic Malle.max_trend");
            }
            other => panic!("expected NonFiniteConstraint, got {other:?}"),
        }
    }

    #[test]
    fn fractional_bounds_are_valid() {
        let mut config = GeneratorConfig::acme();
        config.global.constraints.min_trend = Percent::Float(-2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn int_range_serializes_as_pair() {
        let json = serde_json::to_string(&IntRange::new(30, 60)).unwrap();
        assert_eq!(json, "[30,60]");
        let back: IntRange = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(back, IntRange::new(1, 2));
    }

    #[test]
    fn yaml_dump_round_trips() {
        let config = GeneratorConfig::acme();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("Hair/APDO"));
        let parsed = GeneratorConfig::from_text(&yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
