//! Field-wise override resolution: brand overrides portfolio overrides global.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Percent;

/// Effective trend and contribution bounds, in percent.
///
/// Consumers expect `min_trend <= max_trend` and `min_contribution <= max_contribution`,
/// but nothing here enforces it: an override that only raises `min_trend` above an
/// inherited `max_trend` yields an inconsistent set as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub min_trend: Percent,
    pub max_trend: Percent,
    pub min_contribution: Percent,
    pub max_contribution: Percent,
}

/// Any subset of the four constraint fields. `None` means "inherit from the lower tier".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConstraintSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_trend: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_trend: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_contribution: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_contribution: Option<Percent>,
}

impl PartialConstraintSet {
    /// Fields that are present, with their names.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Percent)> {
        [
            ("min_trend", self.min_trend),
            ("max_trend", self.max_trend),
            ("min_contribution", self.min_contribution),
            ("max_contribution", self.max_contribution),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.min_trend.is_none()
            && self.max_trend.is_none()
            && self.min_contribution.is_none()
            && self.max_contribution.is_none()
    }
}

/// Overrides keyed by portfolio or brand name.
pub type ConfigLayer = BTreeMap<String, PartialConstraintSet>;

impl ConstraintSet {
    /// All four bounds as whole percentages.
    pub const fn from_ints(
        min_trend: i64,
        max_trend: i64,
        min_contribution: i64,
        max_contribution: i64,
    ) -> Self {
        Self {
            min_trend: Percent::Int(min_trend),
            max_trend: Percent::Int(max_trend),
            min_contribution: Percent::Int(min_contribution),
            max_contribution: Percent::Int(max_contribution),
        }
    }

    pub fn fields(&self) -> [(&'static str, Percent); 4] {
        [
            ("min_trend", self.min_trend),
            ("max_trend", self.max_trend),
            ("min_contribution", self.min_contribution),
            ("max_contribution", self.max_contribution),
        ]
    }

    /// Overwrite each field present in `overrides`; absent fields are left untouched.
    pub fn apply(&mut self, overrides: &PartialConstraintSet) {
        if let Some(value) = overrides.min_trend {
            self.min_trend = value;
        }
        if let Some(value) = overrides.max_trend {
            self.max_trend = value;
        }
        if let Some(value) = overrides.min_contribution {
            self.min_contribution = value;
        }
        if let Some(value) = overrides.max_contribution {
            self.max_contribution = value;
        }
    }
}

/// Merge global defaults with the portfolio entry, then the brand entry.
///
/// Unknown portfolio or brand names fall through to the next-lower tier; there is no
/// error case. Pure: inputs are only read.
pub fn resolve(
    global: &ConstraintSet,
    portfolio_layer: &ConfigLayer,
    brand_layer: &ConfigLayer,
    portfolio: &str,
    brand: &str,
) -> ConstraintSet {
    let mut merged = *global;
    if let Some(overrides) = portfolio_layer.get(portfolio) {
        merged.apply(overrides);
    }
    if let Some(overrides) = brand_layer.get(brand) {
        merged.apply(overrides);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> ConstraintSet {
        ConstraintSet::from_ints(-5, 15, 5, 40)
    }

    fn layer(entries: &[(&str, PartialConstraintSet)]) -> ConfigLayer {
        entries
            .iter()
            .map(|(name, partial)| (name.to_string(), *partial))
            .collect()
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut set = global();
        set.apply(&PartialConstraintSet {
            max_contribution: Some(Percent::Int(12)),
            ..Default::default()
        });
        assert_eq!(set.min_trend, Percent::Int(-5));
        assert_eq!(set.max_trend, Percent::Int(15));
        assert_eq!(set.min_contribution, Percent::Int(5));
        assert_eq!(set.max_contribution, Percent::Int(12));
    }

    #[test]
    fn empty_layers_return_global() {
        let empty = ConfigLayer::new();
        assert_eq!(resolve(&global(), &empty, &empty, "Skin/Body", "Kilian"), global());
    }

    #[test]
    fn brand_field_wins_over_portfolio_field() {
        let portfolios = layer(&[(
            "Hair/APDO",
            PartialConstraintSet {
                min_trend: Some(Percent::Int(0)),
                max_trend: Some(Percent::Int(20)),
                ..Default::default()
            },
        )]);
        let brands = layer(&[(
            "Aveda",
            PartialConstraintSet {
                min_trend: Some(Percent::Int(2)),
                ..Default::default()
            },
        )]);

        let resolved = resolve(&global(), &portfolios, &brands, "Hair/APDO", "Aveda");
        assert_eq!(resolved.min_trend, Percent::Int(2));
        // max_trend inherited from the portfolio tier, not global
        assert_eq!(resolved.max_trend, Percent::Int(20));
        assert_eq!(resolved.min_contribution, Percent::Int(5));
    }

    #[test]
    fn fractional_override_replaces_integer_default() {
        let brands = layer(&[(
            "Elizabeth Arden",
            PartialConstraintSet {
                max_trend: Some(Percent::Float(7.5)),
                ..Default::default()
            },
        )]);
        let resolved = resolve(&global(), &ConfigLayer::new(), &brands, "Skin/Body", "Elizabeth Arden");
        assert_eq!(resolved.max_trend, Percent::Float(7.5));
        assert_eq!(resolved.min_trend, Percent::Int(-5));
    }

    #[test]
    fn inconsistent_override_is_not_corrected() {
        let brands = layer(&[(
            "Balmain",
            PartialConstraintSet {
                min_trend: Some(Percent::Int(30)),
                ..Default::default()
            },
        )]);
        let resolved = resolve(&global(), &ConfigLayer::new(), &brands, "Skin/Body", "Balmain");
        assert_eq!(resolved.min_trend, Percent::Int(30));
        assert_eq!(resolved.max_trend, Percent::Int(15));
    }

    #[test]
    fn partial_deserializes_subset_and_rejects_unknown_fields() {
        let partial: PartialConstraintSet =
            serde_json::from_str(r#"{"min_trend": -3, "max_trend": 4}"#).unwrap();
        assert_eq!(partial.min_trend, Some(Percent::Int(-3)));
        assert_eq!(partial.max_contribution, None);
        assert!(!partial.is_empty());

        let names: Vec<&str> = partial.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["min_trend", "max_trend"]);

        let typo = serde_json::from_str::<PartialConstraintSet>(r#"{"min_trnd": 1}"#);
        assert!(typo.is_err());
    }
}
