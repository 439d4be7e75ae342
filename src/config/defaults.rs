//! Built-in Acme hierarchy and constraint tiers.

use crate::config::{GlobalDefaults, HierarchyCatalog, IntRange};
use crate::constraints::{ConfigLayer, ConstraintSet, PartialConstraintSet, Percent};

fn whole(value: i64) -> Option<Percent> {
    Some(Percent::Int(value))
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn acme_global_defaults() -> GlobalDefaults {
    GlobalDefaults {
        constraints: ConstraintSet::from_ints(-5, 15, 5, 40),
        margin_range: IntRange::new(30, 60),
        sales_range: IntRange::new(500_000, 5_000_000),
    }
}

pub fn acme_portfolio_overrides() -> ConfigLayer {
    let mut layer = ConfigLayer::new();
    layer.insert(
        "Hair/APDO".to_string(),
        PartialConstraintSet {
            min_trend: whole(0),
            max_trend: whole(15),
            min_contribution: whole(4),
            max_contribution: whole(30),
        },
    );
    layer
}

pub fn acme_brand_overrides() -> ConfigLayer {
    let mut layer = ConfigLayer::new();
    layer.insert(
        "Bobbi Brown".to_string(),
        PartialConstraintSet {
            min_trend: whole(-1),
            max_trend: whole(3),
            min_contribution: whole(7),
            max_contribution: whole(14),
        },
    );
    layer.insert(
        "Elizabeth Arden".to_string(),
        PartialConstraintSet {
            min_trend: whole(0),
            max_trend: whole(7),
            min_contribution: whole(6),
            max_contribution: whole(15),
        },
    );
    // Trend only; contribution inherits.
    layer.insert(
        "Frederic Malle".to_string(),
        PartialConstraintSet {
            min_trend: whole(-3),
            max_trend: whole(4),
            ..Default::default()
        },
    );
    layer
}

pub fn acme_catalog() -> HierarchyCatalog {
    HierarchyCatalog {
        portfolios: labels(&["Skin/Body", "Fragrance + Color Cosmetics", "Hair/APDO"]),
        geographies: labels(&["North America", "Europe", "South America", "Asia"]),
        categories: labels(&[
            "Fragrance",
            "Hair Dye",
            "Face Make-Up",
            "Make Up Brushes",
            "Tools",
        ]),
        brands: labels(&[
            "Kilian",
            "Frederic Malle",
            "Balmain",
            "Bobbi Brown",
            "Aveda",
            "Elizabeth Arden",
        ]),
        segments: labels(&["Lipstick", "Mascara", "Toner", "Bronzer", "Fragrance"]),
    }
}
