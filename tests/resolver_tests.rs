use acme_synth::{resolve, ConfigLayer, ConstraintSet, GeneratorConfig, PartialConstraintSet, Percent};

fn scenario_global() -> ConstraintSet {
    ConstraintSet::from_ints(-5, 15, 5, 40)
}

fn full(min_trend: i64, max_trend: i64, min_contribution: i64, max_contribution: i64) -> PartialConstraintSet {
    PartialConstraintSet {
        min_trend: Some(Percent::Int(min_trend)),
        max_trend: Some(Percent::Int(max_trend)),
        min_contribution: Some(Percent::Int(min_contribution)),
        max_contribution: Some(Percent::Int(max_contribution)),
    }
}

fn scenario_layers() -> (ConfigLayer, ConfigLayer) {
    let mut portfolios = ConfigLayer::new();
    portfolios.insert("Hair/APDO".to_string(), full(0, 15, 4, 30));

    let mut brands = ConfigLayer::new();
    brands.insert("Bobbi Brown".to_string(), full(-1, 3, 7, 14));
    brands.insert(
        "Frederic Malle".to_string(),
        PartialConstraintSet {
            min_trend: Some(Percent::Int(-3)),
            max_trend: Some(Percent::Int(4)),
            ..Default::default()
        },
    );
    (portfolios, brands)
}

#[test]
fn brand_with_full_override_replaces_every_field() {
    let (portfolios, brands) = scenario_layers();
    let resolved = resolve(&scenario_global(), &portfolios, &brands, "Hair/APDO", "Bobbi Brown");
    assert_eq!(
        resolved,
        ConstraintSet::from_ints(-1, 3, 7, 14)
    );
}

#[test]
fn portfolio_override_applies_when_brand_has_no_entry() {
    let (portfolios, brands) = scenario_layers();
    let resolved = resolve(&scenario_global(), &portfolios, &brands, "Hair/APDO", "Kilian");
    assert_eq!(
        resolved,
        ConstraintSet::from_ints(0, 15, 4, 30)
    );
}

#[test]
fn trend_only_brand_override_keeps_global_contribution() {
    let (portfolios, brands) = scenario_layers();
    let resolved = resolve(&scenario_global(), &portfolios, &brands, "Skin/Body", "Frederic Malle");
    assert_eq!(
        resolved,
        ConstraintSet::from_ints(-3, 4, 5, 40)
    );
}

#[test]
fn pairs_without_overrides_get_exact_global_defaults() {
    let (portfolios, brands) = scenario_layers();
    for portfolio in ["Skin/Body", "Fragrance + Color Cosmetics", "Unknown Portfolio"] {
        for brand in ["Kilian", "Balmain", "Aveda", ""] {
            assert_eq!(
                resolve(&scenario_global(), &portfolios, &brands, portfolio, brand),
                scenario_global(),
                "{portfolio} / {brand}"
            );
        }
    }
}

#[test]
fn portfolio_wins_over_global_for_every_field_the_brand_leaves_silent() {
    let (portfolios, brands) = scenario_layers();
    let resolved = resolve(&scenario_global(), &portfolios, &brands, "Hair/APDO", "Frederic Malle");
    // Brand sets trend; contribution comes from the portfolio tier.
    assert_eq!(resolved.min_trend, Percent::Int(-3));
    assert_eq!(resolved.max_trend, Percent::Int(4));
    assert_eq!(resolved.min_contribution, Percent::Int(4));
    assert_eq!(resolved.max_contribution, Percent::Int(30));
}

#[test]
fn brand_value_wins_regardless_of_portfolio() {
    let (portfolios, brands) = scenario_layers();
    for portfolio in ["Hair/APDO", "Skin/Body", "Fragrance + Color Cosmetics"] {
        let resolved = resolve(&scenario_global(), &portfolios, &brands, portfolio, "Bobbi Brown");
        assert_eq!(resolved.min_trend, Percent::Int(-1));
        assert_eq!(resolved.max_contribution, Percent::Int(14));
    }
}

#[test]
fn acme_config_matches_documented_scenarios() {
    let config = GeneratorConfig::acme();
    assert_eq!(config.resolve("Hair/APDO", "Bobbi Brown").max_trend, Percent::Int(3));
    assert_eq!(config.resolve("Hair/APDO", "Kilian").min_contribution, Percent::Int(4));
    assert_eq!(
        config.resolve("Skin/Body", "Elizabeth Arden"),
        ConstraintSet::from_ints(0, 7, 6, 15)
    );
    assert_eq!(config.resolve("Skin/Body", "Aveda"), config.global.constraints);
}

#[test]
fn resolve_does_not_mutate_inputs() {
    let (portfolios, brands) = scenario_layers();
    let global = scenario_global();
    let before = (portfolios.clone(), brands.clone());
    let _ = resolve(&global, &portfolios, &brands, "Hair/APDO", "Bobbi Brown");
    assert_eq!((portfolios, brands), before);
    assert_eq!(global, scenario_global());
}

#[test]
fn shipped_config_file_matches_builtin_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/acme.yaml");
    let loaded = acme_synth::load_config(path).expect("shipped config should load");
    assert_eq!(loaded, GeneratorConfig::acme());
}

#[test]
fn fractional_brand_override_wins_field_by_field() {
    let (portfolios, mut brands) = scenario_layers();
    brands.insert(
        "Elizabeth Arden".to_string(),
        PartialConstraintSet {
            max_trend: Some(Percent::Float(7.5)),
            min_contribution: Some(Percent::Float(0.25)),
            ..Default::default()
        },
    );
    let resolved = resolve(&scenario_global(), &portfolios, &brands, "Hair/APDO", "Elizabeth Arden");
    assert_eq!(resolved.min_trend, Percent::Int(0));
    assert_eq!(resolved.max_trend, Percent::Float(7.5));
    assert_eq!(resolved.min_contribution, Percent::Float(0.25));
    assert_eq!(resolved.max_contribution, Percent::Int(30));
}
