use riskcast_core::models::format_states;
use riskcast_core::traits::{ICostImpactSource, IRiskGraphSource};
use riskcast_core::{ConditionalTable, CostImpact, RiskCatalog, RiskFactor};

#[test]
fn builder_catalog_exposes_both_sources() {
    let catalog = RiskCatalog::new()
        .factor(RiskFactor::root("material_delay", "Material delay", 0.3))
        .factor(RiskFactor::root("manpower_shortage", "Manpower shortage", 0.25))
        .factor(RiskFactor::derived(
            "block_delay",
            "Block work delay",
            ["material_delay", "manpower_shortage"],
        ))
        .table(
            ConditionalTable::new("block_delay")
                .row([true, true], 0.85)
                .row([false, false], 0.10),
        )
        .cost(CostImpact::new("block_delay", "Block work delay", 2.0, 1.5));

    let factors = catalog.risk_factors().unwrap();
    assert_eq!(factors.len(), 3);
    assert!(factors[0].is_root());
    assert!(!factors[2].is_root());
    assert_eq!(catalog.conditional_tables().unwrap()[0].entries.len(), 2);
    assert_eq!(catalog.cost_impacts().unwrap()[0].triggered_cost(), 3.0);
}

#[test]
fn catalog_loads_from_toml() {
    let toml = r#"
[[factors]]
id = "bad_weather"
label = "Bad weather"
base_probability = 0.2
category = "weather"
severity = 2

[[factors]]
id = "equipment_extend"
label = "Equipment rental extension"
parents = ["bad_weather"]

[[tables]]
factor = "equipment_extend"
entries = [
    { states = [true], probability = 0.45 },
    { states = [false], probability = 0.10 },
]

[[cost_impacts]]
factor = "equipment_extend"
label = "Equipment rental extension"
base_cost = 2.0
multiplier = 1.3
"#;
    let catalog = RiskCatalog::from_toml(toml).unwrap();
    assert_eq!(catalog.factors[0].category.as_deref(), Some("weather"));
    assert_eq!(catalog.factors[0].severity, Some(2));
    assert_eq!(catalog.factors[1].parents, vec!["bad_weather".to_string()]);
    assert_eq!(catalog.factors[1].base_probability, 0.0);
    assert_eq!(catalog.tables[0].entries[0].states, vec![true]);
    assert!((catalog.cost_impacts[0].triggered_cost() - 2.6).abs() < 1e-9);
}

#[test]
fn catalog_json_roundtrip_preserves_content() {
    let catalog = RiskCatalog::new()
        .factor(RiskFactor::root("design_change", "Design change", 0.15).with_severity(5));
    let json = serde_json::to_string(&catalog).unwrap();
    assert_eq!(RiskCatalog::from_json(&json).unwrap(), catalog);
}

#[test]
fn states_render_in_parent_order() {
    assert_eq!(format_states(&[true, false, true]), "(T,F,T)");
    assert_eq!(format_states(&[]), "()");
}
