//! Monte Carlo runs against the shipbuilding network and small graphs that
//! separate independent from ancestral sampling.

use riskcast_core::config::{PropagationConfig, SamplingMode, SimulationConfig};
use riskcast_core::errors::RiskError;
use riskcast_core::{ConditionalTable, CostImpact, RiskFactor, SimulationSample};
use riskcast_propagation::{ProbabilityEngine, RiskGraph};
use riskcast_simulation::{analyze, CostModel, MonteCarloSimulator};

fn seeded(seed: u64) -> SimulationConfig {
    test_fixtures::seeded_config(seed).simulation
}

fn shipbuilding() -> (ProbabilityEngine, CostModel) {
    let catalog = test_fixtures::shipbuilding_catalog();
    let engine = ProbabilityEngine::from_source(&catalog, &PropagationConfig::default()).unwrap();
    let model = CostModel::from_source(&catalog, 100.0).unwrap();
    (engine, model)
}

/// `a` is a coin flip; `b` copies `a` exactly through its CPT.
fn copy_chain() -> ProbabilityEngine {
    let graph = RiskGraph::build(
        vec![
            RiskFactor::root("a", "A", 0.5),
            RiskFactor::derived("b", "B", ["a"]),
        ],
        vec![ConditionalTable::new("b").row([true], 1.0).row([false], 0.0)],
        &PropagationConfig::default(),
    )
    .unwrap();
    ProbabilityEngine::new(graph)
}

fn both_fraction(samples: &[SimulationSample]) -> f64 {
    samples
        .iter()
        .filter(|s| s.occurred("a") && s.occurred("b"))
        .count() as f64
        / samples.len() as f64
}

// =============================================================================
// run
// =============================================================================

#[test]
fn run_returns_exactly_n_samples_above_baseline() {
    let (engine, model) = shipbuilding();
    let mut sim = MonteCarloSimulator::new(model, seeded(7)).unwrap();
    let samples = sim.run(&engine, 1_000).unwrap();
    assert_eq!(samples.len(), 1_000);
    for sample in &samples {
        assert!(sample.total_cost >= 100.0);
        assert_eq!(sample.occurrences.len(), 10);
        assert_eq!(sample.contributions.len(), 4);
        let added: f64 = sample.contributions.values().sum();
        assert!((sample.total_cost - 100.0 - added).abs() < 1e-9);
    }
    assert_eq!(sim.runs_completed(), 1);
}

#[test]
fn non_positive_iterations_are_invalid() {
    let (engine, model) = shipbuilding();
    let mut sim = MonteCarloSimulator::new(model, seeded(1)).unwrap();
    for n in [0, -1] {
        assert!(matches!(
            sim.run(&engine, n),
            Err(RiskError::InvalidConfiguration { .. })
        ));
    }
    assert_eq!(sim.runs_completed(), 0);
}

fn quiet_root() -> ProbabilityEngine {
    let graph = RiskGraph::build(
        vec![RiskFactor::root("calm", "Calm", 0.0)],
        vec![],
        &PropagationConfig::default(),
    )
    .unwrap();
    ProbabilityEngine::new(graph)
}

#[test]
fn cost_model_and_config_must_share_a_baseline() {
    let model = CostModel::new(vec![], 200.0).unwrap();
    assert!(matches!(
        MonteCarloSimulator::new(model, SimulationConfig::default()),
        Err(RiskError::InvalidConfiguration { .. })
    ));
}

#[test]
fn non_default_baseline_is_never_over_budget_without_risks() {
    let engine = quiet_root();
    let config = SimulationConfig {
        baseline_cost: 200.0,
        ..seeded(3)
    };
    let model = CostModel::new(vec![], 200.0).unwrap();
    let samples = MonteCarloSimulator::new(model, config.clone())
        .unwrap()
        .run(&engine, 100)
        .unwrap();
    assert!(samples.iter().all(|s| s.total_cost == 200.0));

    let stats = analyze(&samples, &config).unwrap();
    assert_eq!(stats.mean, 200.0);
    assert_eq!(stats.prob_over_budget, 0.0);
    assert_eq!(stats.prob_over_budget_20, 0.0);
}

#[test]
fn run_default_uses_configured_iterations() {
    let (engine, model) = shipbuilding();
    let config = SimulationConfig {
        default_iterations: 250,
        ..seeded(5)
    };
    let mut sim = MonteCarloSimulator::new(model, config).unwrap();
    assert_eq!(sim.run_default(&engine).unwrap().len(), 250);
    assert_eq!(sim.runs_completed(), 1);
}

#[test]
fn unregistered_cost_driver_is_unknown_factor() {
    let (engine, _) = shipbuilding();
    let model = CostModel::new(vec![CostImpact::new("crane_failure", "Crane", 1.0, 1.0)], 100.0).unwrap();
    let mut sim = MonteCarloSimulator::new(model, seeded(1)).unwrap();
    assert!(matches!(
        sim.run(&engine, 10),
        Err(RiskError::UnknownFactor { id }) if id == "crane_failure"
    ));
}

#[test]
fn same_seed_reproduces_samples() {
    let (engine, model) = shipbuilding();
    let mut first = MonteCarloSimulator::new(model.clone(), seeded(42)).unwrap();
    let mut second = MonteCarloSimulator::new(model, seeded(42)).unwrap();
    assert_eq!(first.run(&engine, 500).unwrap(), second.run(&engine, 500).unwrap());
}

#[test]
fn consecutive_runs_draw_fresh_streams() {
    let (engine, model) = shipbuilding();
    let mut sim = MonteCarloSimulator::new(model, seeded(42)).unwrap();
    let first = sim.run(&engine, 500).unwrap();
    let second = sim.run(&engine, 500).unwrap();
    assert_ne!(first, second);
}

#[test]
fn parallel_run_matches_sequential_run() {
    let (engine, model) = shipbuilding();
    for sampling in [SamplingMode::Independent, SamplingMode::Ancestral] {
        let mut sequential_config = seeded(99);
        sequential_config.sampling = sampling;
        let mut parallel_config = sequential_config.clone();
        parallel_config.parallel = true;

        let mut sequential = MonteCarloSimulator::new(model.clone(), sequential_config).unwrap();
        let mut parallel = MonteCarloSimulator::new(model.clone(), parallel_config).unwrap();
        assert_eq!(
            sequential.run(&engine, 2_000).unwrap(),
            parallel.run(&engine, 2_000).unwrap(),
            "{sampling:?}"
        );
    }
}

#[test]
fn evidence_is_respected_by_every_draw() {
    let (mut engine, model) = shipbuilding();
    engine.set_evidence("overtime", true).unwrap();
    engine.set_evidence("rework", false).unwrap();
    for sampling in [SamplingMode::Independent, SamplingMode::Ancestral] {
        let mut config = seeded(3);
        config.sampling = sampling;
        let mut sim = MonteCarloSimulator::new(model.clone(), config).unwrap();
        for sample in sim.run(&engine, 300).unwrap() {
            assert!(sample.occurred("overtime"));
            assert!(!sample.occurred("rework"));
            assert_eq!(sample.contributions["overtime"], 4.5);
        }
    }
}

// =============================================================================
// Sampling modes
// =============================================================================

#[test]
fn independent_sampling_ignores_parent_draws() {
    let engine = copy_chain();
    let mut config = seeded(11);
    config.sampling = SamplingMode::Independent;
    let model = CostModel::new(Vec::new(), 100.0).unwrap();
    let samples = MonteCarloSimulator::new(model, config).unwrap().run(&engine, 10_000).unwrap();

    // Each factor has marginal 0.5 and is drawn on its own coin: P(a and b) ~ 0.25.
    let both = both_fraction(&samples);
    assert!((both - 0.25).abs() < 0.03, "both = {both}");
    assert!(samples.iter().any(|s| s.occurred("a") != s.occurred("b")));
}

#[test]
fn ancestral_sampling_conditions_on_parent_draws() {
    let engine = copy_chain();
    let mut config = seeded(11);
    config.sampling = SamplingMode::Ancestral;
    let model = CostModel::new(Vec::new(), 100.0).unwrap();
    let samples = MonteCarloSimulator::new(model, config).unwrap().run(&engine, 10_000).unwrap();

    // b copies a in every draw: P(a and b) ~ 0.5.
    assert!(samples.iter().all(|s| s.occurred("a") == s.occurred("b")));
    let both = both_fraction(&samples);
    assert!((both - 0.5).abs() < 0.03, "both = {both}");
}

#[test]
fn both_modes_agree_on_marginal_frequencies() {
    let (engine, model) = shipbuilding();
    let expected = engine.all_probabilities();
    for sampling in [SamplingMode::Independent, SamplingMode::Ancestral] {
        let mut config = seeded(5);
        config.sampling = sampling;
        let config_for_stats = config.clone();
        let samples = MonteCarloSimulator::new(model.clone(), config).unwrap()
            .run(&engine, 10_000)
            .unwrap();
        let stats = analyze(&samples, &config_for_stats).unwrap();
        // Roots are exact in both modes.
        for root in ["material_delay", "design_change", "manpower_shortage", "bad_weather"] {
            let freq = stats.occurrence_frequency[root];
            assert!((freq - expected[root]).abs() < 0.03, "{sampling:?} {root}: {freq}");
        }
    }
}

// =============================================================================
// analyze
// =============================================================================

#[test]
fn analyze_large_run_matches_expected_cost() {
    let (engine, model) = shipbuilding();
    let config = seeded(2024);
    let samples = MonteCarloSimulator::new(model, config.clone()).unwrap()
        .run(&engine, 10_000)
        .unwrap();
    let stats = analyze(&samples, &config).unwrap();

    assert_eq!(stats.sample_count, 10_000);
    assert!((stats.mean - 103.8318).abs() < 0.2, "mean = {}", stats.mean);
    assert!((stats.percentile_50 - stats.median).abs() <= 0.01 * stats.median);
    assert!(stats.prob_over_budget_20 <= stats.prob_over_budget);
    assert!(stats.percentile_10 <= stats.percentile_50);
    assert!(stats.percentile_50 <= stats.percentile_90);
    assert!(stats.percentile_90 <= stats.percentile_95);
    assert!(stats.std_dev > 0.0);

    let overtime = stats.driver_mean_contribution["overtime"];
    assert!((overtime - 4.5 * 0.4635509766).abs() < 0.1, "overtime = {overtime}");
}

#[test]
fn evidence_shifts_cost_distribution() {
    let (mut engine, model) = shipbuilding();
    let config = seeded(8);
    let baseline = analyze(
        &MonteCarloSimulator::new(model.clone(), config.clone()).unwrap().run(&engine, 10_000).unwrap(),
        &config,
    )
    .unwrap();

    engine.set_evidence("material_delay", true).unwrap();
    let delayed = analyze(
        &MonteCarloSimulator::new(model, config.clone()).unwrap().run(&engine, 10_000).unwrap(),
        &config,
    )
    .unwrap();

    assert!((delayed.mean - 105.663).abs() < 0.2, "mean = {}", delayed.mean);
    assert!(delayed.mean > baseline.mean);
}

fn sample_with_total(total_cost: f64) -> SimulationSample {
    SimulationSample {
        occurrences: [("x".to_string(), total_cost > 110.0)].into_iter().collect(),
        contributions: [("x".to_string(), total_cost - 100.0)].into_iter().collect(),
        total_cost,
    }
}

#[test]
fn analyze_hand_computed_statistics() {
    let samples: Vec<SimulationSample> = [100.0, 105.0, 111.0, 115.0, 125.0]
        .into_iter()
        .map(sample_with_total)
        .collect();
    let stats = analyze(&samples, &SimulationConfig::default()).unwrap();

    assert!((stats.mean - 111.2).abs() < 1e-9);
    assert_eq!(stats.median, 111.0);
    assert!((stats.std_dev - 92.2_f64.sqrt()).abs() < 1e-9);
    assert!((stats.percentile_10 - 102.0).abs() < 1e-9);
    assert!((stats.percentile_90 - 121.0).abs() < 1e-9);
    assert!((stats.percentile_95 - 123.0).abs() < 1e-9);
    assert!((stats.prob_over_budget - 0.6).abs() < 1e-12);
    assert!((stats.prob_over_budget_20 - 0.2).abs() < 1e-12);
    assert!((stats.occurrence_frequency["x"] - 0.6).abs() < 1e-12);
    assert!((stats.driver_mean_contribution["x"] - 11.2).abs() < 1e-9);
}

#[test]
fn analyze_single_sample_has_zero_spread() {
    let stats = analyze(&[sample_with_total(104.0)], &SimulationConfig::default()).unwrap();
    assert_eq!(stats.std_dev, 0.0);
    assert_eq!(stats.percentile_10, 104.0);
    assert_eq!(stats.percentile_95, 104.0);
}

#[test]
fn analyze_empty_is_invalid() {
    assert!(matches!(
        analyze(&[], &SimulationConfig::default()),
        Err(RiskError::InvalidConfiguration { .. })
    ));
}

#[test]
fn budget_thresholds_follow_config_margins() {
    let samples: Vec<SimulationSample> = [100.0, 104.0, 106.0].into_iter().map(sample_with_total).collect();
    let config = SimulationConfig {
        over_budget_margin: 0.05,
        severe_over_budget_margin: 0.05,
        ..SimulationConfig::default()
    };
    let stats = analyze(&samples, &config).unwrap();
    assert!((stats.prob_over_budget - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.prob_over_budget, stats.prob_over_budget_20);
}
