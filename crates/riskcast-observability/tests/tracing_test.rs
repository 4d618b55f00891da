use riskcast_core::config::ObservabilityConfig;
use riskcast_observability::spans::names;
use riskcast_observability::{
    build_filter, init_tracing, propagation_span, scenario_span, simulation_span,
};

#[test]
fn init_tracing_is_idempotent() {
    let config = ObservabilityConfig::default();
    init_tracing(&config);
    init_tracing(&ObservabilityConfig {
        log_level: "debug".to_string(),
        json: true,
    });
    riskcast_observability::tracing::info!("still logging after repeated init");
}

#[test]
fn filter_falls_back_on_unparseable_level() {
    let config = ObservabilityConfig {
        log_level: "definitely[not=a{filter".to_string(),
        json: false,
    };
    // Must not panic; the fallback filter is used instead.
    let _ = build_filter(&config);
}

#[test]
fn span_macros_use_shared_names() {
    init_tracing(&ObservabilityConfig::default());
    let spans = [
        propagation_span!(10usize, 2usize),
        simulation_span!(1_000usize, "independent", false),
        scenario_span!("steel delay"),
    ];
    let expected = [names::PROPAGATION, names::SIMULATION, names::SCENARIO];
    for (span, name) in spans.iter().zip(expected) {
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), name);
        }
    }
}
