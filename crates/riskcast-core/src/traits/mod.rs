mod cost_source;
mod graph_source;

pub use cost_source::ICostImpactSource;
pub use graph_source::IRiskGraphSource;
