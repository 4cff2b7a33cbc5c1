mod engine;
mod scenarios;
mod types;

pub use engine::project;
pub use scenarios::{ScenarioSet, ScenarioSetError};
pub use types::{
    CHART_PALETTE_SIZE, ChartSeries, GrowthRule, NamedSeries, Scenario, ScenarioInput,
    ScenarioResult,
};
