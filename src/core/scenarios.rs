use thiserror::Error;

use super::engine::project;
use super::types::{
    CHART_PALETTE_SIZE, ChartSeries, NamedSeries, Scenario, ScenarioInput,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioSetError {
    #[error("no scenario at ordinal {ordinal} (set holds {len})")]
    IndexOutOfRange { ordinal: usize, len: usize },
}

/// Insertion-ordered collection of saved scenarios. Ordinals stay contiguous
/// from 0 and double as the display index and the chart color assignment.
#[derive(Debug, Default)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn add(&mut self, input: ScenarioInput) -> &Scenario {
        let result = project(&input);
        let ordinal = self.scenarios.len();
        self.scenarios.push(Scenario {
            input,
            result,
            ordinal,
        });
        &self.scenarios[ordinal]
    }

    pub fn remove(&mut self, ordinal: usize) -> Result<Scenario, ScenarioSetError> {
        if ordinal >= self.scenarios.len() {
            return Err(ScenarioSetError::IndexOutOfRange {
                ordinal,
                len: self.scenarios.len(),
            });
        }
        let removed = self.scenarios.remove(ordinal);
        for (index, scenario) in self.scenarios.iter_mut().enumerate() {
            scenario.ordinal = index;
        }
        Ok(removed)
    }

    pub fn list(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The scenario whose summary figures are shown on their own: always the
    /// entry at ordinal 0, even right after an unrelated removal.
    pub fn headline(&self) -> Option<&Scenario> {
        self.scenarios.first()
    }

    /// Inputs only; results are re-derivable and ordinals are never persisted.
    pub fn serialize(&self) -> Vec<ScenarioInput> {
        self.scenarios
            .iter()
            .map(|scenario| scenario.input.clone())
            .collect()
    }

    pub fn restore(&mut self, inputs: Vec<ScenarioInput>) {
        self.scenarios.clear();
        for input in inputs {
            self.add(input);
        }
    }

    pub fn derive_chart_series(&self) -> ChartSeries {
        let max_months = self
            .scenarios
            .iter()
            .map(|scenario| scenario.input.horizon_years * 12)
            .max()
            .unwrap_or(0);
        let series = self
            .scenarios
            .iter()
            .map(|scenario| NamedSeries {
                label: format!("Pattern {}", scenario.ordinal + 1),
                points: scenario.result.monthly_balances.clone(),
                color_index: scenario.ordinal % CHART_PALETTE_SIZE,
            })
            .collect();
        ChartSeries { max_months, series }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GrowthRule;

    fn input_with_years(horizon_years: u32) -> ScenarioInput {
        ScenarioInput {
            principal: 100_000.0,
            monthly_contribution: 10_000.0,
            annual_rate_percent: 3.0,
            horizon_years,
            growth_rule: GrowthRule::None,
        }
    }

    fn three_scenario_set() -> ScenarioSet {
        let mut set = ScenarioSet::new();
        set.add(input_with_years(1));
        set.add(input_with_years(2));
        set.add(input_with_years(3));
        set
    }

    #[test]
    fn add_assigns_contiguous_ordinals_and_computes_results() {
        let set = three_scenario_set();
        let ordinals: Vec<usize> = set.list().iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        for scenario in set.list() {
            assert_eq!(
                scenario.result.monthly_balances.len(),
                (scenario.input.horizon_years * 12) as usize
            );
        }
    }

    #[test]
    fn remove_middle_shifts_later_ordinals_down() {
        let mut set = three_scenario_set();
        let removed = set.remove(1).expect("ordinal 1 exists");
        assert_eq!(removed.input.horizon_years, 2);

        assert_eq!(set.len(), 2);
        assert_eq!(set.list()[0].ordinal, 0);
        assert_eq!(set.list()[0].input.horizon_years, 1);
        assert_eq!(set.list()[1].ordinal, 1);
        assert_eq!(set.list()[1].input.horizon_years, 3);
        // Survivors keep their original results.
        assert_eq!(set.list()[1].result.monthly_balances.len(), 36);
    }

    #[test]
    fn remove_out_of_range_errors_and_leaves_the_set_unchanged() {
        let mut set = ScenarioSet::new();
        set.add(input_with_years(1));
        set.add(input_with_years(2));
        let before = set.serialize();

        let err = set.remove(5).expect_err("ordinal 5 does not exist");
        assert_eq!(err, ScenarioSetError::IndexOutOfRange { ordinal: 5, len: 2 });
        assert_eq!(set.serialize(), before);
    }

    #[test]
    fn headline_is_always_ordinal_zero() {
        let mut set = three_scenario_set();
        assert_eq!(
            set.headline().map(|s| s.input.horizon_years),
            Some(1)
        );

        set.remove(0).expect("ordinal 0 exists");
        assert_eq!(
            set.headline().map(|s| s.input.horizon_years),
            Some(2)
        );

        set.remove(0).expect("ordinal 0 exists");
        set.remove(0).expect("ordinal 0 exists");
        assert!(set.headline().is_none());
    }

    #[test]
    fn restore_of_serialized_inputs_round_trips() {
        let mut set = three_scenario_set();
        let saved = set.serialize();

        set.restore(saved.clone());
        assert_eq!(set.serialize(), saved);
        assert_eq!(set.len(), 3);
        let ordinals: Vec<usize> = set.list().iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn restore_of_empty_sequence_clears_the_set() {
        let mut set = three_scenario_set();
        set.restore(Vec::new());
        assert!(set.is_empty());
        assert!(set.headline().is_none());
        assert_eq!(set.derive_chart_series().max_months, 0);
    }

    #[test]
    fn chart_series_labels_points_and_palette_cycle() {
        let mut set = ScenarioSet::new();
        for _ in 0..7 {
            set.add(input_with_years(1));
        }
        set.add(input_with_years(4));

        let chart = set.derive_chart_series();
        assert_eq!(chart.max_months, 48);
        assert_eq!(chart.series.len(), 8);
        assert_eq!(chart.series[0].label, "Pattern 1");
        assert_eq!(chart.series[7].label, "Pattern 8");
        let colors: Vec<usize> = chart.series.iter().map(|s| s.color_index).collect();
        assert_eq!(colors, vec![0, 1, 2, 3, 4, 0, 1, 2]);
        assert_eq!(chart.series[0].points.len(), 12);
        assert_eq!(chart.series[7].points.len(), 48);
        assert_eq!(
            chart.series[0].points,
            set.list()[0].result.monthly_balances
        );
    }

    #[test]
    fn ordinals_stay_contiguous_under_interleaved_mutation() {
        let mut set = ScenarioSet::new();
        for years in 1..=5 {
            set.add(input_with_years(years));
        }
        set.remove(4).expect("exists");
        set.remove(0).expect("exists");
        set.add(input_with_years(6));
        set.remove(1).expect("exists");

        let ordinals: Vec<usize> = set.list().iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, (0..set.len()).collect::<Vec<usize>>());
    }
}
