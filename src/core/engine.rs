use super::types::{GrowthRule, ScenarioInput, ScenarioResult};

/// Projects a scenario into its month-by-month balance trajectory.
///
/// Assumes the input already passed validation (`principal > 0`,
/// `monthly_contribution > 0`, `horizon_years >= 1`); a zero or negative
/// rate is legal. Interest accrues on the pre-contribution balance, so a
/// month's contribution earns nothing in the month it is made.
pub fn project(input: &ScenarioInput) -> ScenarioResult {
    let monthly_rate = input.annual_rate_percent / 100.0 / 12.0;
    let months = input.horizon_years * 12;

    let mut balance = input.principal;
    let mut contributed = 0.0;
    let mut monthly_balances = Vec::with_capacity(months as usize);

    for month in 0..months {
        let contribution =
            contribution_for_month(input.monthly_contribution, input.growth_rule, month);
        balance = balance * (1.0 + monthly_rate) + contribution;
        contributed += contribution;
        monthly_balances.push(to_display_units(balance));
    }

    let final_balance = monthly_balances
        .last()
        .copied()
        .unwrap_or_else(|| to_display_units(input.principal));
    let total_contributed = to_display_units(contributed);
    // Interest is the residual, not an accumulated sum: it absorbs all
    // rounding drift so the displayed identity
    // final = principal + contributed + interest holds exactly.
    let total_interest_earned = final_balance - to_display_units(input.principal) - total_contributed;

    ScenarioResult {
        monthly_balances,
        final_balance,
        total_contributed,
        total_interest_earned,
    }
}

fn contribution_for_month(base: f64, rule: GrowthRule, month_index: u32) -> f64 {
    let years_elapsed = month_index / 12;
    match rule {
        GrowthRule::None => base,
        GrowthRule::FlatAnnualIncrement { amount_per_month } => {
            base + amount_per_month * years_elapsed as f64
        }
        GrowthRule::CompoundAnnualPercent { percent } => {
            base * (1.0 + percent / 100.0).powf(years_elapsed as f64)
        }
    }
}

// Half away from zero, the pinned rounding rule for all display figures.
fn to_display_units(amount: f64) -> i64 {
    amount.round() as i64
}
