use super::growth::{
    MONTHS_PER_YEAR, SAFE_WITHDRAWAL_RATE, adjust_for_inflation, future_value, years_to_target,
};
use super::types::{Inputs, PlanResult, Projection, Strategy};

const LEAN_EXPENSE_RATIO: f64 = 0.7;
const FAT_EXPENSE_RATIO: f64 = 2.0;
// Traditional retirement counts as on-track at 80% of the funding gap.
const TRADITIONAL_FUNDING_RATIO: f64 = 0.8;

fn monthly_investment(inputs: &Inputs) -> f64 {
    inputs.annual_income * inputs.savings_rate / 100.0 / MONTHS_PER_YEAR
}

fn growth_rate(inputs: &Inputs) -> f64 {
    inputs.expected_return / 100.0
}

fn reachable(years: f64) -> bool {
    years > 0.0 && years < 100.0
}

fn years_until_retirement(inputs: &Inputs) -> f64 {
    f64::from(inputs.retirement_age.saturating_sub(inputs.current_age))
}

/// Full financial independence on the 4% rule: 25x current annual expenses.
pub fn evaluate_regular_fire(inputs: &Inputs) -> Projection {
    let annual_expenses = inputs.monthly_expenses * MONTHS_PER_YEAR;
    let target_amount = annual_expenses / SAFE_WITHDRAWAL_RATE;
    let monthly = monthly_investment(inputs);
    let years = years_to_target(
        inputs.current_savings,
        target_amount,
        monthly,
        growth_rate(inputs),
    );

    Projection {
        strategy: Strategy::RegularFire,
        target_amount,
        years_to_target: years,
        monthly_investment: monthly,
        retirement_age: f64::from(inputs.current_age) + years,
        projected_annual_expenses: annual_expenses,
        safe_withdrawal_amount: target_amount * SAFE_WITHDRAWAL_RATE,
        is_feasible: reachable(years),
        notes: vec![
            format!(
                "Retire completely when you reach {:.0}K",
                target_amount / 1000.0
            ),
            format!(
                "Based on {:.0}% safe withdrawal rate",
                SAFE_WITHDRAWAL_RATE * 100.0
            ),
            format!(
                "Assumes {:.1}% annual investment returns",
                inputs.expected_return
            ),
        ],
    }
}

/// Coast FIRE: the savings level that grows unassisted into the full FI
/// number by the target retirement age. The coast number is the reported
/// target; feasibility additionally requires not having reached it yet.
pub fn evaluate_coast_fire(inputs: &Inputs) -> Projection {
    let horizon = years_until_retirement(inputs);
    let annual_expenses = inputs.monthly_expenses * MONTHS_PER_YEAR;
    let future_expenses =
        adjust_for_inflation(annual_expenses, horizon, inputs.inflation_rate / 100.0);
    let full_target = future_expenses / SAFE_WITHDRAWAL_RATE;

    // Discount the future FI number back to today at the expected return.
    let coast_number = full_target / (1.0 + growth_rate(inputs)).powf(horizon);

    let monthly = monthly_investment(inputs);
    let years = years_to_target(
        inputs.current_savings,
        coast_number,
        monthly,
        growth_rate(inputs),
    );

    Projection {
        strategy: Strategy::CoastFire,
        target_amount: coast_number,
        years_to_target: years,
        monthly_investment: monthly,
        retirement_age: f64::from(inputs.current_age) + years,
        projected_annual_expenses: future_expenses,
        safe_withdrawal_amount: full_target * SAFE_WITHDRAWAL_RATE,
        is_feasible: reachable(years) && inputs.current_savings < coast_number,
        notes: vec![
            format!("Reach Coast FIRE number: {:.0}K", coast_number / 1000.0),
            format!(
                "Then stop saving and let it grow to {:.0}K by age {}",
                full_target / 1000.0,
                inputs.retirement_age
            ),
            "You can work part-time or cover only living expenses".to_string(),
        ],
    }
}

/// Lean FIRE: Regular FIRE against a 30%-reduced expense base.
pub fn evaluate_lean_fire(inputs: &Inputs) -> Projection {
    let lean_expenses = inputs.monthly_expenses * LEAN_EXPENSE_RATIO * MONTHS_PER_YEAR;
    let target_amount = lean_expenses / SAFE_WITHDRAWAL_RATE;
    let monthly = monthly_investment(inputs);
    let years = years_to_target(
        inputs.current_savings,
        target_amount,
        monthly,
        growth_rate(inputs),
    );

    Projection {
        strategy: Strategy::LeanFire,
        target_amount,
        years_to_target: years,
        monthly_investment: monthly,
        retirement_age: f64::from(inputs.current_age) + years,
        projected_annual_expenses: lean_expenses,
        safe_withdrawal_amount: target_amount * SAFE_WITHDRAWAL_RATE,
        is_feasible: reachable(years),
        notes: vec![
            format!(
                "Minimalist lifestyle: {:.0} per month",
                lean_expenses / MONTHS_PER_YEAR
            ),
            format!("Target: {:.0}K", target_amount / 1000.0),
            "Requires significant lifestyle adjustments and frugality".to_string(),
        ],
    }
}

/// Fat FIRE: Regular FIRE against a doubled expense base.
pub fn evaluate_fat_fire(inputs: &Inputs) -> Projection {
    let fat_expenses = inputs.monthly_expenses * FAT_EXPENSE_RATIO * MONTHS_PER_YEAR;
    let target_amount = fat_expenses / SAFE_WITHDRAWAL_RATE;
    let monthly = monthly_investment(inputs);
    let years = years_to_target(
        inputs.current_savings,
        target_amount,
        monthly,
        growth_rate(inputs),
    );

    Projection {
        strategy: Strategy::FatFire,
        target_amount,
        years_to_target: years,
        monthly_investment: monthly,
        retirement_age: f64::from(inputs.current_age) + years,
        projected_annual_expenses: fat_expenses,
        safe_withdrawal_amount: target_amount * SAFE_WITHDRAWAL_RATE,
        is_feasible: reachable(years),
        notes: vec![
            format!(
                "Luxurious lifestyle: {:.0} per month",
                fat_expenses / MONTHS_PER_YEAR
            ),
            format!("Target: {:.0}K", target_amount / 1000.0),
            "Maintain or improve current lifestyle without compromise".to_string(),
        ],
    }
}

/// Barista FIRE: part-time income covers part of the spend; the portfolio
/// only has to fund the gap.
pub fn evaluate_barista_fire(inputs: &Inputs) -> Projection {
    let annual_expenses = inputs.monthly_expenses * MONTHS_PER_YEAR;
    let part_time_coverage = inputs.part_time_income * MONTHS_PER_YEAR;
    let gap_to_fill = (annual_expenses - part_time_coverage).max(0.0);
    let target_amount = gap_to_fill / SAFE_WITHDRAWAL_RATE;
    let monthly = monthly_investment(inputs);
    let years = years_to_target(
        inputs.current_savings,
        target_amount,
        monthly,
        growth_rate(inputs),
    );

    Projection {
        strategy: Strategy::BaristaFire,
        target_amount,
        years_to_target: years,
        monthly_investment: monthly,
        retirement_age: f64::from(inputs.current_age) + years,
        projected_annual_expenses: annual_expenses,
        safe_withdrawal_amount: target_amount * SAFE_WITHDRAWAL_RATE + part_time_coverage,
        is_feasible: reachable(years),
        notes: vec![
            format!(
                "Part-time income covers {:.0}% of expenses",
                part_time_coverage / annual_expenses * 100.0
            ),
            format!(
                "Only need {:.0}K to cover the gap",
                target_amount / 1000.0
            ),
            "Work part-time doing something you enjoy".to_string(),
        ],
    }
}

/// FINE: the Regular FIRE numbers with a keep-working narrative.
pub fn evaluate_fine(inputs: &Inputs) -> Projection {
    let annual_expenses = inputs.monthly_expenses * MONTHS_PER_YEAR;
    let target_amount = annual_expenses / SAFE_WITHDRAWAL_RATE;
    let monthly = monthly_investment(inputs);
    let years = years_to_target(
        inputs.current_savings,
        target_amount,
        monthly,
        growth_rate(inputs),
    );

    Projection {
        strategy: Strategy::Fine,
        target_amount,
        years_to_target: years,
        monthly_investment: monthly,
        retirement_age: f64::from(inputs.current_age) + years,
        projected_annual_expenses: annual_expenses,
        safe_withdrawal_amount: target_amount * SAFE_WITHDRAWAL_RATE,
        is_feasible: reachable(years),
        notes: vec![
            format!("Achieve FI number: {:.0}K", target_amount / 1000.0),
            "Continue working because you want to, not because you have to".to_string(),
            "Ultimate financial security and freedom of choice".to_string(),
        ],
    }
}

/// Traditional retirement at the user's chosen age, with Social Security
/// shrinking the gap the portfolio must fund. Years-to-target is the fixed
/// wait until that age, not a solved quantity.
pub fn evaluate_traditional(inputs: &Inputs) -> Projection {
    let horizon = years_until_retirement(inputs);
    let annual_expenses = inputs.monthly_expenses * MONTHS_PER_YEAR;
    let future_expenses =
        adjust_for_inflation(annual_expenses, horizon, inputs.inflation_rate / 100.0);

    let social_security_income = inputs.estimated_social_security * MONTHS_PER_YEAR;
    let gap_to_fill = (future_expenses - social_security_income).max(0.0);
    let target_amount = gap_to_fill / SAFE_WITHDRAWAL_RATE;

    let monthly = monthly_investment(inputs);
    let projected_savings = future_value(
        inputs.current_savings,
        monthly,
        growth_rate(inputs),
        horizon,
    );

    Projection {
        strategy: Strategy::Traditional,
        target_amount,
        years_to_target: horizon,
        monthly_investment: monthly,
        retirement_age: f64::from(inputs.retirement_age),
        projected_annual_expenses: future_expenses,
        safe_withdrawal_amount: target_amount * SAFE_WITHDRAWAL_RATE + social_security_income,
        is_feasible: projected_savings >= target_amount * TRADITIONAL_FUNDING_RATIO,
        notes: vec![
            format!("Retire at age {}", inputs.retirement_age),
            format!(
                "Social Security covers {:.0}% of expenses",
                social_security_income / future_expenses * 100.0
            ),
            format!(
                "Need {:.0}K, projected to have {:.0}K",
                target_amount / 1000.0,
                projected_savings / 1000.0
            ),
        ],
    }
}

pub fn evaluate_strategy(strategy: Strategy, inputs: &Inputs) -> Projection {
    match strategy {
        Strategy::RegularFire => evaluate_regular_fire(inputs),
        Strategy::CoastFire => evaluate_coast_fire(inputs),
        Strategy::LeanFire => evaluate_lean_fire(inputs),
        Strategy::FatFire => evaluate_fat_fire(inputs),
        Strategy::BaristaFire => evaluate_barista_fire(inputs),
        Strategy::Fine => evaluate_fine(inputs),
        Strategy::Traditional => evaluate_traditional(inputs),
    }
}

pub fn run_plan(inputs: &Inputs) -> PlanResult {
    let projections = Strategy::ALL
        .iter()
        .map(|strategy| evaluate_strategy(*strategy, inputs))
        .collect();
    PlanResult { projections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Lifestyle;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_inputs() -> Inputs {
        Inputs {
            current_age: 30,
            retirement_age: 65,
            current_savings: 50_000.0,
            monthly_expenses: 3_000.0,
            annual_income: 60_000.0,
            savings_rate: 30.0,
            expected_return: 7.0,
            inflation_rate: 3.0,
            social_security_age: 67,
            estimated_social_security: 1_500.0,
            part_time_income: 1_500.0,
            desired_lifestyle: Lifestyle::Moderate,
        }
    }

    #[test]
    fn regular_fire_target_is_twenty_five_times_annual_expenses() {
        let inputs = sample_inputs();
        let projection = evaluate_regular_fire(&inputs);
        assert_approx_tol(
            projection.target_amount,
            inputs.monthly_expenses * 12.0 * 25.0,
            1e-6,
        );
        assert_approx(projection.safe_withdrawal_amount, 36_000.0);
        assert_approx(projection.projected_annual_expenses, 36_000.0);
    }

    #[test]
    fn monthly_investment_is_saved_share_of_income() {
        let inputs = sample_inputs();
        let projection = evaluate_regular_fire(&inputs);
        assert_approx(projection.monthly_investment, 1_500.0);
    }

    #[test]
    fn end_to_end_scenario_converges_near_the_target() {
        let inputs = sample_inputs();
        let projection = evaluate_regular_fire(&inputs);

        assert_approx_tol(projection.target_amount, 900_000.0, 1e-6);
        assert!(projection.years_to_target > 0.0);
        assert!(projection.years_to_target < 100.0);
        assert!(projection.is_feasible);
        assert_approx_tol(
            projection.retirement_age,
            30.0 + projection.years_to_target,
            1e-9,
        );

        let fv = future_value(
            inputs.current_savings,
            projection.monthly_investment,
            0.07,
            projection.years_to_target,
        );
        let relative_error = (fv - 900_000.0).abs() / 900_000.0;
        assert!(
            relative_error < 0.01,
            "future value {fv} is not within 1% of the target"
        );
    }

    #[test]
    fn lean_and_fat_scale_the_regular_target() {
        let inputs = sample_inputs();
        let regular = evaluate_regular_fire(&inputs);
        let lean = evaluate_lean_fire(&inputs);
        let fat = evaluate_fat_fire(&inputs);

        assert!(lean.target_amount < regular.target_amount);
        assert!(regular.target_amount < fat.target_amount);
        assert_approx_tol(lean.target_amount / regular.target_amount, 0.7, 1e-9);
        assert_approx_tol(fat.target_amount / regular.target_amount, 2.0, 1e-9);
    }

    #[test]
    fn barista_part_time_income_reduces_the_target() {
        let inputs = sample_inputs();
        let regular = evaluate_regular_fire(&inputs);
        let barista = evaluate_barista_fire(&inputs);
        assert!(barista.target_amount < regular.target_amount);

        // The withdrawal figure includes the part-time stream on top of the
        // 4% draw against the smaller pot.
        assert_approx(
            barista.safe_withdrawal_amount,
            barista.target_amount * 0.04 + 18_000.0,
        );

        let mut no_part_time = inputs.clone();
        no_part_time.part_time_income = 0.0;
        let barista_without = evaluate_barista_fire(&no_part_time);
        assert_approx_tol(barista_without.target_amount, regular.target_amount, 1e-6);
    }

    #[test]
    fn barista_target_floors_at_zero_when_income_covers_expenses() {
        let mut inputs = sample_inputs();
        inputs.part_time_income = inputs.monthly_expenses * 2.0;
        let barista = evaluate_barista_fire(&inputs);
        assert_approx(barista.target_amount, 0.0);
    }

    #[test]
    fn fine_matches_regular_fire_numbers() {
        let inputs = sample_inputs();
        let regular = evaluate_regular_fire(&inputs);
        let fine = evaluate_fine(&inputs);

        assert_eq!(fine.strategy, Strategy::Fine);
        assert_approx(fine.target_amount, regular.target_amount);
        assert_approx(fine.years_to_target, regular.years_to_target);
        assert_approx(fine.safe_withdrawal_amount, regular.safe_withdrawal_amount);
        assert!(fine.notes != regular.notes);
    }

    #[test]
    fn coast_number_is_the_discounted_future_fi_number() {
        let inputs = sample_inputs();
        let coast = evaluate_coast_fire(&inputs);

        let future_expenses = 36_000.0 * 1.03f64.powf(35.0);
        let full_target = future_expenses / 0.04;
        let expected_coast = full_target / 1.07f64.powf(35.0);
        assert_approx_tol(coast.target_amount, expected_coast, 1e-6);
        assert_approx_tol(coast.projected_annual_expenses, future_expenses, 1e-6);
        assert_approx_tol(coast.safe_withdrawal_amount, full_target * 0.04, 1e-6);
    }

    #[test]
    fn coast_fire_is_not_feasible_once_coasting() {
        let mut inputs = sample_inputs();
        inputs.current_savings = 10_000_000.0;
        let coast = evaluate_coast_fire(&inputs);
        assert!(inputs.current_savings >= coast.target_amount);
        assert!(!coast.is_feasible);
    }

    #[test]
    fn traditional_years_are_fixed_not_solved() {
        let inputs = sample_inputs();
        let traditional = evaluate_traditional(&inputs);
        assert_approx(traditional.years_to_target, 35.0);
        assert_approx(traditional.retirement_age, 65.0);
    }

    #[test]
    fn traditional_feasibility_uses_the_eighty_percent_threshold() {
        let mut inputs = sample_inputs();
        inputs.current_savings = 0.0;
        inputs.annual_income = 0.0;
        let short = evaluate_traditional(&inputs);
        assert!(short.target_amount > 0.0);
        assert!(!short.is_feasible);

        // Social Security covering all future spending leaves nothing to fund.
        let mut covered = sample_inputs();
        covered.estimated_social_security = 50_000.0;
        let funded = evaluate_traditional(&covered);
        assert_approx(funded.target_amount, 0.0);
        assert!(funded.is_feasible);
    }

    #[test]
    fn traditional_includes_social_security_in_withdrawal_income() {
        let inputs = sample_inputs();
        let traditional = evaluate_traditional(&inputs);
        assert_approx(
            traditional.safe_withdrawal_amount,
            traditional.target_amount * 0.04 + 18_000.0,
        );
    }

    #[test]
    fn run_plan_emits_all_strategies_in_fixed_order() {
        let plan = run_plan(&sample_inputs());
        assert_eq!(plan.projections.len(), Strategy::ALL.len());
        for (projection, strategy) in plan.projections.iter().zip(Strategy::ALL) {
            assert_eq!(projection.strategy, strategy);
        }
        assert!(plan.projection(Strategy::BaristaFire).is_some());
    }

    #[test]
    fn zero_savings_rate_without_savings_is_unreachable() {
        let mut inputs = sample_inputs();
        inputs.current_savings = 0.0;
        inputs.savings_rate = 0.0;
        let regular = evaluate_regular_fire(&inputs);
        assert_eq!(regular.years_to_target, f64::INFINITY);
        assert!(!regular.is_feasible);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_barista_never_needs_more_than_regular(
            monthly_expenses in 100u32..20_000,
            part_time_income in 0u32..20_000,
            current_savings in 0u32..1_000_000,
            annual_income in 0u32..300_000,
            savings_rate in 0u32..101
        ) {
            let mut inputs = sample_inputs();
            inputs.monthly_expenses = monthly_expenses as f64;
            inputs.part_time_income = part_time_income as f64;
            inputs.current_savings = current_savings as f64;
            inputs.annual_income = annual_income as f64;
            inputs.savings_rate = savings_rate as f64;

            let regular = evaluate_regular_fire(&inputs);
            let barista = evaluate_barista_fire(&inputs);
            prop_assert!(barista.target_amount <= regular.target_amount + 1e-9);
            if part_time_income == 0 {
                prop_assert!((barista.target_amount - regular.target_amount).abs() <= 1e-6);
            }
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_plan_outputs_are_well_formed(
            current_age in 18u32..70,
            retirement_span in 0u32..50,
            current_savings in 0u32..2_000_000,
            monthly_expenses in 100u32..20_000,
            annual_income in 0u32..500_000,
            savings_rate in 0u32..101,
            expected_return_bp in 0u32..2000,
            inflation_bp in 0u32..800
        ) {
            let inputs = Inputs {
                current_age,
                retirement_age: current_age + retirement_span,
                current_savings: current_savings as f64,
                monthly_expenses: monthly_expenses as f64,
                annual_income: annual_income as f64,
                savings_rate: savings_rate as f64,
                expected_return: expected_return_bp as f64 / 100.0,
                inflation_rate: inflation_bp as f64 / 100.0,
                social_security_age: 67,
                estimated_social_security: 1_500.0,
                part_time_income: 1_500.0,
                desired_lifestyle: Lifestyle::Moderate,
            };

            let plan = run_plan(&inputs);
            prop_assert!(plan.projections.len() == 7);
            for projection in &plan.projections {
                prop_assert!(projection.target_amount >= 0.0);
                prop_assert!(projection.target_amount.is_finite());
                prop_assert!(projection.years_to_target >= 0.0);
                prop_assert!(projection.monthly_investment >= 0.0);
                prop_assert!(projection.notes.len() == 3);
            }
        }
    }
}
