use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lifestyle {
    Lean,
    Moderate,
    Fat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RegularFire,
    CoastFire,
    LeanFire,
    FatFire,
    BaristaFire,
    Fine,
    Traditional,
}

impl Strategy {
    /// Fixed evaluation order; `run_plan` emits projections in this order.
    pub const ALL: [Strategy; 7] = [
        Strategy::RegularFire,
        Strategy::CoastFire,
        Strategy::LeanFire,
        Strategy::FatFire,
        Strategy::BaristaFire,
        Strategy::Fine,
        Strategy::Traditional,
    ];
}

/// One evaluation's worth of user assumptions. Built whole per recomputation;
/// the engine never mutates it.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_expenses: f64,
    pub annual_income: f64,
    pub savings_rate: f64,
    pub expected_return: f64,
    pub inflation_rate: f64,
    pub social_security_age: u32,
    pub estimated_social_security: f64,
    pub part_time_income: f64,
    // Carried for callers that persist the full form; no evaluator reads it.
    pub desired_lifestyle: Lifestyle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub strategy: Strategy,
    pub target_amount: f64,
    pub years_to_target: f64,
    pub monthly_investment: f64,
    pub retirement_age: f64,
    pub projected_annual_expenses: f64,
    pub safe_withdrawal_amount: f64,
    pub is_feasible: bool,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PlanResult {
    pub projections: Vec<Projection>,
}

impl PlanResult {
    pub fn projection(&self, strategy: Strategy) -> Option<&Projection> {
        self.projections.iter().find(|p| p.strategy == strategy)
    }
}
