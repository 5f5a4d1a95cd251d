mod growth;
mod strategies;
mod types;

pub use growth::{SAFE_WITHDRAWAL_RATE, adjust_for_inflation, future_value, years_to_target};
pub use strategies::{
    evaluate_barista_fire, evaluate_coast_fire, evaluate_fat_fire, evaluate_fine,
    evaluate_lean_fire, evaluate_regular_fire, evaluate_strategy, evaluate_traditional, run_plan,
};
pub use types::{Inputs, Lifestyle, PlanResult, Projection, Strategy};
