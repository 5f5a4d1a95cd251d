/// The 4% rule: annual sustainable withdrawal as a fraction of the portfolio,
/// equivalently a target of 25x annual spending.
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

pub(crate) const MONTHS_PER_YEAR: f64 = 12.0;

const MAX_HORIZON_YEARS: f64 = 100.0;
const YEARS_TOLERANCE: f64 = 0.01;

/// Value of `present_value` compounded monthly at `annual_rate / 12` for
/// `years * 12` months, plus the future value of an ordinary annuity of
/// `monthly_contribution` over the same horizon. `annual_rate` is a decimal
/// fraction (0.07 for 7%), `years` may be fractional.
pub fn future_value(
    present_value: f64,
    monthly_contribution: f64,
    annual_rate: f64,
    years: f64,
) -> f64 {
    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    let months = years * MONTHS_PER_YEAR;

    let fv_present = present_value * (1.0 + monthly_rate).powf(months);

    // Zero monthly rate degenerates the annuity sum to a plain total.
    let fv_contributions = if monthly_rate == 0.0 {
        monthly_contribution * months
    } else {
        monthly_contribution * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
    };

    fv_present + fv_contributions
}

/// Smallest `years >= 0` such that
/// `future_value(current_savings, monthly_contribution, annual_rate, years)`
/// reaches `target_amount`.
///
/// With a positive contribution this bisects over [0, 100] years to a 0.01
/// tolerance, which requires `future_value` to be monotonic in `years`; that
/// holds whenever `annual_rate >= 0` and `monthly_contribution >= 0`. Callers
/// must treat results near 100 as "not within the search horizon" rather than
/// an exact answer.
///
/// With no contribution the pure-compounding closed form is used. The result
/// is never NaN or negative: a balance already at or past the target answers
/// 0, and a balance that compounding alone can never carry to the target
/// (nothing saved, or a non-positive rate) answers `f64::INFINITY`.
pub fn years_to_target(
    current_savings: f64,
    target_amount: f64,
    monthly_contribution: f64,
    annual_rate: f64,
) -> f64 {
    if monthly_contribution <= 0.0 {
        return years_to_target_compounding_only(current_savings, target_amount, annual_rate);
    }

    let mut low = 0.0;
    let mut high = MAX_HORIZON_YEARS;
    let mut years = 0.0;

    while high - low > YEARS_TOLERANCE {
        years = (low + high) / 2.0;
        let fv = future_value(current_savings, monthly_contribution, annual_rate, years);
        if fv < target_amount {
            low = years;
        } else {
            high = years;
        }
    }

    years
}

fn years_to_target_compounding_only(
    current_savings: f64,
    target_amount: f64,
    annual_rate: f64,
) -> f64 {
    if current_savings >= target_amount {
        return 0.0;
    }
    if current_savings <= 0.0 {
        return f64::INFINITY;
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    if monthly_rate <= 0.0 {
        return f64::INFINITY;
    }

    (target_amount / current_savings).ln() / (1.0 + monthly_rate).ln() / MONTHS_PER_YEAR
}

/// `amount` grown by `inflation_rate` (decimal fraction) over `years`.
pub fn adjust_for_inflation(amount: f64, years: f64, inflation_rate: f64) -> f64 {
    amount * (1.0 + inflation_rate).powf(years)
}
