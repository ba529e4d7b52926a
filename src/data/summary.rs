use std::collections::BTreeMap;

use super::model::DerivedStats;

/// Derive the axis statistics for a parsed table.
pub fn summarize(time_values: &[f64], data_columns: &BTreeMap<String, Vec<f64>>) -> DerivedStats {
    DerivedStats {
        min_residual: min_residual(data_columns.values().flatten().copied()),
        max_iteration: max_iteration(time_values),
    }
}

/// Smallest finite positive value, rounded down to a power of ten.
/// Returns `1.0` when there is no such value.
pub fn min_residual(values: impl IntoIterator<Item = f64>) -> f64 {
    let min = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(f64::INFINITY, f64::min);

    if min.is_finite() {
        power_of_ten(order_of_magnitude(min))
    } else {
        1.0
    }
}

/// Largest finite value, or `1.0` if it is missing or not positive.
pub fn max_iteration(time_values: &[f64]) -> f64 {
    let max = time_values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);

    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// `floor(log10(value))` for a finite positive value.
///
/// `log10` can land a hair off an integer near exact powers of ten, so the
/// estimate is nudged until `10^e <= value < 10^(e + 1)`.
pub fn order_of_magnitude(value: f64) -> i32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }

    let mut exponent = value.log10().floor() as i32;
    if power_of_ten(exponent) > value {
        exponent -= 1;
    } else if power_of_ten(exponent + 1) <= value {
        exponent += 1;
    }
    exponent
}

/// Nearest `f64` to `10^exponent`, including the subnormal range.
///
/// Goes through the decimal parser so `10^-2` is exactly `0.01` and
/// `10^-310` is the subnormal `1e-310`. Never returns zero: below the
/// smallest subnormal the result is clamped to it.
fn power_of_ten(exponent: i32) -> f64 {
    let value = match format!("1e{exponent}").parse::<f64>() {
        Ok(v) => v,
        Err(_) => 10f64.powi(exponent),
    };
    if value > 0.0 {
        value
    } else {
        f64::from_bits(1)
    }
}
