use crate::error::{GraphError, GraphResult};

/// Tolerance used when comparing a normalized fraction against the nice
/// thresholds, so exact powers of ten survive `log10` rounding noise.
const FRACTION_EPSILON: f64 = 1e-9;

/// Picks a "nice" number (1, 2, 5 or 10 times a power of ten) close to `x`.
///
/// With `round` set the fraction snaps to the nearest nice value using the
/// thresholds 1.5, 3 and 7; otherwise it rounds up to the next nice value.
/// Heckbert's "Nice numbers for graph labels" (Graphics Gems, 1990).
pub fn nice_number(x: f64, round: bool) -> GraphResult<f64> {
    if !x.is_finite() || x <= 0.0 {
        return Err(GraphError::InvalidRange(format!(
            "nice number requires a finite value > 0, got {x}"
        )));
    }

    let mut exponent = x.log10().floor() as i32;
    let mut fraction = scale_by_decades(x, -exponent);
    if fraction >= 10.0 - FRACTION_EPSILON {
        exponent += 1;
        fraction = scale_by_decades(x, -exponent);
    } else if fraction < 1.0 - FRACTION_EPSILON {
        exponent -= 1;
        fraction = scale_by_decades(x, -exponent);
    }

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 + FRACTION_EPSILON {
        1.0
    } else if fraction <= 2.0 + FRACTION_EPSILON {
        2.0
    } else if fraction <= 5.0 + FRACTION_EPSILON {
        5.0
    } else {
        10.0
    };

    Ok(scale_by_decades(nice_fraction, exponent))
}

/// Returns `10^exponent` for integral exponents.
#[must_use]
pub fn exp10(exponent: i32) -> f64 {
    scale_by_decades(1.0, exponent)
}

/// Multiplies `value` by `10^decades`, dividing for negative exponents so
/// decimal fractions such as `0.2` stay correctly rounded.
fn scale_by_decades(value: f64, decades: i32) -> f64 {
    if decades >= 0 {
        value * 10_f64.powi(decades)
    } else {
        value / 10_f64.powi(-decades)
    }
}
