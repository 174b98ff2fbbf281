use std::sync::Arc;

use tracing::warn;

use crate::error::GraphError;

/// Hook that rewrites default tick labels. Receives the widget path and the
/// default label text.
pub type TickLabelFormatterFn =
    Arc<dyn Fn(&str, &str) -> Result<String, String> + Send + Sync + 'static>;

/// Longest label kept, in characters.
pub const TICK_LABEL_MAX_CHARS: usize = 200;

const GENERAL_PRECISION: i32 = 15;

/// Tolerance for treating a log tick as a whole decade.
const DECADE_EPSILON: f64 = 1e-9;

/// Default label of a major tick. Log axis ticks are in decade units:
/// whole decades print as `1E<n>`, anything between decades prints the
/// data value. Linear values use `%.15g`-style formatting.
#[must_use]
pub fn default_tick_label(tick: f64, log_scale: bool) -> String {
    if !log_scale {
        return format_general(tick);
    }
    let decade = tick.round();
    if (tick - decade).abs() < DECADE_EPSILON {
        format!("1E{}", decade as i64)
    } else {
        format_general(10_f64.powf(tick))
    }
}

/// Formats like C's `%.15g`: shortest of fixed and exponent notation with
/// trailing zeros removed.
#[must_use]
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let scientific = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..GENERAL_PRECISION).contains(&exponent) {
        let decimals = (GENERAL_PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Builds the label for `tick`, running the formatting hook when one is
/// installed. Hook failures keep the default text.
pub(super) fn make_tick_label(
    tick: f64,
    log_scale: bool,
    widget_path: &str,
    formatter: Option<&TickLabelFormatterFn>,
) -> String {
    let default = default_tick_label(tick, log_scale);
    let text = match formatter {
        None => default,
        Some(formatter) => match formatter(widget_path, &default) {
            Ok(text) => text,
            Err(message) => {
                let err = GraphError::LabelFormat(message);
                warn!(
                    widget = widget_path,
                    label = %default,
                    error = %err,
                    "keeping default tick label"
                );
                default
            }
        },
    };
    truncate_label(text)
}

fn truncate_label(text: String) -> String {
    match text.char_indices().nth(TICK_LABEL_MAX_CHARS) {
        Some((end, _)) => text[..end].to_owned(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::{default_tick_label, format_general, truncate_label};

    #[test]
    fn general_format_matches_printf_g() {
        assert_eq!(format_general(20.0), "20");
        assert_eq!(format_general(0.1 + 0.2), "0.3");
        assert_eq!(format_general(-2.5), "-2.5");
        assert_eq!(format_general(1e-5), "1e-05");
        assert_eq!(format_general(1.5e20), "1.5e+20");
        assert_eq!(format_general(123_456.0), "123456");
    }

    #[test]
    fn log_ticks_print_as_decades() {
        assert_eq!(default_tick_label(3.0, true), "1E3");
        assert_eq!(default_tick_label(-2.0, true), "1E-2");
    }

    #[test]
    fn log_ticks_between_decades_print_their_value() {
        assert_eq!(default_tick_label(3_f64.log10(), true), "3");
        assert_eq!(default_tick_label(0.5_f64.log10(), true), "0.5");
    }

    #[test]
    fn long_labels_are_capped() {
        let label = truncate_label("9".repeat(500));
        assert_eq!(label.chars().count(), 200);
    }
}
