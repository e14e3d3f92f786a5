//! Number formatting for G-code output
//!
//! All lengths are millimeters. Coordinates are written in fixed six-decimal
//! notation, feeds and spindle speeds in shortest round-trip notation, so a
//! program is byte-identical for identical parameters.

/// Number of decimals used for every coordinate word.
pub const COORD_DECIMALS: usize = 6;

/// Format a coordinate with six decimals (`12.5` -> `12.500000`).
///
/// Exact negative zero is written as `0.000000`; tiny negative values keep
/// their sign (`-0.000000`).
pub fn format_coord(value: f64) -> String {
    format!("{:.*}", COORD_DECIMALS, normalize_zero(value))
}

/// Format a feed or speed value in shortest round-trip notation.
///
/// Integral values have no decimal point (`1000`), fractional values keep
/// only the digits needed (`100.5`). Magnitudes below `1e-6` or at least
/// `1e21` switch to exponent notation with an explicit sign (`1e-7`, `1e+21`).
pub fn format_number(value: f64) -> String {
    let value = normalize_zero(value);
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let magnitude = value.abs();
    if value == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
