//! Lenient numeric normalization for spreadsheet cells.
//!
//! Malformed cells never fail a run: they degrade to a default. The rules,
//! applied in order:
//!
//! 1. missing, blank or whitespace-only → default
//! 2. any alphabetic character (units, placeholders, `n/a`, `1e3`) → default
//! 3. otherwise parse as a float; parse failure → default
//!
//! Results are always finite and never negative.

use crate::dataset::Cell;

/// Default used for every quantity cell the engine reads.
pub const DEFAULT_QUANTITY: f64 = 0.0;

/// Normalize a cell with [`DEFAULT_QUANTITY`] as the fallback.
pub fn quantity(cell: &Cell) -> f64 {
    quantity_or(cell, DEFAULT_QUANTITY)
}

/// Normalize a cell, falling back to `default`.
pub fn quantity_or(cell: &Cell, default: f64) -> f64 {
    match cell {
        Cell::Empty => default,
        Cell::Number(n) => accept(*n, default),
        Cell::Text(s) => parse_or(s, default),
    }
}

/// Normalize raw text, falling back to `default`.
pub fn parse_or(raw: &str, default: f64) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }
    if trimmed.chars().any(char::is_alphabetic) {
        return default;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => accept(n, default),
        Err(_) => default,
    }
}

/// Carton size: normalized, truncated to a whole number, at least 1.
pub fn carton_size(cell: &Cell) -> u32 {
    let n = quantity(cell).trunc();
    if n < 1.0 {
        1
    } else if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n as u32
    }
}

fn accept(n: f64, default: f64) -> f64 {
    if n.is_finite() && n >= 0.0 { n } else { default }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn blanks_yield_default() {
        assert_eq!(quantity(&Cell::Empty), 0.0);
        assert_eq!(quantity(&Cell::from("   ")), 0.0);
        assert_eq!(quantity_or(&Cell::from(""), 7.0), 7.0);
    }

    #[test]
    fn alphabetic_noise_yields_default() {
        assert_eq!(quantity(&Cell::from("12 pcs")), 0.0);
        assert_eq!(quantity(&Cell::from("n/a")), 0.0);
        assert_eq!(quantity(&Cell::from("1e3")), 0.0);
        assert_eq!(quantity(&Cell::from("inf")), 0.0);
        assert_eq!(quantity(&Cell::from("NaN")), 0.0);
    }

    #[test]
    fn malformed_numbers_yield_default() {
        assert_eq!(quantity(&Cell::from("1,234")), 0.0);
        assert_eq!(quantity(&Cell::from("--3")), 0.0);
        assert_eq!(quantity(&Cell::from("3.4.5")), 0.0);
    }

    #[test]
    fn well_formed_values_parse() {
        assert_eq!(quantity(&Cell::from(" 12.5 ")), 12.5);
        assert_eq!(quantity(&Cell::from("+4")), 4.0);
        assert_eq!(quantity(&Cell::from(8.0)), 8.0);
    }

    #[test]
    fn negative_and_non_finite_numbers_yield_default() {
        assert_eq!(quantity(&Cell::from("-5")), 0.0);
        assert_eq!(quantity(&Cell::from(-2.0)), 0.0);
        assert_eq!(quantity(&Cell::from(f64::NAN)), 0.0);
        assert_eq!(quantity(&Cell::from(f64::INFINITY)), 0.0);
    }

    #[test]
    fn carton_size_is_at_least_one() {
        assert_eq!(carton_size(&Cell::from(12.0)), 12);
        assert_eq!(carton_size(&Cell::from("6.9")), 6);
        assert_eq!(carton_size(&Cell::from(0.0)), 1);
        assert_eq!(carton_size(&Cell::from("box")), 1);
        assert_eq!(carton_size(&Cell::Empty), 1);
    }

    proptest! {
        #[test]
        fn output_is_always_finite_and_non_negative(raw in ".{0,16}") {
            let n = parse_or(&raw, DEFAULT_QUANTITY);
            prop_assert!(n.is_finite());
            prop_assert!(n >= 0.0);
        }

        #[test]
        fn non_negative_decimals_survive(n in 0.0f64..1_000_000.0) {
            let text = format!("{n}");
            prop_assert_eq!(parse_or(&text, DEFAULT_QUANTITY), n);
        }
    }
}
