//! Fixed-point currency helpers. Amounts are stored pre-rounded to two
//! decimal places; sums over stored amounts are never re-rounded except at
//! final display.

/// Rounds a currency amount to two decimal places, half away from zero.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount for display with thousands grouping, e.g. `1,234.50`.
pub fn format_amount(value: f64) -> String {
    let rounded = round_currency(value);
    let body = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some(parts) => parts,
        None => (body.as_str(), "00"),
    };
    let grouped = group_digits(int_part);
    if rounded < 0.0 {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(0.125), 0.13);
        assert_eq!(round_currency(-0.125), -0.13);
        assert_eq!(round_currency(1.004), 1.0);
        assert_eq!(round_currency(954.5454545454545), 954.55);
    }

    #[test]
    fn leaves_exact_amounts_alone() {
        assert_eq!(round_currency(1200.0), 1200.0);
        assert_eq!(round_currency(-42.5), -42.5);
    }

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(-1234567.891), "-1,234,567.89");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.0), "999.00");
    }
}
