//! Display formatting for stat cards and cells.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format an amount as currency, e.g. `-1234.5` as `"-$1,234.50"`.
pub fn currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// Format a row count with thousands separators, e.g. `1234567` as
/// `"1,234,567"`.
pub fn count(number: u64) -> String {
    static COUNT_FMT: OnceLock<Formatter> = OnceLock::new();

    let count_fmt = COUNT_FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    count_fmt.fmt_string(number as f64)
}

#[cfg(test)]
mod tests {
    use super::{count, currency};

    #[test]
    fn formats_positive_amounts_with_two_decimals() {
        assert_eq!("$1,234.50", currency(1234.5));
        assert_eq!("$12.34", currency(12.34));
    }

    #[test]
    fn formats_negative_amounts_with_a_leading_sign() {
        assert_eq!("-$12.30", currency(-12.3));
    }

    #[test]
    fn formats_zero_as_a_full_amount() {
        assert_eq!("$0.00", currency(0.0));
    }

    #[test]
    fn separates_thousands_in_counts() {
        assert_eq!("1,234,567", count(1_234_567));
        assert_eq!("0", count(0));
    }
}
