use num_format::{Locale, ToFormattedString};

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Whole-dollar USD with thousands separators: `$2,923,706,026`.
///
/// Cents are rounded half away from zero.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = (rounded.abs() as u64).to_formatted_string(&Locale::en);
    if rounded < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Axis tick label: `$` followed by one significant digit and an SI prefix
/// (`$500M`, `$2G`).
pub fn format_usd_tick(value: f64) -> String {
    let short = format_si(value);
    match short.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${short}"),
    }
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y", "R",
];

/// One significant digit with an SI prefix, e.g. `1.5e9` → `2G`.
pub fn format_si(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let mut exponent = abs.log10().floor() as i32;
    let mut digit = (abs / 10f64.powi(exponent)).round();
    if digit >= 10.0 {
        digit = 1.0;
        exponent += 1;
    }

    let group = exponent.div_euclid(3).clamp(-8, 8);
    let shift = exponent - group * 3;
    let prefix = SI_PREFIXES[(group + 8).clamp(0, 16) as usize];

    let coefficient = if shift >= 0 {
        format!("{}", digit as i64 * 10i64.pow(shift as u32))
    } else {
        format!("{}", digit * 10f64.powi(shift))
    };
    format!("{sign}{coefficient}{prefix}")
}

/// Year cell text; unknown years render empty.
pub fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_has_separators_and_no_cents() {
        assert_eq!(format_usd(2_923_706_026.0), "$2,923,706,026");
        assert_eq!(format_usd(999.49), "$999");
        assert_eq!(format_usd(999.5), "$1,000");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(-1234.0), "-$1,234");
    }

    #[test]
    fn si_uses_one_significant_digit() {
        assert_eq!(format_si(0.0), "0");
        assert_eq!(format_si(1_500_000_000.0), "2G");
        assert_eq!(format_si(500_000_000.0), "500M");
        assert_eq!(format_si(2_500_000_000.0), "3G");
        assert_eq!(format_si(960_000_000.0), "1G");
        assert_eq!(format_si(40_000.0), "40k");
        assert_eq!(format_si(7.0), "7");
        assert_eq!(format_si(-3_000_000.0), "-3M");
    }

    #[test]
    fn tick_labels_are_dollars() {
        assert_eq!(format_usd_tick(1e9), "$1G");
        assert_eq!(format_usd_tick(0.0), "$0");
        assert_eq!(format_usd_tick(-5e8), "-$500M");
    }

    #[test]
    fn year_text() {
        assert_eq!(format_year(Some(1997)), "1997");
        assert_eq!(format_year(None), "");
    }
}
