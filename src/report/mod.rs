//! Terminal report formatting
//!
//! Small string helpers shared by the binaries: section rules, banners,
//! and number formatting with thousands separators. Layout itself stays
//! in the binaries; only the formatting rules live here.

/// A horizontal rule of `width` copies of `ch`.
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// Heavy banner around a title:
/// `====…` / title / `====…`
pub fn banner(title: &str, width: usize) -> String {
    let line = rule('=', width);
    format!("{}\n{}\n{}", line, title, line)
}

/// Light section header: `────…` / title / `────…`
pub fn section(title: &str, width: usize) -> String {
    let line = rule('\u{2500}', width);
    format!("{}\n{}\n{}", line, title, line)
}

/// Format a number with comma thousands separators and a fixed number of
/// decimals, e.g. `fmt_thousands(64250.0, 2) == "64,250.00"`.
pub fn fmt_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_and_banner() {
        assert_eq!(rule('=', 5), "=====");
        let b = banner("TITLE", 10);
        assert_eq!(b.lines().count(), 3);
        assert_eq!(b.lines().nth(1), Some("TITLE"));
    }

    #[test]
    fn test_fmt_thousands() {
        assert_eq!(fmt_thousands(64250.0, 2), "64,250.00");
        assert_eq!(fmt_thousands(999.0, 2), "999.00");
        assert_eq!(fmt_thousands(1234567.0, 0), "1,234,567");
        assert_eq!(fmt_thousands(0.0, 0), "0");
    }

    #[test]
    fn test_fmt_thousands_rounds() {
        assert_eq!(fmt_thousands(1234567.891, 0), "1,234,568");
        assert_eq!(fmt_thousands(999.999, 2), "1,000.00");
    }

    #[test]
    fn test_fmt_thousands_negative() {
        assert_eq!(fmt_thousands(-1234.5, 2), "-1,234.50");
    }
}
