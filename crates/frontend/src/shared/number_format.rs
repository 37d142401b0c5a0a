//! Indonesian (id-ID) number formatting: `.` groups thousands, `,` marks decimals.

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `12500.4` → `"12.500"`.
pub fn format_number(value: f64) -> String {
    format_decimal(value, 0)
}

/// `1234.5, 2` → `"1.234,50"`.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// `10000.0` → `"Rp. 10.000"`.
pub fn format_rupiah(value: f64) -> String {
    if value < 0.0 {
        format!("-Rp. {}", format_number(-value))
    } else {
        format!("Rp. {}", format_number(value))
    }
}

pub fn format_opt_rupiah(value: Option<f64>) -> String {
    value.map(format_rupiah).unwrap_or_else(|| "-".to_string())
}

pub fn format_opt_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

/// Short form for chart axes: `"850"`, `"12,5 rb"`, `"3,4 jt"`, `"1,2 M"`.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, " M")
    } else if abs >= 1e6 {
        (value / 1e6, " jt")
    } else if abs >= 1e3 {
        (value / 1e3, " rb")
    } else {
        return format_number(value);
    };
    let text = format_decimal(scaled, 1);
    let text = text.strip_suffix(",0").unwrap_or(&text);
    format!("{}{}", text, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(500.0), "500");
        assert_eq!(format_number(10_000.0), "10.000");
        assert_eq!(format_number(1_234_567.4), "1.234.567");
        assert_eq!(format_number(-2_500.0), "-2.500");
        assert_eq!(format_number(-0.2), "0");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(format_decimal(1234.5, 2), "1.234,50");
        assert_eq!(format_decimal(f64::NAN, 2), "-");
    }

    #[test]
    fn test_rupiah() {
        assert_eq!(format_rupiah(10_000.0), "Rp. 10.000");
        assert_eq!(format_rupiah(-5_000.0), "-Rp. 5.000");
        assert_eq!(format_opt_rupiah(None), "-");
    }

    #[test]
    fn test_compact() {
        assert_eq!(format_compact(850.0), "850");
        assert_eq!(format_compact(12_500.0), "12,5 rb");
        assert_eq!(format_compact(3_000_000.0), "3 jt");
        assert_eq!(format_compact(1_240_000_000.0), "1,2 M");
    }
}
