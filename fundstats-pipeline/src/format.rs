//! Caption formatting shared by the metrics panel and the geo tooltips.

/// Group an integer's digits in threes: `1234567` → `"1,234,567"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round to a whole number and group digits; keeps the sign.
pub fn thousands_rounded(value: f64) -> String {
    let rounded = value.round();
    let grouped = thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Share of `part` in `total` as a percentage; zero when the total is zero.
pub fn share_pct(part: f64, total: f64) -> f64 {
    if total != 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// `"20.0%"`, or `"0%"` when there is no total to take a share of.
pub fn pct_caption(part: f64, total: f64) -> String {
    if total != 0.0 {
        format!("{:.1}%", share_pct(part, total))
    } else {
        "0%".to_string()
    }
}

pub fn nav_caption(nav: f64) -> String {
    format!("USD {nav:.1}T")
}

pub fn leverage_caption(ratio: f64) -> String {
    format!("{ratio:.2}x NAV")
}
