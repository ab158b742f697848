/// Format a dollar amount compactly ("$3.51T", "$521.0B", "$7.8M").
pub fn format_money(value: f64) -> String {
    format!("${}", format_compact(value))
}

/// Format a count or amount with a thousands suffix ("231.4M", "950K", "42").
pub fn format_compact(value: f64) -> String {
    // (unit, suffix, decimals), smallest first
    const SCALES: [(f64, &str, usize); 5] = [
        (1.0, "", 0),
        (1e3, "K", 0),
        (1e6, "M", 1),
        (1e9, "B", 1),
        (1e12, "T", 2),
    ];

    let sign = if value < 0.0 { "-" } else { "" };
    let v = value.abs();
    // Suffix is chosen on the rounded value: 999.96B prints as 1.00T, not 1000.0B.
    let (unit, suffix, decimals) = SCALES
        .iter()
        .copied()
        .find(|&(unit, _, decimals)| round_to(v / unit, decimals) < 1000.0)
        .unwrap_or(SCALES[SCALES.len() - 1]);
    format!("{}{:.*}{}", sign, decimals, round_to(v / unit, decimals), suffix)
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Signed percent change with two decimals ("+1.42%", "-0.38%").
pub fn format_change(percent: f64) -> String {
    format!("{:+.2}%", percent)
}
