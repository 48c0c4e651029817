/// `1234567` → `"1,234,567"`.
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `1234567` → `"$1,234,567"`.
pub fn currency(value: i64) -> String {
    let grouped = thousands(value);
    match grouped.strip_prefix('-') {
        Some(magnitude) => format!("-${magnitude}"),
        None => format!("${grouped}"),
    }
}

/// `412000` → `"$412k"`, for chart axes.
pub fn compact_currency(value: i64) -> String {
    format!("${}k", (value as f64 / 1000.0).round() as i64)
}

/// Signed one-decimal percentage, e.g. `"+12.5%"`.
pub fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

/// One-decimal percentage without a sign on values that round to zero.
pub fn one_decimal_percent(value: f64) -> String {
    // Adding 0.0 turns -0.0 into 0.0.
    format!("{:.1}%", (value * 10.0).round() / 10.0 + 0.0)
}

/// How far `price` sits from `median`, in percent.
pub fn price_vs_median(price: i64, median: i64) -> f64 {
    if median == 0 {
        return 0.0;
    }
    (price as f64 - median as f64) / median as f64 * 100.0
}
