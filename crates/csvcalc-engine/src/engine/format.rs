/// Format a computed number as cell text.
///
/// The output must parse back to the same value, since formula results are
/// chained into other formulas as text.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        String::from(if n > 0.0 { "inf" } else { "-inf" })
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
