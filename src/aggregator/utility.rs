/// Computes the arithmetic mean of a slice of values. Returns `None` for
/// empty input so that "no scores" stays distinct from a mean of zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `true` if `s` is a non-empty run of ASCII decimal digits.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
