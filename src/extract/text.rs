/// Extracts the integer formed by all digits of a text
///
/// Separators and units are ignored, so `"€ 1.250.000"` becomes `1250000`
/// and `"150 m²"` becomes `150`. Returns `None` when there are no digits or
/// the number does not fit in a `u64`.
///
/// # Examples
///
/// ```
/// use immo_harvest::extract::clean_numeric;
///
/// assert_eq!(clean_numeric("€ 349.000"), Some(349000));
/// assert_eq!(clean_numeric("1030 Schaerbeek"), Some(1030));
/// assert_eq!(clean_numeric("n/a"), None);
/// ```
pub fn clean_numeric(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Maps a yes/no style label onto a 0/1 flag
///
/// Equipment labels are folded in as well: a fully or super equipped value
/// counts as present. `No`, `0`, partial equipment and unknown labels all
/// count as absent.
pub fn flag_value(label: &str) -> u8 {
    u8::from(matches!(label, "Yes" | "Fully equipped" | "Super equipped"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_numeric() {
        assert_eq!(clean_numeric("€ 1.250.000"), Some(1_250_000));
        assert_eq!(clean_numeric("150 m²"), Some(150));
        assert_eq!(clean_numeric("3"), Some(3));
    }

    #[test]
    fn test_clean_numeric_without_digits() {
        assert_eq!(clean_numeric(""), None);
        assert_eq!(clean_numeric("Price on request"), None);
    }

    #[test]
    fn test_clean_numeric_overflow() {
        assert_eq!(clean_numeric("99999999999999999999999"), None);
    }

    #[test]
    fn test_flag_value() {
        assert_eq!(flag_value("Yes"), 1);
        assert_eq!(flag_value("No"), 0);
        assert_eq!(flag_value("0"), 0);
        assert_eq!(flag_value("Super equipped"), 1);
        assert_eq!(flag_value("Partially equipped"), 0);
        assert_eq!(flag_value("Maybe"), 0);
    }
}
