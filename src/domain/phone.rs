//! North American phone number helpers.

/// Length of a number rendered as `(xxx) xxx-xxxx`.
pub const FORMATTED_PHONE_LENGTH: usize = 14;

/// Digits required for a phone search.
pub const SEARCH_PHONE_DIGITS: usize = 10;

/// Removes the formatting characters `(`, `)`, `-` and whitespace.
#[must_use]
pub fn strip(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '-') && !c.is_whitespace())
        .collect()
}

/// Keeps only ASCII digits.
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Formats ten digits as `(xxx) xxx-xxxx`. Returns `None` for anything else.
#[must_use]
pub fn format(input: &str) -> Option<String> {
    let digits = digits_only(input);
    if digits.len() != SEARCH_PHONE_DIGITS {
        return None;
    }
    Some(format!(
        "({}) {}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..]
    ))
}

/// Progressive mask used while typing; never longer than the formatted form.
#[must_use]
pub fn mask_partial(input: &str) -> String {
    let digits: String = digits_only(input)
        .chars()
        .take(SEARCH_PHONE_DIGITS)
        .collect();
    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({digits}"),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// True when the input holds exactly ten digits once formatting is stripped.
#[must_use]
pub fn is_search_number(input: &str) -> bool {
    let stripped = strip(input);
    stripped.len() == SEARCH_PHONE_DIGITS && stripped.chars().all(|c| c.is_ascii_digit())
}

/// True when the input is a complete formatted number.
#[must_use]
pub fn is_complete(formatted: &str) -> bool {
    formatted.chars().count() == FORMATTED_PHONE_LENGTH && format(formatted).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("5551234567", true ; "bare digits")]
    #[test_case("(555) 123-4567", true ; "formatted")]
    #[test_case("555 123 4567", true ; "spaced")]
    #[test_case("555123456", false ; "nine digits")]
    #[test_case("55512345678", false ; "eleven digits")]
    #[test_case("555-123-456a", false ; "letter")]
    #[test_case("", false ; "empty")]
    fn test_is_search_number(input: &str, expected: bool) {
        assert_eq!(is_search_number(input), expected);
    }

    #[test]
    fn test_format() {
        assert_eq!(format("5551234567").as_deref(), Some("(555) 123-4567"));
        assert_eq!(format("12345"), None);
    }

    #[test_case("", "" ; "empty")]
    #[test_case("55", "(55" ; "area code partial")]
    #[test_case("55512", "(555) 12" ; "exchange partial")]
    #[test_case("555123456789", "(555) 123-4567" ; "overflow truncated")]
    fn test_mask_partial(input: &str, expected: &str) {
        assert_eq!(mask_partial(input), expected);
    }

    #[test]
    fn test_is_complete() {
        assert!(is_complete("(555) 123-4567"));
        assert!(!is_complete("(555) 123-456"));
        assert!(!is_complete("5551234567"));
    }

    #[test]
    fn test_strip_keeps_other_symbols() {
        assert_eq!(strip("(555) 12+3"), "55512+3");
    }
}
