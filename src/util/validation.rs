//! Loose shape checks shared by the booking form, the contact relay and the
//! newsletter signup. These are deliberately permissive and are not RFC
//! address validation.

/// `local@domain.tld` where no part contains `@` or whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // needs a dot with at least one character on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// At least 10 characters from `0-9 - + ( )` once whitespace is removed.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 10
        && compact
            .iter()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '(' | ')'))
}

/// True when the field is absent or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
