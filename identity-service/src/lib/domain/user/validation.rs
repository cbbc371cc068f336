//! Input rules for registration, as plain predicates.

pub const PHONE_NUMBER_PREFIX: &str = "09";
pub const PHONE_NUMBER_LENGTH: usize = 11;
pub const DISPLAY_NAME_MIN_LENGTH: usize = 3;
pub const DISPLAY_NAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Exactly 11 characters: the literal `09` followed by nine ASCII digits.
///
/// No trimming or country-code handling is applied.
pub fn is_valid_phone_number(s: &str) -> bool {
    s.len() == PHONE_NUMBER_LENGTH
        && s.starts_with(PHONE_NUMBER_PREFIX)
        && s[PHONE_NUMBER_PREFIX.len()..]
            .bytes()
            .all(|b| b.is_ascii_digit())
}

/// Between 3 and 50 characters inclusive, counted as Unicode scalar values.
pub fn is_valid_display_name(s: &str) -> bool {
    (DISPLAY_NAME_MIN_LENGTH..=DISPLAY_NAME_MAX_LENGTH).contains(&s.chars().count())
}

/// At least 8 characters. No upper bound and no composition rules.
pub fn is_valid_password(s: &str) -> bool {
    s.chars().count() >= PASSWORD_MIN_LENGTH
}
