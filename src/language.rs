//! Language codes double as output file names, so they are checked before use

use std::collections::HashMap;

use crate::error::SplitError;

/// Build the error for a rejected `code`
fn invalid(code: &str, reason: impl Into<String>) -> SplitError {
    SplitError::InvalidLanguageCode {
        code: code.to_owned(),
        reason: reason.into(),
    }
}

/// Characters which are safe in a file name on every platform
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '+')
}

/// Check that a language code can be used as a file name inside the output directory
pub fn validate(code: &str) -> Result<(), SplitError> {
    if code.is_empty() {
        return Err(invalid(code, "language code is empty"));
    }

    // Rules out "." and ".." as well as hidden files
    if code.starts_with('.') {
        return Err(invalid(code, "language code must not start with '.'"));
    }

    match code.chars().find(|c| !is_allowed(*c)) {
        Some(c) => Err(invalid(
            code,
            format!("character {:?} is not allowed in a file name", c),
        )),
        None => Ok(()),
    }
}

/// Validate every code, and reject codes which would name the same file on a
/// case-insensitive file system
pub fn validate_all<'a>(codes: impl IntoIterator<Item = &'a str>) -> Result<(), SplitError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for code in codes {
        validate(code)?;

        if let Some(other) = seen.insert(code.to_ascii_lowercase(), code) {
            return Err(invalid(
                code,
                format!("file name collides with {:?} when case is ignored", other),
            ));
        }
    }

    Ok(())
}

/// Name of the file holding the translations for `code`
pub fn file_name(code: &str) -> String {
    format!("{}.json", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_accepts_common_codes() {
        for code in ["en", "en-US", "zh_Hant", "sr@latin", "pt-BR", "x+y", "de.formal"] {
            assert!(validate(code).is_ok(), "{} should be accepted", code);
        }
    }

    #[test]
    fn it_rejects_empty_codes() {
        assert!(matches!(
            validate(""),
            Err(SplitError::InvalidLanguageCode { .. })
        ));
    }

    #[test]
    fn it_rejects_dot_prefixes() {
        for code in [".", "..", ".hidden"] {
            assert!(validate(code).is_err(), "{} should be rejected", code);
        }
    }

    #[test]
    fn it_rejects_path_separators() {
        for code in ["../etc", "en/US", "en\\US", "a\0b", "en US", "c:", "fr\u{e9}"] {
            assert!(validate(code).is_err(), "{:?} should be rejected", code);
        }
    }

    #[test]
    fn it_names_the_offending_character() {
        let err = validate("en/US").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid language code \"en/US\": character '/' is not allowed in a file name"
        );
    }

    #[test]
    fn it_accepts_distinct_codes() {
        assert!(validate_all(["en", "en-US", "de", "zh_Hant"]).is_ok());
        assert!(validate_all([]).is_ok());
    }

    #[test]
    fn it_rejects_codes_colliding_without_case() {
        let err = validate_all(["en", "de", "EN"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid language code \"EN\": file name collides with \"en\" when case is ignored"
        );
    }

    #[test]
    fn it_checks_each_code_while_validating_all() {
        assert!(matches!(
            validate_all(["en", "../de"]),
            Err(SplitError::InvalidLanguageCode { .. })
        ));
    }

    #[test]
    fn it_builds_file_names() {
        assert_eq!(file_name("en"), "en.json");
        assert_eq!(file_name("sr@latin"), "sr@latin.json");
    }
}
