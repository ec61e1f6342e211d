use crate::error::{Error, Result};

pub trait BoolExt {
    /// `"Yes"` or `"No"`.
    fn to_yes_no(self) -> &'static str;

    /// Render with a `"yes|no"` pattern, e.g. `"Ja|Nein"` or `"Oui|Non"`.
    fn to_yes_no_with(self, pattern: &str) -> Result<String>;

    /// Run `action` only when the value equals `expected`.
    fn do_on<F: FnOnce()>(self, expected: bool, action: F);
}

impl BoolExt for bool {
    fn to_yes_no(self) -> &'static str {
        if self {
            "Yes"
        } else {
            "No"
        }
    }

    fn to_yes_no_with(self, pattern: &str) -> Result<String> {
        let (yes, no) = pattern
            .split_once('|')
            .ok_or_else(|| Error::validation_format(pattern, "yes/no pattern (\"Yes|No\")"))?;
        let no = no.split('|').next().unwrap_or(no);
        Ok(if self { yes } else { no }.to_string())
    }

    fn do_on<F: FnOnce()>(self, expected: bool, action: F) {
        if self == expected {
            action();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_yes_no_defaults_to_english() {
        assert_eq!(true.to_yes_no(), "Yes");
        assert_eq!(false.to_yes_no(), "No");
    }

    #[test]
    fn to_yes_no_with_uses_pattern() {
        assert_eq!(true.to_yes_no_with("Ja|Nein").unwrap(), "Ja");
        assert_eq!(false.to_yes_no_with("Oui|Non").unwrap(), "Non");
    }

    #[test]
    fn to_yes_no_with_ignores_extra_segments() {
        assert_eq!(false.to_yes_no_with("Si|No|Maybe").unwrap(), "No");
    }

    #[test]
    fn to_yes_no_with_rejects_pattern_without_separator() {
        let err = true.to_yes_no_with("Yes").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.format_error");
    }

    #[test]
    fn do_on_runs_only_on_match() {
        let mut calls = 0;
        true.do_on(true, || calls += 1);
        true.do_on(false, || calls += 1);
        false.do_on(false, || calls += 1);
        assert_eq!(calls, 2);
    }
}
