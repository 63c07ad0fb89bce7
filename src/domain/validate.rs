use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a title")]
    EmptyTitle,

    #[error("Title cannot be just a number")]
    NumericTitle,

    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

pub type ValidationResult = Result<(), ValidationError>;

/// Check a proposed title before it is sent anywhere. Rules apply in order,
/// first violation wins: the trimmed title must be non-empty and must not
/// parse as a finite number (a numeric-only title is almost always pasted
/// data, not a real task).
pub fn validate_title(title: &str) -> ValidationResult {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    if trimmed
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
    {
        return Err(ValidationError::NumericTitle);
    }

    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> ValidationResult {
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    if password.len() < 6 {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(())
}

pub fn validate_signup(username: &str, email: &str, password: &str) -> ValidationResult {
    if username.trim().len() < 3 {
        return Err(ValidationError::UsernameTooShort);
    }

    validate_login(email, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace_titles() {
        for title in ["", " ", "   ", "\t", "\n  \t"] {
            assert_eq!(validate_title(title), Err(ValidationError::EmptyTitle));
        }
    }

    #[test]
    fn rejects_numeric_titles() {
        for title in ["123", "4.5", "  42  ", "0", "-17", "3.14159", "1e5"] {
            assert_eq!(
                validate_title(title),
                Err(ValidationError::NumericTitle),
                "expected {title:?} to be rejected as numeric"
            );
        }
    }

    #[test]
    fn empty_wins_over_numeric_for_whitespace() {
        // Ordering matters: whitespace-only input is an empty title, not a
        // failed number parse.
        assert_eq!(validate_title("   "), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn accepts_free_text_titles() {
        for title in ["Buy milk", "42 things to do", "a", "infinity", "NaN"] {
            assert_eq!(validate_title(title), Ok(()), "expected {title:?} to pass");
        }
    }

    #[test]
    fn login_credentials_are_checked_before_the_network() {
        assert_eq!(
            validate_login("not-an-email", "secret1"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_login("a@b.com", "short"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_login("a@b.com", "secret1"), Ok(()));
    }

    #[test]
    fn signup_requires_a_username() {
        assert_eq!(
            validate_signup("ab", "a@b.com", "secret1"),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(validate_signup("abc", "a@b.com", "secret1"), Ok(()));
    }
}
