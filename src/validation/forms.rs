use serde::Serialize;

/// One field-level validation failure, in the shape the frontend
/// already consumes: `{"msg": ..., "path": ..., "location": "body"}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub msg: String,
    pub path: String,
    pub location: String,
}

impl FieldError {
    fn body(path: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            path: path.to_string(),
            location: "body".to_string(),
        }
    }
}

/// Checks an email address against a minimal grammar: exactly one `@`,
/// a non-empty local part, and a domain with a dot and no empty labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Checks a mobile phone number: an optional leading `+` followed by
/// 7 to 15 digits.
pub fn is_valid_mobile_number(number: &str) -> bool {
    let digits = number.strip_prefix('+').unwrap_or(number);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Validates the signup form, collecting every failing rule.
///
/// The terms-and-conditions checkbox is deliberately absent here: the
/// upstream rule checked a misspelled field name that is never present
/// in the body, so the checkbox was observably never validated. We keep
/// that behavior rather than silently tightening signup.
pub fn validate_signup(name: &str, email: &str, password: &str, number: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(FieldError::body("name", "Name is required"));
    }
    if !is_valid_email(email) {
        errors.push(FieldError::body("email", "Invalid email address"));
    }
    if password.len() < 8 {
        errors.push(FieldError::body(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if !is_valid_mobile_number(number) {
        errors.push(FieldError::body("number", "Invalid phone number"));
    }
    errors
}

/// Validates the login form.
pub fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push(FieldError::body("email", "Invalid email address"));
    }
    if password.len() < 8 {
        errors.push(FieldError::body(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    errors
}

/// Coerces the raw checkbox value from the form body to a boolean.
pub fn coerce_terms(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("on") | Some("1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_email() {
        assert!(is_valid_email("jo@x.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("jo"));
        assert!(!is_valid_email("jo@"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("jo@xcom"));
        assert!(!is_valid_email("jo@x..com"));
        assert!(!is_valid_email("jo @x.com"));
        assert!(!is_valid_email("jo@@x.com"));
    }

    #[test]
    fn accepts_plausible_mobile_numbers() {
        assert!(is_valid_mobile_number("+14155552671"));
        assert!(is_valid_mobile_number("4155552671"));
    }

    #[test]
    fn rejects_malformed_mobile_numbers() {
        assert!(!is_valid_mobile_number(""));
        assert!(!is_valid_mobile_number("12345"));
        assert!(!is_valid_mobile_number("+1 415 555 2671"));
        assert!(!is_valid_mobile_number("not-a-number"));
        assert!(!is_valid_mobile_number("+"));
        assert!(!is_valid_mobile_number("12345678901234567890"));
    }

    #[test]
    fn short_password_always_fails_signup() {
        let errors = validate_signup("Jo", "jo@x.com", "short", "+14155552671");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "password");
        assert_eq!(errors[0].msg, "Password must be at least 8 characters");
        assert_eq!(errors[0].location, "body");
    }

    #[test]
    fn signup_collects_every_failing_field() {
        let errors = validate_signup("", "bad", "short", "nope");
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["name", "email", "password", "number"]);
    }

    #[test]
    fn valid_signup_has_no_errors() {
        let errors = validate_signup("Jo", "jo@x.com", "password1", "+14155552671");
        assert!(errors.is_empty());
    }

    #[test]
    fn login_validates_email_and_password() {
        assert!(validate_login("jo@x.com", "password1").is_empty());
        assert_eq!(validate_login("bad", "password1").len(), 1);
        assert_eq!(validate_login("jo@x.com", "short").len(), 1);
        assert_eq!(validate_login("bad", "short").len(), 2);
    }

    #[test]
    fn terms_checkbox_coercion() {
        assert!(coerce_terms(Some("true")));
        assert!(coerce_terms(Some("on")));
        assert!(coerce_terms(Some("1")));
        assert!(!coerce_terms(Some("false")));
        assert!(!coerce_terms(Some("")));
        assert!(!coerce_terms(None));
    }
}
