#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub(crate) fn not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(())
}

/// Length bounds are counted in characters, not bytes.
pub(crate) fn length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(
            field,
            format!("size must be between {min} and {max}"),
        ));
    }
    Ok(())
}

pub(crate) fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new(field, "must be a well-formed email address");
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || value.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(email("email", "yoga@studio.com").is_ok());
        assert!(email("email", "a@b").is_ok());
        assert!(email("email", "invalid-email").is_err());
        assert!(email("email", "@studio.com").is_err());
        assert!(email("email", "a@@studio.com").is_err());
        assert!(email("email", "a b@studio.com").is_err());
    }

    #[test]
    fn length_counts_chars() {
        assert!(length("name", "Hélène", 3, 6).is_ok());
        assert!(length("name", "Jo", 3, 20).is_err());
        assert_eq!(
            length("name", &"J".repeat(21), 3, 20).unwrap_err().to_string(),
            "name size must be between 3 and 20"
        );
    }
}
