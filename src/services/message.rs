/// Service for message validation and processing
pub struct MessageService;

impl MessageService {
    /// Trim and validate compose-box content. Empty-after-trim input is
    /// rejected so the caller can treat it as a no-op.
    pub fn validate_message(content: &str, max_length: usize) -> Result<String, String> {
        let trimmed = content.trim();

        if trimmed.is_empty() {
            return Err("Message cannot be empty".to_string());
        }

        if trimmed.len() > max_length {
            return Err(format!("Message too long (max {} characters)", max_length));
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            MessageService::validate_message("  hi there \n", 2000),
            Ok("hi there".to_string())
        );
    }

    #[test]
    fn whitespace_only_is_rejected() {
        assert!(MessageService::validate_message("   \n\t", 2000).is_err());
    }

    #[test]
    fn over_long_content_is_rejected() {
        let long = "a".repeat(2001);
        assert!(MessageService::validate_message(&long, 2000).is_err());
    }
}
