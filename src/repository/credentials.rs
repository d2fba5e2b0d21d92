use crate::config::Config;

/// Supplies the bearer token attached to API requests.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        StaticCredentials { token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_token.clone())
    }
}

impl CredentialProvider for StaticCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_anonymous() {
        assert_eq!(StaticCredentials::new(Some("  ".to_string())).bearer_token(), None);
        assert_eq!(
            StaticCredentials::new(Some("abc".to_string())).bearer_token(),
            Some("abc".to_string())
        );
    }
}
