use std::env;

pub const DEFAULT_EMAIL_DOMAIN_PATTERN: &str = r"@wolox\.com\.ar$";
pub const DEFAULT_EMAIL_PATTERN_NAME: &str = "Wolox e-mail";

/// Which e-mail addresses the organisation accepts.
///
/// The pattern is matched against the lowercased address; the name appears in
/// violation messages ("fails to match the <name> pattern").
#[derive(Clone, Debug)]
pub struct ValidationConfig {
    pub email_domain_pattern: String,
    pub email_pattern_name: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            email_domain_pattern: DEFAULT_EMAIL_DOMAIN_PATTERN.to_string(),
            email_pattern_name: DEFAULT_EMAIL_PATTERN_NAME.to_string(),
        }
    }
}

impl ValidationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            email_domain_pattern: env::var("EMAIL_DOMAIN_PATTERN")
                .unwrap_or(defaults.email_domain_pattern),
            email_pattern_name: env::var("EMAIL_PATTERN_NAME")
                .unwrap_or(defaults.email_pattern_name),
        }
    }
}
