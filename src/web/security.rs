use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Simple in-memory rate limiter for the auth routes.
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<SystemTime>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true if the request is allowed, false once `max_requests`
    /// were seen for `key` inside the window.
    pub fn check_rate_limit(&self, key: &str, max_requests: usize, window: Duration) -> bool {
        let now = SystemTime::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();

        entry.retain(|&time| {
            now.duration_since(time).unwrap_or(Duration::from_secs(0)) < window
        });

        if entry.len() >= max_requests {
            return false;
        }

        entry.push(now);

        requests.retain(|_, times| !times.is_empty());

        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Password validation for operator registration.
pub struct PasswordValidator;

impl PasswordValidator {
    const MIN_LENGTH: usize = 12;

    pub fn validate(password: &str) -> Result<(), String> {
        if password.len() < Self::MIN_LENGTH {
            return Err(format!(
                "Password must be at least {} characters",
                Self::MIN_LENGTH
            ));
        }

        let has_uppercase = password.chars().any(|c| c.is_uppercase());
        let has_lowercase = password.chars().any(|c| c.is_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password.chars().any(|c| !c.is_alphanumeric());

        let requirements_met = [has_uppercase, has_lowercase, has_digit, has_special]
            .into_iter()
            .filter(|met| *met)
            .count();

        if requirements_met < 3 {
            return Err(
                "Password must contain at least 3 of: uppercase, lowercase, digit, special character"
                    .to_string(),
            );
        }

        Ok(())
    }
}

pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || local.len() > 64 || domain.is_empty() {
        return false;
    }

    // Domain must have at least one dot
    domain.contains('.')
}

/// Blog and product slugs: lowercase alphanumeric, hyphens, underscores.
pub fn validate_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > 255 {
        return false;
    }

    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limiter_blocks_after_max() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        assert!(limiter.check_rate_limit("login:1.2.3.4", 2, window));
        assert!(limiter.check_rate_limit("login:1.2.3.4", 2, window));
        assert!(!limiter.check_rate_limit("login:1.2.3.4", 2, window));
        // Other keys are unaffected.
        assert!(limiter.check_rate_limit("login:5.6.7.8", 2, window));
    }

    #[test]
    fn slug_rules() {
        assert!(validate_slug("spring-launch-2026"));
        assert!(validate_slug("a_b"));
        assert!(!validate_slug(""));
        assert!(!validate_slug("Mixed-Case"));
        assert!(!validate_slug("spaced out"));
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("ops@example.com"));
        assert!(!validate_email("nodomain@"));
        assert!(!validate_email("no-at.example.com"));
        assert!(!validate_email("two@@example.com"));
        assert!(!validate_email("dot@less"));
    }

    #[test]
    fn password_rules() {
        assert!(PasswordValidator::validate("Str0ng-enough-pw").is_ok());
        assert!(PasswordValidator::validate("short").is_err());
        assert!(PasswordValidator::validate("alllowercaseonly").is_err());
    }
}
