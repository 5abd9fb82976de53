use regex::Regex;
use std::fmt;

/// Redacts credentials from text that came back from remote services
/// before it is logged or stored in an execution outcome.
#[derive(Clone)]
pub struct SecretScrubber {
    github_token_pattern: Regex,
    huggingface_token_pattern: Regex,
    jwt_pattern: Regex,
    bearer_pattern: Regex,
    field_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // ghp_, gho_, ghs_, ghu_, ghr_ and fine-grained github_pat_ tokens
            github_token_pattern: Regex::new(r"(?:gh[pousr]_|github_pat_)[A-Za-z0-9_]{16,}")
                .expect("github token pattern is valid"),
            huggingface_token_pattern: Regex::new(r"hf_[A-Za-z0-9]{16,}")
                .expect("huggingface token pattern is valid"),
            // Supabase keys are JWTs
            jwt_pattern: Regex::new(r"eyJ[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]*")
                .expect("jwt pattern is valid"),
            bearer_pattern: Regex::new(r"Bearer\s+[A-Za-z0-9\-_\.]+")
                .expect("bearer pattern is valid"),
            field_pattern: Regex::new(
                r#"["']?(apikey|api_key|token|secret|key)["']?\s*([:=])\s*["']?[A-Za-z0-9\-_\.]{12,}["']?"#,
            )
            .expect("field pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .bearer_pattern
            .replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self
            .field_pattern
            .replace_all(&scrubbed, "${1}${2}[REDACTED]");
        let scrubbed = self
            .github_token_pattern
            .replace_all(&scrubbed, "[GITHUB_TOKEN_REDACTED]");
        let scrubbed = self
            .huggingface_token_pattern
            .replace_all(&scrubbed, "[HF_TOKEN_REDACTED]");
        self.jwt_pattern
            .replace_all(&scrubbed, "[JWT_REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
