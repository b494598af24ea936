//! Cache keys and request fingerprinting.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::AiRequest;
use crate::Result;

/// Version tag appended to response-cache keys. Bump it whenever canonicalization or
/// hashing changes so old keys can never be read back as new ones.
pub const FINGERPRINT_VERSION: &str = "v1";

/// Instruction used when a request carries neither messages nor a prompt.
pub const DEFAULT_INSTRUCTION: &str =
    "Say hello and briefly describe what you can help with.";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub hash: String,
}

impl CacheKey {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Hex-encoded SHA-256 digest of a canonical request, plus the scheme version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    digest: String,
    version: String,
}

impl Fingerprint {
    pub fn of_canonical(canonical: &str, version: impl Into<String>) -> Self {
        let digest = hex::encode(Sha256::digest(canonical.as_bytes()));
        Self {
            digest,
            version: version.into(),
        }
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Store key: `ai:<digest>:<version>`.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(format!("ai:{}:{}", self.digest, self.version))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.digest, self.version)
    }
}

/// Turns an [`AiRequest`] into one deterministic string and a [`Fingerprint`].
///
/// - messages present and non-empty: `"<role>: <content>"` per message, joined by `\n`
/// - otherwise the prompt, verbatim
/// - otherwise the default instruction
#[derive(Debug, Clone)]
pub struct RequestFingerprinter {
    default_instruction: String,
    version: String,
}

impl RequestFingerprinter {
    pub fn new() -> Self {
        Self {
            default_instruction: DEFAULT_INSTRUCTION.to_string(),
            version: FINGERPRINT_VERSION.to_string(),
        }
    }

    pub fn with_default_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.default_instruction = instruction.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn canonicalize(&self, request: &AiRequest) -> Result<String> {
        if let Some(messages) = request.messages.as_deref().filter(|m| !m.is_empty()) {
            let lines: Vec<String> = messages
                .iter()
                .map(|m| format!("{}: {}", m.role.as_str(), m.content))
                .collect();
            return Ok(lines.join("\n"));
        }
        if let Some(prompt) = &request.prompt {
            return Ok(prompt.clone());
        }
        Ok(self.default_instruction.clone())
    }

    pub fn fingerprint_canonical(&self, canonical: &str) -> Fingerprint {
        Fingerprint::of_canonical(canonical, self.version.clone())
    }

    pub fn fingerprint(&self, request: &AiRequest) -> Result<Fingerprint> {
        let canonical = self.canonicalize(request)?;
        Ok(self.fingerprint_canonical(&canonical))
    }
}

impl Default for RequestFingerprinter {
    fn default() -> Self {
        Self::new()
    }
}
