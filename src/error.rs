use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "messages[1].role", "PULSEBOARD_FEED_TTL_SECS")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., upstream status, response body excerpt)
    pub details: Option<String>,
    /// Source of the error (e.g., "rest_source", "fingerprinter")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for pulseboard.
///
/// The first three variants are the request-terminal failures of the two flows: the request
/// fails its caller and nothing is cached for that computation. `CacheStore` never reaches a
/// caller of the services; reads fail open and writes are logged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Upstream read failed: {message}{}", format_context(.context))]
    UpstreamRead {
        message: String,
        context: ErrorContext,
    },

    #[error("Inference failed{}: {message}", format_status(.status, .timed_out))]
    Inference {
        status: Option<u16>,
        message: String,
        timed_out: bool,
    },

    #[error("Malformed request: {message}{}", format_context(.context))]
    MalformedRequest {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Cache store error ({backend}): {message}")]
    CacheStore {
        backend: &'static str,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_status(status: &Option<u16>, timed_out: &bool) -> String {
    match (*status, *timed_out) {
        (_, true) => " (timed out)".to_string(),
        (Some(code), false) => format!(" (HTTP {})", code),
        (None, false) => String::new(),
    }
}

/// Coarse error classification with a stable code, for the transport layer in front of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// P1001: data source read failed or returned malformed records
    UpstreamRead,
    /// P1002: inference call returned non-success or an unusable body
    Inference,
    /// P1003: inference call exceeded its wait budget
    InferenceTimeout,
    /// P2001: AI request body could not be canonicalized
    MalformedRequest,
    /// P9001: misconfiguration detected at startup
    Configuration,
    /// P9002: cache store unreachable or payload undecodable
    CacheStore,
    /// P9003: serialization failure inside the core
    Serialization,
}

impl ErrorKind {
    /// Returns the canonical code string (e.g., `"P1001"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpstreamRead => "P1001",
            Self::Inference => "P1002",
            Self::InferenceTimeout => "P1003",
            Self::MalformedRequest => "P2001",
            Self::Configuration => "P9001",
            Self::CacheStore => "P9002",
            Self::Serialization => "P9003",
        }
    }

    /// HTTP status a front-end should answer with when a request fails with this kind.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::UpstreamRead | Self::Inference => 502,
            Self::InferenceTimeout => 504,
            Self::MalformedRequest => 400,
            Self::Configuration | Self::CacheStore | Self::Serialization => 500,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Error {
    /// Create a new upstream read error with structured context
    pub fn upstream_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::UpstreamRead {
            message: msg.into(),
            context,
        }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::upstream_with_context(msg, ErrorContext::new())
    }

    /// Create an inference error carrying the upstream status and diagnostic body
    pub fn inference(status: Option<u16>, msg: impl Into<String>) -> Self {
        Error::Inference {
            status,
            message: msg.into(),
            timed_out: false,
        }
    }

    pub fn inference_timeout(msg: impl Into<String>) -> Self {
        Error::Inference {
            status: None,
            message: msg.into(),
            timed_out: true,
        }
    }

    /// Create a new malformed-request error with structured context
    pub fn malformed_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedRequest {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn cache_store(backend: &'static str, msg: impl Into<String>) -> Self {
        Error::CacheStore {
            backend,
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UpstreamRead { .. } => ErrorKind::UpstreamRead,
            Error::Inference {
                timed_out: true, ..
            } => ErrorKind::InferenceTimeout,
            Error::Inference { .. } => ErrorKind::Inference,
            Error::MalformedRequest { .. } => ErrorKind::MalformedRequest,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::CacheStore { .. } => ErrorKind::CacheStore,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// True for the failures that end a request without a cache write.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Error::UpstreamRead { .. } | Error::Inference { .. } | Error::MalformedRequest { .. }
        )
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::UpstreamRead { context, .. }
            | Error::MalformedRequest { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
