//! Error types for PrimeVitality.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the generative-language transport layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Gemini API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the plan request gateway. Terminal for the attempt — the
/// controller discards the in-progress profile and returns to onboarding.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Model returned no content")]
    NoContent,

    #[error("Plan response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Plan violates the response contract: {0}")]
    SchemaViolation(String),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Profile validation errors. Value-level rejections, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Age {0} is outside the supported range (50-110)")]
    AgeOutOfRange(u32),

    #[error("Location must not be empty")]
    EmptyLocation,

    #[error("{0} must be a positive number of pounds")]
    NonPositiveWeight(&'static str),

    #[error("Step {0} is incomplete")]
    StepIncomplete(u8),

    #[error("Already at the first step")]
    AtFirstStep,
}

/// Application controller errors.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Cannot {action} while in state {state}")]
    WrongState { state: String, action: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
