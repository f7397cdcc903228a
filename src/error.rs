#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("base64 decode error: {0}")]
    DecodeError(#[from] base64::DecodeError),
    #[error("hmac key error: {0}")]
    HmacError(#[from] hmac::digest::InvalidLength),
    #[error("env error: {0}")]
    EnvError(#[from] dotenvy::Error),
    #[error("invalid expiration: {0} seconds")]
    InvalidExpiration(crate::request::Seconds),
    #[error("field {0} is managed by the policy builder")]
    ReservedField(String),
    #[error("missing form field: {0}")]
    MissingField(&'static str),
    #[error("{0}")]
    Err(String),
}
