use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("invalid color `{0}` (expected #RRGGBB or #AARRGGBB)")]
    InvalidColor(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("font error: {0}")]
    Font(String),
}
