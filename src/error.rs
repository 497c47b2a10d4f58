use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown model \"{name}\" (registered: {known})")]
    UnknownModel { name: String, known: String },

    #[error("inference CLI failure: {diagnostic}")]
    Invocation {
        /// Exit status of the external tool, if it exited at all.
        status: Option<i32>,
        /// The tool's diagnostic output, verbatim.
        diagnostic: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unknown_model(name: impl Into<String>, known: impl Into<String>) -> Self {
        Self::UnknownModel {
            name: name.into(),
            known: known.into(),
        }
    }

    pub fn invocation(status: Option<i32>, diagnostic: impl Into<String>) -> Self {
        Self::Invocation {
            status,
            diagnostic: diagnostic.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Process exit code for `--strict` runs. The default demo mode ignores
    /// this and always exits 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownModel { .. } => 2,
            Self::Invocation { .. } => 3,
            Self::Unexpected(_) | Self::Io(_) => 4,
            Self::Config(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        assert_eq!(Error::unknown_model("gpt9", "claude, deepseek").exit_code(), 2);
        assert_eq!(Error::invocation(Some(1), "AccessDenied").exit_code(), 3);
        assert_eq!(Error::unexpected("boom").exit_code(), 4);
        assert_eq!(Error::config("bad toml").exit_code(), 5);
    }

    #[test]
    fn invocation_display_carries_diagnostic_verbatim() {
        let err = Error::invocation(Some(1), "AccessDenied: not authorized");
        assert!(err.to_string().contains("AccessDenied: not authorized"));
    }
}
