use std::path::PathBuf;
use tracing::debug;

/// Immutable view of the AWS-relevant process environment, taken once at
/// startup. The AWS CLI child reads its credentials from the merged process
/// environment directly; the snapshot exists for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    /// The `.env` file that was merged, when one was found.
    pub dotenv_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl EnvSnapshot {
    /// Merge an optional local `.env` file into the process environment
    /// (absence is not an error), then snapshot.
    pub fn load() -> Self {
        let dotenv_path = dotenvy::dotenv().ok();
        match &dotenv_path {
            Some(path) => debug!(path = %path.display(), "merged .env into environment"),
            None => debug!("no .env file found"),
        }
        Self {
            dotenv_path,
            ..Self::from_env()
        }
    }

    /// Snapshot the current environment without merging any file.
    pub fn from_env() -> Self {
        Self {
            dotenv_path: None,
            profile: std::env::var("AWS_PROFILE").ok(),
            region: std::env::var("AWS_REGION")
                .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
                .ok(),
        }
    }
}
