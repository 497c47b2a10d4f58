//! Invocation adapter around `aws bedrock-runtime invoke-model`.
//!
//! The request body is handed to the external CLI as a file and the response
//! comes back as a file; both live in a per-run scratch directory that is
//! deleted on every exit path. Transport, credentials and retries belong to
//! the external tool.

use crate::config::InvokeConfig;
use crate::env::EnvSnapshot;
use crate::error::{Error, Result};
use crate::request::RequestPayload;
use serde_json::Value;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub struct BedrockCli {
    program: String,
    work_dir: Option<PathBuf>,
    env: EnvSnapshot,
}

impl BedrockCli {
    pub fn new(program: impl Into<String>, work_dir: Option<PathBuf>, env: EnvSnapshot) -> Self {
        Self {
            program: program.into(),
            work_dir,
            env,
        }
    }

    pub fn from_config(config: &InvokeConfig, env: EnvSnapshot) -> Self {
        Self::new(config.program.clone(), config.work_dir.clone(), env)
    }

    /// One blocking invocation: serialize the payload to `request.json`, run
    /// the CLI, read `response.json` back as raw JSON. No timeout — the tool
    /// runs to completion. The scratch dir and both files inside it are
    /// removed when the `TempDir` drops, on success and on every failure path.
    pub async fn invoke_model(&self, model_id: &str, payload: &RequestPayload) -> Result<Value> {
        let scratch = self.scratch_dir()?;
        let request_path = scratch.path().join("request.json");
        let response_path = scratch.path().join("response.json");

        let body = serde_json::to_vec(payload)
            .map_err(|e| Error::unexpected(format!("serialize request payload: {e}")))?;
        std::fs::write(&request_path, body)?;

        info!(
            model_id = %model_id,
            program = %self.program,
            region = ?self.env.region,
            profile = ?self.env.profile,
            "invoking model via inference CLI"
        );

        let body_arg = format!("fileb://{}", request_path.display());
        let output = Command::new(&self.program)
            .args([
                "bedrock-runtime",
                "invoke-model",
                "--model-id",
                model_id,
                "--body",
                body_arg.as_str(),
            ])
            .arg(&response_path)
            .output()
            .await
            .map_err(|e| Error::unexpected(format!("launch {}: {e}", self.program)))?;

        debug!(status = ?output.status.code(), "inference CLI exited");

        if !output.status.success() {
            warn!(status = ?output.status.code(), "inference CLI reported failure");
            return Err(Error::invocation(
                output.status.code(),
                diagnostic_from(&output),
            ));
        }

        if !response_path.exists() {
            return Err(Error::unexpected(
                "inference CLI exited successfully but produced no response file",
            ));
        }
        let raw = std::fs::read_to_string(&response_path)
            .map_err(|e| Error::unexpected(format!("read response file: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::unexpected(format!("parse response JSON: {e}")))
    }

    fn scratch_dir(&self) -> Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("bedrock-invoke-");
        let scratch = match &self.work_dir {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        Ok(scratch)
    }
}

/// Prefer stderr; some tools put their diagnostics on stdout instead.
fn diagnostic_from(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        stderr.into_owned()
    }
}
