use crate::bedrock::BedrockCli;
use crate::config::RequestConfig;
use crate::error::Result;
use crate::prompt;
use crate::registry::ModelRegistry;
use crate::request::RequestPayload;
use crate::response::{self, Extracted};
use tracing::{info, warn};

/// Run one invocation end to end: resolve the model, render its prompt
/// template, build the payload, invoke, extract. An unknown model name fails
/// here, before any invocation work happens.
pub async fn run_once(
    registry: &ModelRegistry,
    invoker: &BedrockCli,
    request: &RequestConfig,
    model_name: &str,
    user_prompt: &str,
) -> Result<Extracted> {
    let entry = registry.resolve(model_name)?;

    let rendered = prompt::render(&entry.prompt_format, user_prompt);
    if !rendered.placeholder_found() {
        warn!(
            model = %model_name,
            placeholder = prompt::USER_PROMPT_PLACEHOLDER,
            "template has no placeholder; sending it verbatim, user prompt dropped"
        );
    }
    info!(model = %model_name, prompt = %user_prompt, "prompt prepared");

    let payload = RequestPayload::new(rendered.into_text(), request);
    let raw = invoker.invoke_model(&entry.model_id, &payload).await?;
    response::extract_text(raw)
}
