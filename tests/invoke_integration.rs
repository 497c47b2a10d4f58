#![cfg(unix)]

use bedrock_invoke::bedrock::BedrockCli;
use bedrock_invoke::config::RequestConfig;
use bedrock_invoke::env::EnvSnapshot;
use bedrock_invoke::error::Error;
use bedrock_invoke::request::RequestPayload;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Stub inference CLI: records its argv, captures the request body it was
/// pointed at, and writes a well-formed response to the output path (the
/// last argument).
const HAPPY_STUB: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
printf '%s\n' "$@" > "$dir/args.txt"
body=""
prev=""
last=""
for a in "$@"; do
  if [ "$prev" = "--body" ]; then body="$a"; fi
  prev="$a"
  last="$a"
done
cp "${body#fileb://}" "$dir/request-capture.json"
printf '%s' '{"choices":[{"text":"stub reply"}]}' > "$last"
"#;

const BAD_JSON_STUB: &str = r#"#!/bin/sh
last=""
for a in "$@"; do last="$a"; done
printf '%s' 'not json' > "$last"
"#;

fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn stub_invoker(stub: &Path, work_dir: &Path) -> BedrockCli {
    BedrockCli::new(
        stub.to_string_lossy().into_owned(),
        Some(work_dir.to_path_buf()),
        EnvSnapshot::default(),
    )
}

fn payload(text: &str) -> RequestPayload {
    RequestPayload::new(text.into(), &RequestConfig::default())
}

fn scratch_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[tokio::test]
async fn happy_path_returns_raw_body_and_cleans_up() {
    let stub_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();
    let stub = write_stub(stub_dir.path(), "aws-stub.sh", HAPPY_STUB);

    let invoker = stub_invoker(&stub, work_dir.path());
    let raw = invoker
        .invoke_model("us.deepseek.r1-v1:0", &payload("hello"))
        .await
        .unwrap();

    assert_eq!(raw["choices"][0]["text"], "stub reply");
    assert!(
        scratch_is_empty(work_dir.path()),
        "request/response artifacts should be gone after a successful run"
    );
}

#[tokio::test]
async fn cli_contract_passes_namespace_model_id_and_body_file() {
    let stub_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();
    let stub = write_stub(stub_dir.path(), "aws-stub.sh", HAPPY_STUB);

    let invoker = stub_invoker(&stub, work_dir.path());
    invoker
        .invoke_model("us.llama3.r1-v1:0", &payload("check the wire"))
        .await
        .unwrap();

    let args = std::fs::read_to_string(stub_dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(
        args[..5].to_vec(),
        vec![
            "bedrock-runtime",
            "invoke-model",
            "--model-id",
            "us.llama3.r1-v1:0",
            "--body"
        ]
    );
    assert!(args[5].starts_with("fileb://"), "body arg: {}", args[5]);
    assert!(args[6].ends_with("response.json"), "output arg: {}", args[6]);

    let captured =
        std::fs::read_to_string(stub_dir.path().join("request-capture.json")).unwrap();
    let captured: serde_json::Value = serde_json::from_str(&captured).unwrap();
    assert_eq!(captured["prompt"], "check the wire");
    assert_eq!(captured["max_tokens"], 1024);
    assert_eq!(captured["temperature"], 0.7);
    assert_eq!(captured["top_p"], 0.9);
}

#[tokio::test]
async fn nonzero_exit_carries_stderr_verbatim_and_cleans_up() {
    let stub_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();
    let stub = write_stub(
        stub_dir.path(),
        "denied.sh",
        "#!/bin/sh\necho \"AccessDenied\" >&2\nexit 1\n",
    );

    let invoker = stub_invoker(&stub, work_dir.path());
    let err = invoker
        .invoke_model("us.deepseek.r1-v1:0", &payload("hello"))
        .await
        .unwrap_err();

    match &err {
        Error::Invocation { status, diagnostic } => {
            assert_eq!(*status, Some(1));
            assert!(diagnostic.contains("AccessDenied"), "diagnostic: {diagnostic}");
        }
        other => panic!("expected invocation error, got {other:?}"),
    }
    assert!(err.to_string().contains("AccessDenied"));
    assert!(
        scratch_is_empty(work_dir.path()),
        "artifacts should be gone after an invocation failure"
    );
}

#[tokio::test]
async fn missing_response_file_is_unexpected_and_cleans_up() {
    let stub_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();
    let stub = write_stub(stub_dir.path(), "silent.sh", "#!/bin/sh\nexit 0\n");

    let invoker = stub_invoker(&stub, work_dir.path());
    let err = invoker
        .invoke_model("us.deepseek.r1-v1:0", &payload("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unexpected(_)), "got {err:?}");
    assert!(scratch_is_empty(work_dir.path()));
}

#[tokio::test]
async fn unparseable_response_is_unexpected_and_cleans_up() {
    let stub_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();
    let stub = write_stub(stub_dir.path(), "garbage.sh", BAD_JSON_STUB);

    let invoker = stub_invoker(&stub, work_dir.path());
    let err = invoker
        .invoke_model("us.deepseek.r1-v1:0", &payload("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unexpected(_)), "got {err:?}");
    assert!(scratch_is_empty(work_dir.path()));
}

#[tokio::test]
async fn unlaunchable_program_is_unexpected_and_cleans_up() {
    let work_dir = tempfile::tempdir().unwrap();
    let invoker = BedrockCli::new(
        "/nonexistent/bedrock-tool",
        Some(work_dir.path().to_path_buf()),
        EnvSnapshot::default(),
    );
    let err = invoker
        .invoke_model("us.deepseek.r1-v1:0", &payload("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unexpected(_)), "got {err:?}");
    assert!(scratch_is_empty(work_dir.path()));
}
