//! Command-line client for the CodePaste API.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use codepaste_core::models::PasteKind;
use codepaste_core::DEFAULT_CLI_SERVER_URL;
use serde_json::Value;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Words per line when printing text pastes.
const WORDS_PER_LINE: usize = 15;

#[derive(Parser)]
#[command(name = "cpaste", about = "CodePaste CLI", version)]
struct Cli {
    /// Server URL (can also be set via CP_SERVER env var)
    #[arg(short, long, env = "CP_SERVER")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Claim a user name
    Register { name: String },
    /// Upload text or a file and print its retrieval code
    Paste {
        /// Name recorded as the paste owner (anonymous when omitted)
        #[arg(short, long)]
        user: Option<String>,
        /// Text to paste; stdin is read when neither --text nor --file is given
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// File whose raw bytes are uploaded
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Fetch a paste by retrieval code
    Get {
        code: String,
        /// Print text as stored instead of re-wrapping it
        #[arg(long)]
        raw: bool,
    },
}

/// What a `paste` invocation uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UploadSource {
    Text(String),
    File(Vec<u8>),
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

async fn ensure_success_or_exit(res: reqwest::Response, action: &str) -> reqwest::Response {
    let status = res.status();
    if status.is_success() {
        return res;
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    let message = error_message_for_response(status, &body);
    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| format!("Invalid server URL '{}': {}", server, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

fn api_url_or_exit(server: &str, action: &str, segments: &[&str]) -> reqwest::Url {
    match api_url(server, segments) {
        Ok(url) => url,
        Err(message) => {
            eprintln!("{} failed: {}", action, message);
            std::process::exit(1);
        }
    }
}

fn normalize_server(server: String) -> String {
    if let Ok(mut url) = reqwest::Url::parse(&server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server;
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server
}

fn resolve_server(server: Option<String>) -> String {
    server
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_CLI_SERVER_URL.to_string())
}

/// Build the `/paste` request body.
///
/// Text is JSON-encoded before upload, so the stored body is a JSON string;
/// file bytes are sent untouched.
fn upload_payload(user: Option<&str>, source: &UploadSource) -> Result<Value, String> {
    let (kind, bytes) = match source {
        UploadSource::Text(text) => (
            PasteKind::Text,
            serde_json::to_vec(text).map_err(|err| format!("text encoding error: {}", err))?,
        ),
        UploadSource::File(bytes) => (PasteKind::File, bytes.clone()),
    };
    Ok(serde_json::json!({
        "user": user.unwrap_or_default(),
        "type": kind.as_str(),
        "uploadBody": BASE64.encode(bytes),
    }))
}

fn wrap_words(text: &str, per_line: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(per_line.max(1))
        .map(|line| line.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a fetched record for stdout.
///
/// File bodies are returned byte-for-byte. Text bodies are unwrapped from
/// their JSON-string encoding when possible and re-flowed unless `raw`.
/// Only text and JSON output gain a trailing newline.
fn format_get_output(record: &Value, json: bool, raw: bool) -> Result<Vec<u8>, String> {
    if json {
        let mut rendered = serde_json::to_vec_pretty(record)
            .map_err(|err| format!("response encoding error: {}", err))?;
        rendered.push(b'\n');
        return Ok(rendered);
    }

    let encoded = record
        .get("uploadBody")
        .and_then(Value::as_str)
        .ok_or_else(|| "response missing 'uploadBody' field".to_string())?;
    let body = BASE64
        .decode(encoded)
        .map_err(|err| format!("response body is not base64: {}", err))?;

    let kind = record
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("text")
        .parse::<PasteKind>()
        .map_err(|err| err.to_string())?;
    if kind == PasteKind::File {
        return Ok(body);
    }

    let text = serde_json::from_slice::<String>(&body)
        .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
    let mut text = if raw {
        text
    } else {
        wrap_words(&text, WORDS_PER_LINE)
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text.into_bytes())
}

fn read_upload_source(text: Option<String>, file: Option<PathBuf>) -> io::Result<UploadSource> {
    if let Some(text) = text {
        return Ok(UploadSource::Text(text));
    }
    if let Some(path) = file {
        return std::fs::read(path).map(UploadSource::File);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(UploadSource::Text(buffer))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        server,
        json,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout))
        .build()?;
    let server = normalize_server(resolve_server(server));

    match command {
        Commands::Completions { .. } => {}
        Commands::Register { name } => {
            let endpoint = api_url_or_exit(&server, "Register", &["register"]);
            let res = client.post(endpoint).json(&name).send().await?;
            ensure_success_or_exit(res, "Register").await;
            if json {
                println!("{}", serde_json::json!({ "registered": name }));
            } else {
                println!("Registered successfully, welcome {}", name);
            }
        }
        Commands::Paste { user, text, file } => {
            let endpoint = api_url_or_exit(&server, "Paste", &["paste"]);
            let source = read_upload_source(text, file)?;
            let body = match upload_payload(user.as_deref(), &source) {
                Ok(body) => body,
                Err(message) => {
                    eprintln!("Paste failed: {}", message);
                    std::process::exit(1);
                }
            };

            let res = client.post(endpoint).json(&body).send().await?;
            let res = ensure_success_or_exit(res, "Paste").await;
            let code: String = res.json().await?;
            if json {
                println!("{}", serde_json::json!({ "code": code }));
            } else {
                println!("Pasted successfully at: {}", code);
            }
        }
        Commands::Get { code, raw } => {
            let endpoint = api_url_or_exit(&server, "Get", &["get"]);
            let res = client.post(endpoint).json(&code).send().await?;
            let res = ensure_success_or_exit(res, "Get").await;
            let record: Value = res.json().await?;

            let output = match format_get_output(&record, json, raw) {
                Ok(output) => output,
                Err(message) => {
                    eprintln!("Get failed: {}", message);
                    std::process::exit(1);
                }
            };
            let mut stdout = io::stdout().lock();
            stdout.write_all(&output)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
