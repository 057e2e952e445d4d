//! Headless API server entrypoint.

use codepaste_server::{config::env_flag_enabled, serve_router, AppState, Config, DEFAULT_PORT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => flags.help = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "codepaste=info,codepaste_core=info,codepaste_server=info,tower_http=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");
    let state = AppState::new(config.clone());

    let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("Public access enabled - server will accept requests from any origin");
    }

    let bind_addr = codepaste_server::resolve_bind_address(&config, allow_public);
    if !bind_addr.ip().is_loopback() {
        tracing::warn!(
            "Binding to non-localhost address: {} - ensure proper security measures are in place",
            bind_addr
        );
    }

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("CodePaste running at http://{}", actual_addr);

    serve_router(listener, state, allow_public, shutdown_signal()).await?;
    tracing::info!("CodePaste stopped; in-memory pastes discarded");

    Ok(())
}

fn print_help() {
    println!("CodePaste Server\n");
    println!("Usage: codepaste [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!(
        "  PORT                   Server port (default: {})",
        DEFAULT_PORT
    );
    println!("  CODE_MAX_ATTEMPTS      Code generation attempts per paste (default: 10)");
    println!("  NAME_MIN_LEN           Minimum user name length (default: 1)");
    println!("  NAME_MAX_LEN           Maximum user name length (default: unbounded)");
    println!("  NAME_ALLOW_WHITESPACE  Allow whitespace in user names (default: true)");
    println!("  ALLOW_PUBLIC_ACCESS    Allow CORS from any origin and non-loopback binds");
    println!(
        "  BIND                   Override bind address (e.g. 0.0.0.0:{})",
        DEFAULT_PORT
    );
    println!("  RUST_LOG               Log filter (default: codepaste=info)");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::{parse_cli_flags, CliFlags};

    #[test]
    fn parse_cli_flags_rejects_unknown_and_positional_arguments() {
        let cases = [
            (
                vec!["codepaste".to_string(), "--prot".to_string()],
                "Unknown option",
            ),
            (
                vec!["codepaste".to_string(), "serve".to_string()],
                "Unexpected positional argument",
            ),
        ];

        for (args, expected_fragment) in cases {
            let err = parse_cli_flags(&args).expect_err("invalid args should be rejected");
            assert!(err.to_string().contains(expected_fragment));
        }
    }

    #[test]
    fn parse_cli_flags_accepts_help() {
        for flag in ["--help", "-h"] {
            let args = vec!["codepaste".to_string(), flag.to_string()];
            let flags = parse_cli_flags(&args).expect("help should parse");
            assert_eq!(flags, CliFlags { help: true });
        }
        let bare = parse_cli_flags(&["codepaste".to_string()]).expect("no args");
        assert_eq!(bare, CliFlags::default());
    }
}
