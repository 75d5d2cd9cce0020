use anyhow::{anyhow, Context};
use clap::Parser;
use dialoguer::Confirm;
use herb_scan::{analyzer, cli, config, scanner, session};
use herb_scan_common::{render_text, response_schema, share_text, Phase};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "herb_scan=debug,herb_scan_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Analyze { image, format, output, no_prompt } => {
            let interactive = !no_prompt && std::io::stdin().is_terminal();
            let policy = config.intake_policy();

            let settings = config.analysis_settings();
            // キー未設定は設定エラー。再試行しても直らないので即終了
            settings.require_api_key().map_err(|e| anyhow!(e.user_message()))?;

            let client = analyzer::GeminiClient::new(settings).map_err(|e| anyhow!(e.user_message()))?;
            let mut session = session::ScanSession::new(client, std::io::stderr().is_terminal());

            loop {
                // 取り込み検査で落ちたらリクエストは出さない
                let (info, encoded) = scanner::load_image(&image, &policy)
                    .map_err(|e| anyhow!(e.user_message()))?;
                eprintln!("🌿 {} ({}, {} bytes)", info.file_name, info.mime_type, info.size_bytes);

                match session.submit(encoded).await {
                    Phase::Result => break,
                    Phase::Error => {
                        let message = session.state().error().unwrap_or_default().to_string();
                        eprintln!("✖ {}", message);

                        let retry = interactive
                            && Confirm::new()
                                .with_prompt("Try again?")
                                .default(true)
                                .interact()?;
                        if retry {
                            session.retry();
                            continue;
                        }
                        return Err(anyhow!(message));
                    }
                    Phase::Idle => {
                        let notice = session.state().notice().unwrap_or_default().to_string();
                        return Err(anyhow!(notice));
                    }
                    other => return Err(anyhow!("unexpected state: {}", other.as_str())),
                }
            }

            let result = session
                .state()
                .result()
                .cloned()
                .ok_or_else(|| anyhow!("解析結果がありません"))?;

            let rendered = match format {
                OutputFormat::Text => render_text(&result),
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Share => share_text(&result),
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("書き込み失敗: {}", path.display()))?;
                    eprintln!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", rendered),
            }

            session.reset();
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIエンドポイント: {}", config.api_base_url);
                println!("  temperature: {}", config.temperature);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  最大ファイルサイズ: {}MB", config.max_file_size_mb);
                println!("  対応形式: {}", config.intake_policy().accepted_formats_label());
                println!("  APIキー: {}", if config.api_key().is_some() { "設定済み" } else { "未設定" });
            }
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&response_schema())?);
        }
    }

    Ok(())
}
