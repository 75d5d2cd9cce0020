use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "herb-scan")]
#[command(about = "薬用植物・雑穀・豆類の写真AI同定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を解析してプロファイルを表示
    Analyze {
        /// 画像ファイル（JPEG/PNG/WebP）
        #[arg(required = true)]
        image: PathBuf,

        /// 出力形式 (text/json/share)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 失敗時に再試行を尋ねない
        #[arg(long)]
        no_prompt: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// モデルに渡すレスポンススキーマを表示
    Schema,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Share,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "share" => Ok(OutputFormat::Share),
            _ => Err(format!("Unknown format: {}. Use text, json, or share", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Share => write!(f, "share"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("share".parse::<OutputFormat>().unwrap(), OutputFormat::Share);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["herb-scan", "analyze", "leaf.jpg", "-f", "json", "--no-prompt"]).unwrap();
        match cli.command {
            Commands::Analyze { image, format, output, no_prompt } => {
                assert_eq!(image, PathBuf::from("leaf.jpg"));
                assert_eq!(format, OutputFormat::Json);
                assert!(output.is_none());
                assert!(no_prompt);
            }
            _ => panic!("expected analyze"),
        }
    }
}
