mod commands;

use clap::{Parser, Subcommand};
use nimbus_cloud_softlayer::{SoftLayerConfig, SoftLayerError, SoftLayerNodeDriver, config};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "クラウドのノードを、手元から。", long_about = None)]
struct Cli {
    /// SoftLayer API ユーザー名
    #[arg(long, env = "SOFTLAYER_USERNAME", global = true)]
    username: Option<String>,

    /// SoftLayer API キー
    #[arg(long, env = "SOFTLAYER_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// XML-RPC エンドポイント
    #[arg(
        long,
        env = "SOFTLAYER_API_ENDPOINT",
        global = true,
        default_value = config::DEFAULT_ENDPOINT
    )]
    endpoint: String,

    /// リクエストのタイムアウト（秒）
    #[arg(
        long,
        env = "SOFTLAYER_TIMEOUT_SECS",
        global = true,
        default_value_t = config::DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ノードの一覧を表示（ハードウェア → 仮想ゲストの順）
    Nodes,
    /// 注文可能なサイズの一覧を表示
    Sizes {
        /// ロケーションID（現在は絞り込みに使われません）
        #[arg(short, long)]
        location: Option<String>,
    },
    /// 利用可能なデータセンターの一覧を表示
    Locations,
    /// テンプレートからノードを注文
    /// 作成は非同期のため、数分後に `nimbus nodes` で確認してください
    Create {
        /// 注文テンプレート名
        #[arg(short, long)]
        template: Option<String>,
        /// ゲストのFQDN（例: web1.example.org）。複数指定可
        #[arg(short, long = "guest")]
        guests: Vec<String>,
    },
    /// 注文内容を検証（課金は発生しません）
    Verify {
        /// 注文テンプレート名
        #[arg(short, long)]
        template: Option<String>,
        /// ゲストのFQDN（例: web1.example.org）。複数指定可
        #[arg(short, long = "guest")]
        guests: Vec<String>,
    },
    /// ノードを削除（課金アイテムをキャンセル）
    Destroy {
        /// ノードID
        id: String,
    },
    /// ノードを再起動
    Reboot {
        /// ノードID
        id: String,
        /// 再起動モード (default, hard, soft)
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// バージョン情報を表示
    Version,
}

impl Cli {
    fn driver_config(&self) -> anyhow::Result<SoftLayerConfig> {
        // clap が環境変数も読むので、ここで None なら両方とも未指定
        let username = required(&self.username, "SOFTLAYER_USERNAME")?;
        let api_key = required(&self.api_key, "SOFTLAYER_API_KEY")?;

        Ok(SoftLayerConfig::new(username, api_key)
            .with_endpoint(&self.endpoint)
            .with_timeout(Duration::from_secs(self.timeout)))
    }
}

fn required<'a>(value: &'a Option<String>, var: &str) -> Result<&'a str, SoftLayerError> {
    value
        .as_deref()
        .ok_or_else(|| SoftLayerError::MissingEnvVar(var.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrに出力（RUST_LOG で制御）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Versionコマンドは認証情報不要
    if matches!(cli.command, Commands::Version) {
        println!("nimbus {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let driver = SoftLayerNodeDriver::new(&cli.driver_config()?)?;

    match cli.command {
        Commands::Nodes => commands::nodes::handle(&driver).await,
        Commands::Sizes { location } => {
            commands::catalog::handle_sizes(&driver, location.as_deref()).await
        }
        Commands::Locations => commands::catalog::handle_locations(&driver).await,
        Commands::Create { template, guests } => {
            commands::order::handle_create(&driver, template, &guests).await
        }
        Commands::Verify { template, guests } => {
            commands::order::handle_verify(&driver, template, &guests).await
        }
        Commands::Destroy { id } => commands::lifecycle::handle_destroy(&driver, &id).await,
        Commands::Reboot { id, mode } => {
            commands::lifecycle::handle_reboot(&driver, &id, mode.as_deref()).await
        }
        Commands::Version => Ok(()),
    }
}
