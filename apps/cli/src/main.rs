mod commands;
mod terminal_view;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use easyfin_core::constants::DEFAULT_API_URL;
use easyfin_core::controller::ViewController;
use easyfin_core::gateway::ApiClient;
use easyfin_core::session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use commands::{Command, HELP};
use terminal_view::{read_line, show_prompt, InputLines, TerminalView};

#[derive(Parser)]
#[command(name = "easyfin")]
#[command(about = "Terminal client for the EasyFin trading simulator")]
struct Cli {
    /// API root, usually the proxy's /api prefix
    #[arg(long, env = "EF_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File holding the persisted session token
    #[arg(long, env = "EF_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Keep the token in memory only
    #[arg(long)]
    no_persist: bool,
}

fn default_token_file() -> PathBuf {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".easyfin").join("session.json")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let store: Arc<dyn TokenStore> = if cli.no_persist {
        Arc::new(MemoryTokenStore::new())
    } else {
        let path = cli.token_file.unwrap_or_else(default_token_file);
        tracing::debug!("Token file: {}", path.display());
        Arc::new(FileTokenStore::new(path))
    };
    let session = Arc::new(Session::new(store));
    let gateway = Arc::new(
        ApiClient::new(&cli.api_url, session.clone()).context("Failed to create API client")?,
    );

    let input: InputLines = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let view = Arc::new(TerminalView::new(input.clone()));
    let controller = ViewController::new(gateway, view, session);

    println!("EasyFin - type 'help' for commands");
    controller.start().await;

    loop {
        show_prompt();
        let Some(line) = read_line(&input).await? else {
            break;
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        match command {
            Command::Login { email, password } => controller.login(&email, &password).await,
            Command::Register {
                name,
                email,
                password,
            } => controller.register(&name, &email, &password).await,
            Command::Logout => controller.logout(),
            Command::Show(section) => controller.navigate(section).await,
            Command::Buy { ticker, quantity } => controller.submit_buy(&ticker, quantity).await,
            Command::Sell { ticker, quantity } => controller.submit_sell(&ticker, quantity).await,
            Command::Preview {
                side,
                ticker,
                quantity,
            } => {
                controller.preview(side, &ticker, quantity);
            }
            Command::Prices => controller.refresh_prices().await,
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Empty => {}
        }
    }

    Ok(())
}
