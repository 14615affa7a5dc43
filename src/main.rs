use anyhow::{Context, Result};
use clap::Parser;
use scribe_tui::ai::AiClient;
use scribe_tui::app;
use scribe_tui::config::{self, Config};
use scribe_tui::files;
use scribe_tui::logging;
use scribe_tui::pipeline::Personality;
use scribe_tui::session::Session;
use scribe_tui::ui::App;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "scribe",
    about = "A terminal file explorer with an AI prompt side panel",
    version
)]
struct Args {
    /// Add files to the tree (name and type only, contents are never read)
    #[arg(long = "add", value_name = "PATH", num_args = 1..)]
    add: Vec<PathBuf>,

    /// Starting personality: codeReviewer, architect, debugger, documentationWriter
    #[arg(long, value_name = "KEY", value_parser = parse_personality)]
    personality: Option<Personality>,

    /// Log file (defaults to scribe.log next to the config)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start with an empty tree instead of the demo files
    #[arg(long)]
    no_demo: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Write the resolved configuration to the config file and exit
    #[arg(long)]
    init_config: bool,
}

fn parse_personality(key: &str) -> Result<Personality, String> {
    Personality::from_key(key).ok_or_else(|| {
        let keys: Vec<_> = Personality::all().iter().map(|p| p.key()).collect();
        format!("unknown personality '{}' (expected one of: {})", key, keys.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();

    if args.print_config {
        println!("# {}", Config::config_location());
        println!(
            "{}",
            serde_json::to_string_pretty(&config).context("serializing config")?
        );
        return Ok(());
    }

    if args.init_config {
        config.save().map_err(anyhow::Error::msg)?;
        println!("  Wrote {}", Config::config_location());
        return Ok(());
    }

    let log_path = args.log_file.clone().unwrap_or_else(Config::default_log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("  Logging disabled: {:#}", e);
    }
    info!(config = %Config::config_location(), "starting scribe");

    let session = build_session(&args, &config);
    let client = AiClient::new(&config).context("building HTTP client")?;

    app::run_tui(App::new(session, config), client).await
}

fn build_session(args: &Args, config: &Config) -> Session {
    let tree = if args.no_demo {
        Vec::new()
    } else {
        files::demo_tree()
    };
    let personality = args.personality.unwrap_or(config.default_personality);
    let mut session = Session::new(tree, personality);

    let added: Vec<_> = args
        .add
        .iter()
        .filter_map(|path| {
            let node = files::node_from_path(path);
            if node.is_none() {
                warn!(path = %path.display(), "skipping path without a file name");
            }
            node
        })
        .collect();
    session.files.extend(added);

    session.api_key = config::api_key_from_env();
    if session.api_key.is_some() {
        info!(env = config::API_KEY_ENV, "API key loaded from environment");
    }
    session
}
