use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use revmetrics::bitbucket::BitbucketClient;
use revmetrics::error::MetricsError;
use revmetrics::metrics::{ReportWindow, collect};
use revmetrics::snapshot::SnapshotStore;
use revmetrics::util::config::AppConfig;
use revmetrics::util::time;

#[derive(Parser, Debug)]
#[command(name = "revmetrics", version, about = "Weekly code-review metrics collector")]
struct Cli {
    /// Activity window start (YYYY-MM-DD); defaults to the most recent Monday
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Log outgoing request URLs
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let token = match config.resolve_token() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Authentication error: {e}");
            std::process::exit(1);
        }
    };

    let window = match cli.date.as_deref() {
        Some(s) => {
            let date: NaiveDate = s.parse().map_err(MetricsError::DateParse)?;
            ReportWindow::for_date(date)
        }
        None => ReportWindow::current(time::today_local()),
    };

    info!(
        activity_start = %window.activity_start,
        pull_request_start = %window.pull_request_start,
        repos = config.bitbucket.repos.len(),
        "revmetrics starting"
    );

    let client = BitbucketClient::new(
        &config.bitbucket.base_url,
        &config.bitbucket.project,
        &token,
    )?;

    let snapshot = collect::run(&client, &config.bitbucket.repos, &window).await?;

    let store = SnapshotStore::new(config.output.dir.clone());
    let path = store.write(time::today_local(), &snapshot)?;

    info!(
        path = %path.display(),
        new_prs = snapshot.num_new_prs,
        merged_prs = snapshot.num_merged_prs,
        members = snapshot.member_info.len(),
        "Snapshot written"
    );

    Ok(())
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        "revmetrics=debug"
    } else {
        "revmetrics=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
