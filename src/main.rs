mod cli;
mod config;
mod error;
mod logging;
mod model;
mod providers;
mod render;

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use cli::Cli;
use config::RunConfig;
use error::AppError;
use model::card::Card;
use providers::github::GitHubTracker;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if err.is_usage() {
                eprintln!();
                eprintln!("{}", Cli::command().render_usage());
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> error::Result<()> {
    let file_config = config::load_config(cli.config.as_deref()).map_err(AppError::Config)?;
    let run_config = RunConfig::resolve(cli, &file_config)?;
    tracing::debug!(
        owner = %run_config.owner,
        repository = %run_config.repository,
        api_url = %run_config.api_url,
        authenticated = run_config.access_token.is_some(),
        "resolved configuration"
    );

    let tracker = GitHubTracker::from_config(&run_config);
    let issues = providers::fetch_issues(&tracker, &run_config.selection)
        .await
        .map_err(AppError::Fetch)?;
    tracing::info!(count = issues.len(), "fetched issues");
    for issue in &issues {
        tracing::debug!(
            number = issue.number,
            state = %issue.state,
            pull_request = issue.is_pull_request,
            "rendering card"
        );
    }

    let cards: Vec<Card> = issues.into_iter().map(Card::from).collect();
    render::write_document(&cards, &mut io::stdout().lock())?;
    Ok(())
}
