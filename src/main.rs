// Entrypoint for the `msrd` binary.
// - Parses arguments, resolves the client configuration, dispatches.
// - All fatal conditions are plain `Result` errors that bubble up here;
//   this is the single place that prints them and exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fs;

use msrd_cli::api::ApiClient;
use msrd_cli::cli::{Cli, Command, SubmitArgs};
use msrd_cli::config::ClientConfig;
use msrd_cli::job;
use msrd_cli::output::print_response;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::resolve(cli.url, cli.account, cli.token)?;
    let api = ApiClient::new(config)?;

    match cli.command {
        Command::AccountInfo => print_response(&api.account_info()?),
        Command::OsImages => print_response(&api.os_images()?),
        Command::JobTiers => print_response(&api.job_tiers()?),
        Command::Jobs => print_response(&api.jobs()?),
        Command::UploadFile(args) => {
            job::ensure_within_size_limit(&args.file)?;
            let pb = spinner(format!("Uploading {}...", args.file.display()));
            let body = api.upload_file(&args.file);
            pb.finish_and_clear();
            print_response(&body?);
        }
        Command::Submit(args) => handle_submit(&api, args)?,
    }
    Ok(())
}

/// The submit flow: load the template, upload and merge the attached
/// files, optionally persist the finished document, then POST it.
fn handle_submit(api: &ApiClient, args: SubmitArgs) -> Result<()> {
    let text = fs::read_to_string(&args.job)
        .with_context(|| format!("Failed to read job template {}", args.job.display()))?;
    let template: Value = serde_json::from_str(&text)
        .with_context(|| format!("Job template {} is not valid JSON", args.job.display()))?;

    let finished = job::assemble(template, &args.files, api)?;

    if let Some(out) = &args.out_job_file {
        let pretty = serde_json::to_string_pretty(&finished)
            .context("Failed to serialize finished job document")?;
        fs::write(out, pretty)
            .with_context(|| format!("Failed to write finished job to {}", out.display()))?;
    }

    let pb = spinner("Submitting job...".to_string());
    let body = api.submit_job(&finished);
    pb.finish_and_clear();
    print_response(&body?);
    Ok(())
}

fn spinner(msg: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.set_message(msg);
    pb
}
