/// CLI argument definitions via clap derive.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// msrd: submit and inspect fuzzing jobs on the MSRD service.
#[derive(Debug, Parser)]
#[command(
    name = "msrd",
    about = "Command-line client for the Microsoft Security Risk Detection REST API",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Base URL of the service. Falls back to $MSRD_URL, then the
    /// public endpoint.
    #[arg(short = 'u', long = "url", global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Account identifier. Falls back to $MSRD_ACCOUNT, then prompts.
    #[arg(short = 'a', long = "account", global = true, value_name = "ACCOUNT_ID")]
    pub account: Option<String>,

    /// API token. Falls back to $MSRD_TOKEN, then prompts (hidden).
    #[arg(short = 't', long = "token", global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get and print account information.
    AccountInfo,
    /// Get and print the OS images available to the account.
    OsImages,
    /// Get and print the job tiers available to the account.
    JobTiers,
    /// Get and print the account's jobs.
    Jobs,
    /// Upload a single file and print the generated reference URL.
    UploadFile(UploadFileArgs),
    /// Submit a new fuzzing job, uploading any attached files first.
    Submit(SubmitArgs),
}

/// Arguments for `msrd upload-file`.
#[derive(Debug, Parser)]
pub struct UploadFileArgs {
    /// Local file to upload (at most 4 MiB).
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: PathBuf,
}

/// Arguments for `msrd submit`.
#[derive(Debug, Parser)]
pub struct SubmitArgs {
    /// Path to the job template JSON.
    #[arg(short = 'j', long = "job", value_name = "PATH")]
    pub job: PathBuf,

    /// Write the finished job document here before submitting it.
    #[arg(short = 'o', long = "out-job-file", value_name = "PATH")]
    pub out_job_file: Option<PathBuf>,

    /// Local files to upload and attach to the job, in order.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn submit_collects_trailing_files_in_order() {
        let cli = Cli::try_parse_from([
            "msrd", "-a", "acct", "-t", "tok", "submit", "-j", "job.json", "seed1.bin",
            "seed2.bin",
        ])
        .unwrap();

        match cli.command {
            Command::Submit(args) => {
                assert_eq!(args.job, PathBuf::from("job.json"));
                assert_eq!(args.out_job_file, None);
                assert_eq!(
                    args.files,
                    vec![PathBuf::from("seed1.bin"), PathBuf::from("seed2.bin")]
                );
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }
}
