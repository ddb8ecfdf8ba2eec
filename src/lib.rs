// Library root
// -----------
// This crate exposes a small library surface for the `msrd` binary.
//
// Module responsibilities:
// - `cli`: clap argument definitions (global options + subcommands).
// - `config`: resolves the base URL, account id and API token from
//   flags, environment variables, or an interactive prompt.
// - `api`: encapsulates HTTP interactions with the MSRD REST API
//   (account queries, file upload, job submission).
// - `job`: the job-assembly pipeline: uploads local files and merges
//   the returned references into a job document before submission.
// - `output`: response pretty-printing with a raw-text fallback.
//
// Keeping this separation makes the assembly pipeline testable with an
// uploader double instead of a live HTTP session.
pub mod api;
pub mod cli;
pub mod config;
pub mod job;
pub mod output;
