// Job-assembly pipeline: uploads each local file listed on the command
// line, captures the reference the Files API returns, and merges the
// resulting file information into the job document's
// `setup.package.fileInformations` array before submission.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Maximum upload size accepted by the Files API, in bytes (4 MiB).
pub const MAX_FILE_SIZE: u64 = 4_194_304;

/// JSON pointer to the array that receives uploaded-file entries.
const FILE_INFO_POINTER: &str = "/setup/package/fileInformations";

/// Errors from the assembly pipeline. All of these are fatal to the
/// current submission; there is no retry.
#[derive(Debug, Error)]
pub enum JobError {
    /// A file on the command line is larger than the Files API accepts.
    #[error("file \"{}\" has byte size {size}, which exceeds the limit of 4mb", path.display())]
    SizeLimitExceeded {
        /// The offending file.
        path: PathBuf,
        /// Its actual size in bytes.
        size: u64,
    },

    /// The file's size could not be read at all.
    #[error("cannot read size of \"{}\": {source}", path.display())]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The job document lacks a `setup.package.fileInformations` array.
    #[error("job file is missing required setup.package.fileInformations data")]
    MalformedTemplate,

    /// The upload itself failed (network error or non-success status).
    #[error("uploading \"{}\" failed: {cause:#}", path.display())]
    Upload {
        path: PathBuf,
        cause: anyhow::Error,
    },
}

/// What the remote job should do with an uploaded file. The service
/// only supports fetching the file onto the fuzzing machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileAction {
    DownloadOnly,
}

/// One entry of `setup.package.fileInformations`: points the remote job
/// at a previously uploaded file. Built once per upload, appended to
/// the job document, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInformation {
    pub action: FileAction,
    pub name: String,
    pub url: String,
}

/// Anything that can push one local file to the Files API and hand back
/// the raw response text. Implemented by `ApiClient`; tests substitute
/// a recording double.
pub trait Uploader {
    fn upload(&self, path: &Path) -> Result<String>;
}

/// Strip exactly one leading and one trailing double quote.
///
/// The file-upload endpoint does not currently return JSON but a
/// double-quoted URL as plain text, unlike every other endpoint. This
/// is a known wart of the service; we deliberately unwrap the quotes
/// literally instead of running a JSON parse that would start failing
/// the day the endpoint is fixed.
pub fn strip_reference_quotes(raw: &str) -> &str {
    let s = raw.strip_prefix('"').unwrap_or(raw);
    s.strip_suffix('"').unwrap_or(s)
}

/// Fail if `path` is larger than [`MAX_FILE_SIZE`]. Called before any
/// network traffic for the file.
pub fn ensure_within_size_limit(path: &Path) -> Result<(), JobError> {
    let meta = std::fs::metadata(path).map_err(|source| JobError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    let size = meta.len();
    if size > MAX_FILE_SIZE {
        return Err(JobError::SizeLimitExceeded {
            path: path.to_path_buf(),
            size,
        });
    }
    Ok(())
}

/// Size-check and upload one file, returning the file information the
/// job document needs: the file's base name, the unquoted reference
/// returned by the upload, and the fixed download-only action.
fn upload_one(path: &Path, uploader: &dyn Uploader) -> Result<FileInformation, JobError> {
    ensure_within_size_limit(path)?;

    let raw = uploader.upload(path).map_err(|cause| JobError::Upload {
        path: path.to_path_buf(),
        cause,
    })?;

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileInformation {
        action: FileAction::DownloadOnly,
        name,
        url: strip_reference_quotes(&raw).to_string(),
    })
}

/// Upload `files` in input order and append the resulting entries to
/// `job`'s `setup.package.fileInformations` array.
///
/// An empty file list returns the document unchanged. The merge target
/// is validated once, before the first upload, so a malformed template
/// never costs a network call. Appends happen only after every upload
/// has succeeded, so a partially merged document is never observable.
pub fn assemble(
    mut job: Value,
    files: &[PathBuf],
    uploader: &dyn Uploader,
) -> Result<Value, JobError> {
    if files.is_empty() {
        return Ok(job);
    }

    if job.pointer(FILE_INFO_POINTER).map_or(true, |v| !v.is_array()) {
        return Err(JobError::MalformedTemplate);
    }

    let mut infos = Vec::with_capacity(files.len());
    for path in files {
        infos.push(upload_one(path, uploader)?);
    }

    let list = job
        .pointer_mut(FILE_INFO_POINTER)
        .and_then(Value::as_array_mut)
        .ok_or(JobError::MalformedTemplate)?;
    for info in infos {
        list.push(json!({
            "action": info.action,
            "name": info.name,
            "url": info.url,
        }));
    }

    Ok(job)
}
