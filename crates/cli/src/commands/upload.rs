//! upload command - Upload photos into an album
//!
//! Copies every `.jpg`/`.jpeg` file directly inside a local directory to
//! `{album}/{filename}` in the bucket.

use std::path::PathBuf;

use clap::Args;
use clap::builder::NonEmptyStringValueParser;
use cloudphoto_core::{ObjectInfo, ObjectStore, UploadReport, album};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Upload photos
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Album to upload into
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub album: String,

    /// Local directory holding the photos
    #[arg(short, long)]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
struct UploadOutput {
    status: &'static str,
    album: String,
    uploaded: Vec<ObjectInfo>,
    total_bytes: i64,
    total_human: String,
    marker_created: bool,
}

impl From<&UploadReport> for UploadOutput {
    fn from(report: &UploadReport) -> Self {
        let total = report.total_bytes();
        Self {
            status: "success",
            album: report.album.clone(),
            uploaded: report.uploaded.clone(),
            total_bytes: total,
            total_human: humansize::format_size(total.max(0) as u64, humansize::BINARY),
            marker_created: report.marker_created,
        }
    }
}

/// Execute the upload command
pub async fn execute(
    args: UploadArgs,
    store: &dyn ObjectStore,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    if let Err(e) = album::ensure_dir(&args.path) {
        formatter.error(&e.to_string());
        return ExitCode::from_error(&e);
    }

    let spinner = Spinner::new(output_config, &format!("Uploading to '{}'", args.album));
    let result = album::upload(store, &args.album, &args.path, |info| {
        spinner.step(&format!("{} ({})", info.key, info.size_human))
    })
    .await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let output = UploadOutput::from(&report);
    if formatter.is_json() {
        formatter.json(&output);
    } else {
        if report.marker_created {
            formatter.warning(&format!(
                "No photos in {}; created empty album '{}'",
                args.path.display(),
                report.album
            ));
        }
        formatter.success(&format!(
            "Successfully uploaded {} photo(s) to '{}' ({})",
            output.uploaded.len(),
            output.album,
            output.total_human
        ));
    }

    ExitCode::Success
}
