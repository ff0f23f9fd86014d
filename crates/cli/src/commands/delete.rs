//! delete command - Delete photos from an album
//!
//! By default the photos to delete are named by a local directory: every
//! `.jpg`/`.jpeg` file found there is removed from the album, whether or not
//! it was ever uploaded. With `--remote` the album's own listing is used.

use std::path::PathBuf;

use clap::Args;
use clap::builder::NonEmptyStringValueParser;
use cloudphoto_core::{ObjectStore, album};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Delete photos
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Album to delete from
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub album: String,

    /// Local directory whose photo names select what to delete
    #[arg(short, long, required_unless_present = "remote")]
    pub path: Option<PathBuf>,

    /// Delete every photo currently listed in the album, and its marker
    #[arg(long, conflicts_with = "path")]
    pub remote: bool,
}

/// Execute the delete command
pub async fn execute(args: DeleteArgs, store: &dyn ObjectStore, formatter: &Formatter) -> ExitCode {
    let result = match &args.path {
        Some(path) => album::delete(store, &args.album, path).await,
        None => album::delete_remote(store, &args.album).await,
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    if formatter.is_json() {
        formatter.json(&serde_json::json!({
            "status": "success",
            "album": report.album,
            "deleted": report.deleted,
        }));
    } else {
        formatter.success(&format!(
            "Deletion successful: removed {} photo(s) from '{}'",
            report.deleted.len(),
            report.album
        ));
    }

    ExitCode::Success
}
