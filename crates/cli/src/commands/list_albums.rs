//! list-albums command - List albums
//!
//! Prints the albums holding at least one photo as a comma-joined line.
//! Albums made only of an empty marker are not shown.

use cloudphoto_core::{ObjectStore, album};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Execute the list-albums command
pub async fn execute(store: &dyn ObjectStore, formatter: &Formatter) -> ExitCode {
    let albums = match album::list_albums(store).await {
        Ok(albums) => albums,
        Err(e) => {
            formatter.error(&format!("Failed to list albums: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    if formatter.is_json() {
        formatter.json(&serde_json::json!({ "albums": albums }));
    } else {
        formatter.println(&albums_line(albums.iter().map(String::as_str)));
    }

    ExitCode::Success
}

fn albums_line<'a>(albums: impl IntoIterator<Item = &'a str>) -> String {
    format!("Albums: {}", albums.into_iter().collect::<Vec<_>>().join(", "))
}
