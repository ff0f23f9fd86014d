//! generate-site command - Publish the gallery website
//!
//! Regenerates `index.html` and one `website/{album}.html` page per album,
//! makes the bucket public-read and enables website hosting.

use cloudphoto_core::{ObjectStore, Profile, SiteSettings, site};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Execute the generate-site command
pub async fn execute(
    profile: &Profile,
    store: &dyn ObjectStore,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let settings = SiteSettings::new(&profile.bucket);

    let spinner = Spinner::new(output_config, &format!("Generating site for '{}'", profile.bucket));
    let result = site::generate(store, &settings).await;
    spinner.finish_and_clear();

    match result {
        Ok(published) => {
            if formatter.is_json() {
                formatter.json(&published);
            } else {
                formatter.success(&format!(
                    "Published {} album page(s) and {}",
                    published.albums.len(),
                    site::INDEX_KEY
                ));
                formatter.println(&published.url);
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to generate site: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
