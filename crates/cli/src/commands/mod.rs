//! CLI command definitions and execution
//!
//! Every command except `init` needs a complete profile. The profile is
//! loaded before any command logic runs, and a broken configuration ends the
//! process with the configuration exit code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cloudphoto_core::{ConfigManager, Profile};
use cloudphoto_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod delete;
mod generate_site;
mod init;
mod list_albums;
mod upload;

/// cloudphoto - photo albums on S3-compatible object storage
///
/// Uploads photos into albums, lists albums, and publishes a static gallery
/// website from the same bucket.
#[derive(Parser, Debug)]
#[command(name = "cloudphoto")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Configuration file (default: ~/.config/cloudphoto/cloudphotorc)
    #[arg(long, global = true, env = "CLOUDPHOTO_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload the photos of a local directory into an album
    Upload(upload::UploadArgs),

    /// Delete photos from an album
    Delete(delete::DeleteArgs),

    /// List albums that hold at least one photo
    ListAlbums,

    /// Generate and publish the gallery website
    GenerateSite,

    /// Create or update the configuration file interactively
    Init,
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config);

    let config_manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => match ConfigManager::new() {
            Ok(cm) => cm,
            Err(e) => {
                formatter.error(&e.to_string());
                return ExitCode::ConfigError;
            }
        },
    };

    match cli.command {
        Commands::Init => init::execute(&config_manager, &formatter),
        Commands::Upload(args) => match connect(&config_manager, &formatter).await {
            Ok((_, client)) => upload::execute(args, &client, output_config).await,
            Err(code) => code,
        },
        Commands::Delete(args) => match connect(&config_manager, &formatter).await {
            Ok((_, client)) => delete::execute(args, &client, &formatter).await,
            Err(code) => code,
        },
        Commands::ListAlbums => match connect(&config_manager, &formatter).await {
            Ok((_, client)) => list_albums::execute(&client, &formatter).await,
            Err(code) => code,
        },
        Commands::GenerateSite => match connect(&config_manager, &formatter).await {
            Ok((profile, client)) => {
                generate_site::execute(&profile, &client, output_config).await
            }
            Err(code) => code,
        },
    }
}

/// Load the profile and build the storage client
async fn connect(
    config_manager: &ConfigManager,
    formatter: &Formatter,
) -> Result<(Profile, S3Client), ExitCode> {
    tracing::debug!(path = %config_manager.config_path().display(), "loading profile");
    let profile = config_manager.load().map_err(|e| {
        formatter.error(&e.to_string());
        ExitCode::ConfigError
    })?;

    let client = S3Client::new(&profile).await.map_err(|e| {
        formatter.error(&format!("Failed to create S3 client: {e}"));
        ExitCode::from_error(&e)
    })?;

    Ok((profile, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from(["cloudphoto", "upload", "--album", "trip", "--path", "./pics"])
            .unwrap();
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.album, "trip");
                assert_eq!(args.path, PathBuf::from("./pics"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from(["cloudphoto", "delete", "-a", "trip", "-p", "pics"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete(_)));
    }

    #[test]
    fn test_parse_kebab_case_commands() {
        let cli = Cli::try_parse_from(["cloudphoto", "list-albums"]).unwrap();
        assert!(matches!(cli.command, Commands::ListAlbums));

        let cli = Cli::try_parse_from(["cloudphoto", "generate-site", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::GenerateSite));
        assert!(cli.json);
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        let err = Cli::try_parse_from(["cloudphoto"]).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::UsageError.as_i32());
    }

    #[test]
    fn test_unknown_subcommand_is_usage_error() {
        let err = Cli::try_parse_from(["cloudphoto", "mksite"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        assert_eq!(err.exit_code(), ExitCode::UsageError.as_i32());
    }

    #[test]
    fn test_upload_requires_album_and_path() {
        let err = Cli::try_parse_from(["cloudphoto", "upload", "--album", "trip"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_empty_album_rejected() {
        let err = Cli::try_parse_from(["cloudphoto", "upload", "--album", "", "--path", "."])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["cloudphoto", "list-albums", "--config", "/tmp/rc"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rc")));
    }
}
