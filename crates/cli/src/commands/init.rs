//! init command - Create or update the configuration file
//!
//! Asks for each profile value in turn. Pressing enter keeps the value
//! already on disk, or the suggested default when there is none.

use std::io::{BufRead, Write};

use anyhow::Context;
use cloudphoto_core::config::{DEFAULT_ENDPOINT_URL, DEFAULT_REGION};
use cloudphoto_core::{ConfigManager, PartialProfile};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

struct Question {
    label: &'static str,
    default: Option<&'static str>,
    secret: bool,
}

const QUESTIONS: [Question; 5] = [
    Question {
        label: "AWS Access Key ID",
        default: None,
        secret: false,
    },
    Question {
        label: "AWS Secret Access Key",
        default: None,
        secret: true,
    },
    Question {
        label: "Bucket name",
        default: None,
        secret: false,
    },
    Question {
        label: "Region",
        default: Some(DEFAULT_REGION),
        secret: false,
    },
    Question {
        label: "Endpoint URL",
        default: Some(DEFAULT_ENDPOINT_URL),
        secret: false,
    },
];

/// Execute the init command
pub fn execute(config_manager: &ConfigManager, formatter: &Formatter) -> ExitCode {
    let current = match config_manager.load_partial() {
        Ok(current) => current,
        Err(e) => {
            formatter.error(&format!("Failed to read existing configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let updated = match ask(current, &mut stdin.lock(), &mut stdout) {
        Ok(updated) => updated,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            return ExitCode::GeneralError;
        }
    };

    if let Err(e) = config_manager.save(&updated) {
        formatter.error(&format!("Failed to save configuration: {e}"));
        return ExitCode::from_error(&e);
    }

    formatter.success(&format!(
        "Configuration saved to {}",
        config_manager.config_path().display()
    ));

    if let Err(e) = updated.complete() {
        formatter.warning(&format!("Configuration is not usable yet: {e}"));
    }

    ExitCode::Success
}

/// Prompt for every profile value, keeping current values on empty input
fn ask<R: BufRead, W: Write>(
    current: PartialProfile,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<PartialProfile> {
    let PartialProfile {
        aws_access_key_id,
        aws_secret_access_key,
        bucket,
        region,
        endpoint_url,
    } = current;

    let [key_id_q, secret_q, bucket_q, region_q, endpoint_q] = &QUESTIONS;

    Ok(PartialProfile {
        aws_access_key_id: ask_one(key_id_q, aws_access_key_id, input, output)?,
        aws_secret_access_key: ask_one(secret_q, aws_secret_access_key, input, output)?,
        bucket: ask_one(bucket_q, bucket, input, output)?,
        region: ask_one(region_q, region, input, output)?,
        endpoint_url: ask_one(endpoint_q, endpoint_url, input, output)?,
    })
}

fn ask_one<R: BufRead, W: Write>(
    question: &Question,
    current: Option<String>,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Option<String>> {
    let fallback = current.or_else(|| question.default.map(str::to_string));

    let hint = match (&fallback, question.secret) {
        (Some(_), true) => " [keep existing]".to_string(),
        (Some(value), false) => format!(" [{value}]"),
        (None, _) => String::new(),
    };
    write!(output, "{}{hint}: ", question.label).context("writing prompt")?;
    output.flush().context("writing prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .with_context(|| format!("reading {}", question.label))?;

    let answer = answer.trim();
    if answer.is_empty() {
        Ok(fallback)
    } else {
        Ok(Some(answer.to_string()))
    }
}
