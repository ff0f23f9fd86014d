//! Exit code definitions for cloudphoto
//!
//! Scripts rely on these values. Changing one is a breaking change.

/// Exit codes for the cloudphoto CLI application.
///
/// These codes follow a consistent convention to allow scripts and automation
/// to handle different error scenarios appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully, or a bad local path was reported
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments
    UsageError = 2,

    /// Storage service unreachable or failed the request
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Resource not found: bucket does not exist
    NotFound = 5,

    /// Configuration file missing, unreadable or incomplete (sysexits EX_CONFIG)
    ConfigError = 78,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            78 => Some(Self::ConfigError),
            _ => None,
        }
    }

    /// Exit code for a core error
    pub fn from_error(err: &cloudphoto_core::Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }
}
