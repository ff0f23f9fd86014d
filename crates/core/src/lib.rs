//! cloudphoto-core: Core library for the cloudphoto CLI
//!
//! This crate provides the core functionality for cloudphoto, including:
//! - Configuration management
//! - The album key convention and album operations
//! - Static gallery site generation
//! - ObjectStore trait for S3 operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing with in-memory or mocked stores.

pub mod album;
pub mod config;
pub mod error;
pub mod site;
pub mod traits;

pub use album::{DeleteReport, UploadReport};
pub use config::{ConfigManager, PartialProfile, Profile};
pub use error::{Error, Result};
pub use site::{PublishedSite, SiteSettings};
pub use traits::{BucketAcl, ListOptions, ListResult, ObjectInfo, ObjectStore, WebsiteConfig};
