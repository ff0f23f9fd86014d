//! ObjectStore trait definition
//!
//! This trait defines the interface for S3-compatible storage operations.
//! It allows the album operations and the site generator to be decoupled from
//! the specific S3 SDK implementation. A store is bound to a single bucket.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;

use crate::error::Result;

/// Metadata for an object
///
/// Listings fill in only the key and size. A write also reports the ETag,
/// the content type and the time of the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Time of the write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an object of the given size
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            last_modified: None,
            etag: None,
            content_type: None,
        }
    }
}

/// One page of a bucket listing
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether more objects exist beyond this page
    pub truncated: bool,
}

/// Options for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Prefix to filter by
    pub prefix: Option<String>,
}

impl ListOptions {
    /// List only keys under the given prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Default::default()
        }
    }
}

/// Canned access control list for a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketAcl {
    /// Anyone may read objects, only the owner may write
    PublicRead,
}

impl BucketAcl {
    /// The canned ACL name understood by S3
    pub const fn as_str(self) -> &'static str {
        match self {
            BucketAcl::PublicRead => "public-read",
        }
    }
}

/// Static website hosting configuration for a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteConfig {
    /// Document served for directory requests
    pub index_document: String,
}

impl WebsiteConfig {
    pub fn with_index(index_document: impl Into<String>) -> Self {
        Self {
            index_document: index_document.into(),
        }
    }
}

/// Trait for S3-compatible storage operations against one bucket
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of objects in the bucket
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult>;

    /// Write an object, replacing any existing object with the same key
    async fn put_object<'a>(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> Result<ObjectInfo>;

    /// Delete an object; deleting a missing key succeeds
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Replace the bucket access control list
    async fn put_bucket_acl(&self, acl: BucketAcl) -> Result<()>;

    /// Enable static website hosting on the bucket
    async fn put_bucket_website(&self, website: &WebsiteConfig) -> Result<()>;
}
