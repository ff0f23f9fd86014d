//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from cloudphoto-core.
//! Every client is bound to the bucket named in the profile.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketCannedAcl, IndexDocument, WebsiteConfiguration};

use cloudphoto_core::{
    BucketAcl, Error, ListOptions, ListResult, ObjectInfo, ObjectStore, Profile, Result,
    WebsiteConfig,
};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// Create a new S3 client from a profile
    pub async fn new(profile: &Profile) -> Result<Self> {
        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            profile.aws_access_key_id.clone(),
            profile.aws_secret_access_key.clone(),
            None, // session token
            None, // expiry
            "cloudphoto-static-credentials",
        );

        // Build SDK config
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(profile.region.clone()))
            .endpoint_url(&profile.endpoint_url)
            .load()
            .await;

        // Path-style addressing works with every S3-compatible endpoint
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        tracing::debug!(
            endpoint = %profile.endpoint_url,
            bucket = %profile.bucket,
            "created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: profile.bucket.clone(),
        })
    }

    /// Name of the bucket this client operates on
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Map an SDK failure onto the core error taxonomy
fn storage_error<E>(err: E, target: &str) -> Error
where
    E: std::error::Error,
{
    let err_str = DisplayErrorContext(&err).to_string();
    if err_str.contains("AccessDenied")
        || err_str.contains("InvalidAccessKeyId")
        || err_str.contains("SignatureDoesNotMatch")
    {
        Error::Auth(format!("{target}: {err_str}"))
    } else if err_str.contains("NoSuchBucket") || err_str.contains("NotFound") {
        Error::NotFound(format!("{target}: {err_str}"))
    } else {
        Error::Network(err_str)
    }
}

fn canned_acl(acl: BucketAcl) -> BucketCannedAcl {
    match acl {
        BucketAcl::PublicRead => BucketCannedAcl::PublicRead,
    }
}

fn website_configuration(website: &WebsiteConfig) -> Result<WebsiteConfiguration> {
    let index = IndexDocument::builder()
        .suffix(&website.index_document)
        .build()
        .map_err(|e| Error::General(e.to_string()))?;

    Ok(WebsiteConfiguration::builder().index_document(index).build())
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult> {
        tracing::debug!(bucket = %self.bucket, prefix = ?options.prefix, "listing objects");

        let response = self
            .inner
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(options.prefix)
            .send()
            .await
            .map_err(|e| storage_error(e, &self.bucket))?;

        let items = response
            .contents()
            .iter()
            .map(|object| {
                ObjectInfo::new(object.key().unwrap_or_default(), object.size().unwrap_or(0))
            })
            .collect();

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
        })
    }

    async fn put_object<'a>(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> Result<ObjectInfo> {
        let size = data.len() as i64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        let response = request
            .send()
            .await
            .map_err(|e| storage_error(e, key))?;

        let mut info = ObjectInfo::new(key, size);
        if let Some(etag) = response.e_tag() {
            info.etag = Some(etag.trim_matches('"').to_string());
        }
        info.content_type = content_type.map(str::to_string);
        info.last_modified = Some(jiff::Timestamp::now());

        Ok(info)
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error(e, key))?;

        Ok(())
    }

    async fn put_bucket_acl(&self, acl: BucketAcl) -> Result<()> {
        tracing::debug!(bucket = %self.bucket, acl = acl.as_str(), "setting bucket ACL");

        self.inner
            .put_bucket_acl()
            .bucket(&self.bucket)
            .acl(canned_acl(acl))
            .send()
            .await
            .map_err(|e| storage_error(e, &self.bucket))?;

        Ok(())
    }

    async fn put_bucket_website(&self, website: &WebsiteConfig) -> Result<()> {
        tracing::debug!(
            bucket = %self.bucket,
            index = %website.index_document,
            "enabling website hosting"
        );

        self.inner
            .put_bucket_website()
            .bucket(&self.bucket)
            .website_configuration(website_configuration(website)?)
            .send()
            .await
            .map_err(|e| storage_error(e, &self.bucket))?;

        Ok(())
    }
}
