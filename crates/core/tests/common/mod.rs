//! In-memory ObjectStore used by the album and site tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cloudphoto_core::{
    BucketAcl, ListOptions, ListResult, ObjectInfo, ObjectStore, Result, WebsiteConfig,
};

/// Bucket state kept by [`MemoryStore`]
#[derive(Debug, Default)]
pub struct BucketState {
    pub objects: BTreeMap<String, Vec<u8>>,
    pub content_types: BTreeMap<String, String>,
    pub acl: Option<BucketAcl>,
    pub website: Option<WebsiteConfig>,
    pub puts: usize,
    pub deletes: usize,
}

/// A bucket held in memory, listing keys in lexicographic order like S3
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<BucketState>,
    /// Page size of `list_objects`, S3 defaults to 1000
    page_size: Option<usize>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(key.to_string(), data.to_vec());
    }

    pub fn keys(&self) -> Vec<String> {
        self.state.lock().unwrap().objects.keys().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().objects.get(key).cloned()
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().content_types.get(key).cloned()
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&BucketState) -> T) -> T {
        f(&self.state.lock().unwrap())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult> {
        let state = self.state.lock().unwrap();
        let prefix = options.prefix.unwrap_or_default();
        let page_size = self.page_size.unwrap_or(1000);

        let mut matching = state
            .objects
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, data)| ObjectInfo::new(key.clone(), data.len() as i64));

        let items: Vec<ObjectInfo> = matching.by_ref().take(page_size).collect();

        Ok(ListResult {
            items,
            truncated: matching.next().is_some(),
        })
    }

    async fn put_object<'a>(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> Result<ObjectInfo> {
        let mut state = self.state.lock().unwrap();
        let info = ObjectInfo::new(key, data.len() as i64);
        state.objects.insert(key.to_string(), data);
        match content_type {
            Some(ct) => state.content_types.insert(key.to_string(), ct.to_string()),
            None => state.content_types.remove(key),
        };
        state.puts += 1;
        Ok(info)
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.objects.remove(key);
        state.content_types.remove(key);
        state.deletes += 1;
        Ok(())
    }

    async fn put_bucket_acl(&self, acl: BucketAcl) -> Result<()> {
        self.state.lock().unwrap().acl = Some(acl);
        Ok(())
    }

    async fn put_bucket_website(&self, website: &WebsiteConfig) -> Result<()> {
        self.state.lock().unwrap().website = Some(website.clone());
        Ok(())
    }
}
