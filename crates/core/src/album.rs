//! Albums and photos
//!
//! An album has no record of its own: it is the common key prefix of its
//! photos. A photo named `a.jpg` in album `trip` lives at `trip/a.jpg`, and an
//! album with no photos can be kept alive by a zero-byte marker at `trip/`.
//!
//! Upload and delete take their file names from a local directory. Delete in
//! particular removes the remote keys matching the local file names, not the
//! remote album contents; [`delete_remote`] does the latter.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::traits::{ListOptions, ObjectInfo, ObjectStore};

/// File extensions recognized as photos (case-sensitive)
pub const PHOTO_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Keys this short or shorter can't name a photo inside an album
pub const MIN_PHOTO_KEY_LEN: usize = 5;

/// Object key for a photo in an album
///
/// No escaping is done: a `/` inside `album` nests the photo one level deeper.
pub fn key_for(album: &str, filename: &str) -> String {
    format!("{album}/{filename}")
}

/// Key of the zero-byte object that keeps an empty album enumerable
pub fn marker_key(album: &str) -> String {
    format!("{album}/")
}

/// Album part of a photo key: everything before the last `/`
pub fn album_of(key: &str) -> &str {
    key.rfind('/').map_or(key, |pos| &key[..pos])
}

/// File name part of a photo key: everything after the last `/`
pub fn photo_name(key: &str) -> &str {
    key.rfind('/').map_or(key, |pos| &key[pos + 1..])
}

/// Whether a file name or key carries a photo extension
pub fn is_photo(name: &str) -> bool {
    PHOTO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Outcome of an upload
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub album: String,
    pub uploaded: Vec<ObjectInfo>,
    /// Set when the directory held no photos and the album marker was written
    pub marker_created: bool,
}

impl UploadReport {
    pub fn total_bytes(&self) -> i64 {
        self.uploaded.iter().map(|info| info.size_bytes).sum()
    }
}

/// Outcome of a delete
#[derive(Debug, Clone)]
pub struct DeleteReport {
    pub album: String,
    pub deleted: Vec<String>,
}

/// Fail with [`Error::InvalidPath`] unless `dir` is an existing directory
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidPath(dir.display().to_string()))
    }
}

/// Photo file names directly inside `dir`, sorted
///
/// Fails like [`ensure_dir`]. Subdirectories are not descended into. Names
/// that aren't valid UTF-8 can't become object keys and are skipped.
pub fn local_photos(dir: &Path) -> Result<Vec<String>> {
    ensure_dir(dir)?;

    let mut photos = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                tracing::warn!(?name, "skipping file whose name is not valid UTF-8");
                continue;
            }
        };
        if is_photo(&name) {
            photos.push(name);
        }
    }
    photos.sort();
    Ok(photos)
}

/// Upload every photo in `dir` into `album`
///
/// Existing objects with the same key are overwritten. If `dir` holds no
/// photos, a marker object is written instead. `on_uploaded` is called after
/// each successful write. There is no rollback: a failure part way through
/// leaves the photos written so far in place.
pub async fn upload<S, F>(
    store: &S,
    album: &str,
    dir: &Path,
    mut on_uploaded: F,
) -> Result<UploadReport>
where
    S: ObjectStore + ?Sized,
    F: FnMut(&ObjectInfo),
{
    let photos = local_photos(dir)?;
    let mut report = UploadReport {
        album: album.to_string(),
        uploaded: Vec::with_capacity(photos.len()),
        marker_created: false,
    };

    for photo in &photos {
        let path = dir.join(photo);
        let data = std::fs::read(&path)?;
        let content_type = mime_guess::from_path(&path)
            .first()
            .map(|m| m.essence_str().to_string());

        let key = key_for(album, photo);
        tracing::debug!(%key, size = data.len(), "uploading photo");
        let info = store.put_object(&key, data, content_type.as_deref()).await?;
        on_uploaded(&info);
        report.uploaded.push(info);
    }

    if photos.is_empty() {
        let key = marker_key(album);
        tracing::debug!(%key, "no photos found, writing album marker");
        store.put_object(&key, Vec::new(), None).await?;
        report.marker_created = true;
    }

    Ok(report)
}

/// Delete from `album` every photo whose name appears in `dir`
///
/// Keys are deleted whether or not they exist remotely.
pub async fn delete<S>(store: &S, album: &str, dir: &Path) -> Result<DeleteReport>
where
    S: ObjectStore + ?Sized,
{
    let photos = local_photos(dir)?;
    let mut deleted = Vec::with_capacity(photos.len());

    for photo in &photos {
        let key = key_for(album, photo);
        tracing::debug!(%key, "deleting photo");
        store.delete_object(&key).await?;
        deleted.push(key);
    }

    Ok(DeleteReport {
        album: album.to_string(),
        deleted,
    })
}

/// Delete every photo the bucket listing shows for `album`, and its marker
pub async fn delete_remote<S>(store: &S, album: &str) -> Result<DeleteReport>
where
    S: ObjectStore + ?Sized,
{
    let mut deleted = Vec::new();
    for photo in list_photos(store, album).await? {
        let key = key_for(album, &photo);
        tracing::debug!(%key, "deleting photo");
        store.delete_object(&key).await?;
        deleted.push(key);
    }

    store.delete_object(&marker_key(album)).await?;

    Ok(DeleteReport {
        album: album.to_string(),
        deleted,
    })
}

/// Names of all albums holding at least one photo
///
/// Only the first listing page is examined. Albums that exist only as a
/// marker object are not reported, since the marker has no photo extension.
/// Objects at the bucket root belong to no album.
pub async fn list_albums<S>(store: &S) -> Result<BTreeSet<String>>
where
    S: ObjectStore + ?Sized,
{
    let page = first_page(store, ListOptions::default()).await?;

    let albums = page
        .iter()
        .map(|info| info.key.as_str())
        .filter(|key| key.len() > MIN_PHOTO_KEY_LEN)
        .filter(|key| key.contains('/') && is_photo(key))
        .map(|key| album_of(key).to_string())
        .collect();

    Ok(albums)
}

/// File names of the photos directly inside `album`, sorted
///
/// Photos of nested albums (`album/inner/x.jpg`) are not included.
pub async fn list_photos<S>(store: &S, album: &str) -> Result<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    let page = first_page(store, ListOptions::with_prefix(marker_key(album))).await?;

    let mut photos: Vec<String> = page
        .iter()
        .map(|info| info.key.as_str())
        .filter(|key| is_photo(key) && album_of(key) == album)
        .map(|key| photo_name(key).to_string())
        .collect();
    photos.sort();
    Ok(photos)
}

async fn first_page<S>(store: &S, options: ListOptions) -> Result<Vec<ObjectInfo>>
where
    S: ObjectStore + ?Sized,
{
    let result = store.list_objects(options).await?;
    if result.truncated {
        tracing::warn!(
            listed = result.items.len(),
            "bucket listing truncated, objects beyond the first page are ignored"
        );
    }
    Ok(result.items)
}
