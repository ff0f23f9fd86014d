//! Static gallery site generation
//!
//! Builds the gallery from the current bucket contents and publishes it back
//! into the same bucket:
//!
//! ```text
//! index.html              # links to every album page
//! website/{album}.html    # Galleria viewer over the album photos
//! ```
//!
//! Pages are produced by splicing fragments into fixed templates right after
//! an anchor (`<ul>` for the index, the Galleria container for albums). Each
//! fragment goes in at the same anchor, so the finished page lists items in
//! reverse order of insertion. Albums are iterated in sorted order, which
//! makes the output a deterministic function of the bucket contents.
//!
//! Every run regenerates and overwrites all pages. Nothing is rolled back on
//! failure: a late error can leave pages published with hosting not enabled.

use serde::Serialize;

use crate::album::{list_albums, list_photos};
use crate::error::Result;
use crate::traits::{BucketAcl, ObjectStore, WebsiteConfig};

/// Key of the site entry page
pub const INDEX_KEY: &str = "index.html";

/// Content type of published pages
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Base URL photos are served from
pub const DEFAULT_STORAGE_URL: &str = "https://storage.yandexcloud.net";

/// Domain the bucket website is served from
pub const DEFAULT_WEBSITE_DOMAIN: &str = "website.yandexcloud.net";

const INDEX_ANCHOR: &str = "<ul>";
const GALLERY_ANCHOR: &str = "<div class=\"galleria\">";

const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html>
    <head>
        <meta charset="utf-8">
        <title>PhotoArchive</title>
    </head>
    <body>
        <h1>PhotoArchive</h1>
        <ul>
        </ul>
    </body>
</html>
"#;

const GALLERY_TEMPLATE: &str = r#"<!doctype html>
<html>
    <head>
        <meta charset="utf-8">
        <link rel="stylesheet" type="text/css" href="https://cdnjs.cloudflare.com/ajax/libs/galleria/1.6.1/themes/classic/galleria.classic.min.css" />
        <style>
            .galleria{ width: 960px; height: 540px; background: #000 }
        </style>
        <script src="https://ajax.googleapis.com/ajax/libs/jquery/3.6.0/jquery.min.js"></script>
        <script src="https://cdnjs.cloudflare.com/ajax/libs/galleria/1.6.1/galleria.min.js"></script>
        <script src="https://cdnjs.cloudflare.com/ajax/libs/galleria/1.6.1/themes/classic/galleria.classic.min.js"></script>
    </head>
    <body>
        <div class="galleria">
        </div>
        <script>
            (function() {
                Galleria.run('.galleria');
            }());
        </script>
    </body>
</html>
"#;

/// Where the generated site points to and is served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub bucket: String,
    /// Base URL for photo links, without trailing slash
    pub storage_url: String,
    /// Suffix of the bucket website host name
    pub website_domain: String,
}

impl SiteSettings {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            website_domain: DEFAULT_WEBSITE_DOMAIN.to_string(),
        }
    }

    /// Public URL of a photo
    pub fn photo_url(&self, album: &str, photo: &str) -> String {
        format!("{}/{}/{album}/{photo}", self.storage_url, self.bucket)
    }

    /// Public URL of the bucket website
    pub fn website_url(&self) -> String {
        format!("https://{}.{}", self.bucket, self.website_domain)
    }
}

/// Key of an album's gallery page
pub fn album_page_key(album: &str) -> String {
    format!("website/{album}.html")
}

/// A generated but not yet published page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub key: String,
    pub html: String,
    /// Album shown on the page, `None` for the index
    pub album: Option<String>,
}

/// What a generation run published
#[derive(Debug, Clone, Serialize)]
pub struct PublishedSite {
    pub url: String,
    pub albums: Vec<String>,
    pub pages: Vec<String>,
}

/// Insert `fragment` right after the first occurrence of `anchor`
fn insert_after(document: &mut String, anchor: &str, fragment: &str) {
    if let Some(pos) = document.find(anchor) {
        document.insert_str(pos + anchor.len(), fragment);
    }
}

/// Render the index page linking to the given albums
pub fn render_index<'a>(albums: impl IntoIterator<Item = &'a str>) -> String {
    let mut page = INDEX_TEMPLATE.to_string();
    for album in albums {
        let link = format!("\n            <li><a href=\"{}\">{album}</a></li>", album_page_key(album));
        insert_after(&mut page, INDEX_ANCHOR, &link);
    }
    page
}

/// Render the gallery page of one album
pub fn render_album<'a>(
    settings: &SiteSettings,
    album: &str,
    photos: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut page = GALLERY_TEMPLATE.to_string();
    for photo in photos {
        let img = format!("\n            <img src=\"{}\">", settings.photo_url(album, photo));
        insert_after(&mut page, GALLERY_ANCHOR, &img);
    }
    page
}

/// Build every page of the site from the current bucket contents
///
/// Album pages come first, the index page last.
pub async fn build_pages<S>(store: &S, settings: &SiteSettings) -> Result<Vec<Page>>
where
    S: ObjectStore + ?Sized,
{
    let albums = list_albums(store).await?;
    let mut pages = Vec::with_capacity(albums.len() + 1);

    for album in &albums {
        let photos = list_photos(store, album).await?;
        tracing::debug!(%album, photos = photos.len(), "rendering album page");
        pages.push(Page {
            key: album_page_key(album),
            html: render_album(settings, album, photos.iter().map(String::as_str)),
            album: Some(album.clone()),
        });
    }

    pages.push(Page {
        key: INDEX_KEY.to_string(),
        html: render_index(albums.iter().map(String::as_str)),
        album: None,
    });

    Ok(pages)
}

/// Generate the site, publish it and turn on website hosting
pub async fn generate<S>(store: &S, settings: &SiteSettings) -> Result<PublishedSite>
where
    S: ObjectStore + ?Sized,
{
    let pages = build_pages(store, settings).await?;
    let mut published = Vec::with_capacity(pages.len());
    let mut albums = Vec::new();

    for page in pages {
        tracing::info!(key = %page.key, "publishing page");
        store
            .put_object(&page.key, page.html.into_bytes(), Some(HTML_CONTENT_TYPE))
            .await?;
        albums.extend(page.album);
        published.push(page.key);
    }

    store.put_bucket_acl(BucketAcl::PublicRead).await?;
    store
        .put_bucket_website(&WebsiteConfig::with_index(INDEX_KEY))
        .await?;

    let url = settings.website_url();
    tracing::info!(%url, "website hosting enabled");

    Ok(PublishedSite {
        url,
        albums,
        pages: published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ListResult, MockObjectStore, ObjectInfo};
    use mockall::Sequence;

    fn listing(keys: &[&str]) -> ListResult {
        ListResult {
            items: keys.iter().map(|k| ObjectInfo::new(*k, 1)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_urls() {
        let settings = SiteSettings::new("photos");
        assert_eq!(
            settings.photo_url("trip", "a.jpg"),
            "https://storage.yandexcloud.net/photos/trip/a.jpg"
        );
        assert_eq!(settings.website_url(), "https://photos.website.yandexcloud.net");
        assert_eq!(album_page_key("trip"), "website/trip.html");
    }

    #[test]
    fn test_render_index_reverses_insertion_order() {
        let html = render_index(["2021", "trip", "vacation"]);

        let first = html.find("website/vacation.html").unwrap();
        let second = html.find("website/trip.html").unwrap();
        let third = html.find("website/2021.html").unwrap();
        assert!(first < second && second < third);
        assert!(html.contains("<li><a href=\"website/trip.html\">trip</a></li>"));
        assert!(html.find("<ul>").unwrap() < first);
        assert!(third < html.find("</ul>").unwrap());
    }

    #[test]
    fn test_render_index_without_albums_keeps_empty_list() {
        assert_eq!(render_index([]), INDEX_TEMPLATE);
    }

    #[test]
    fn test_render_album_images() {
        let settings = SiteSettings::new("photos");
        let html = render_album(&settings, "trip", ["a.jpg", "b.jpeg"]);

        let b = html
            .find("<img src=\"https://storage.yandexcloud.net/photos/trip/b.jpeg\">")
            .unwrap();
        let a = html
            .find("<img src=\"https://storage.yandexcloud.net/photos/trip/a.jpg\">")
            .unwrap();
        assert!(html.find(GALLERY_ANCHOR).unwrap() < b);
        assert!(b < a);
        assert!(html.contains("galleria.min.js"));
        assert!(html.contains("Galleria.run('.galleria');"));
    }

    #[test]
    fn test_insert_after_missing_anchor_is_noop() {
        let mut doc = "<p></p>".to_string();
        insert_after(&mut doc, "<ul>", "<li>");
        assert_eq!(doc, "<p></p>");
    }

    #[tokio::test]
    async fn test_generate_publishes_then_enables_hosting() {
        let mut seq = Sequence::new();
        let mut store = MockObjectStore::new();

        store
            .expect_list_objects()
            .withf(|options| options.prefix.is_none())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(listing(&["2021/x.jpg", "vacation/y.jpeg", "empty/"])));
        store
            .expect_list_objects()
            .withf(|options| options.prefix.as_deref() == Some("2021/"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(listing(&["2021/x.jpg"])));
        store
            .expect_list_objects()
            .withf(|options| options.prefix.as_deref() == Some("vacation/"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(listing(&["vacation/y.jpeg"])));
        store
            .expect_put_object()
            .withf(|key, data, content_type| {
                key == "website/2021.html"
                    && String::from_utf8_lossy(data).contains("/photos/2021/x.jpg")
                    && *content_type == Some(HTML_CONTENT_TYPE)
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|key, data, _| Ok(ObjectInfo::new(key, data.len() as i64)));
        store
            .expect_put_object()
            .withf(|key, _, _| key == "website/vacation.html")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|key, data, _| Ok(ObjectInfo::new(key, data.len() as i64)));
        store
            .expect_put_object()
            .withf(|key, data, _| {
                let html = String::from_utf8_lossy(data);
                key == "index.html"
                    && html.contains("website/2021.html")
                    && html.contains("website/vacation.html")
                    && !html.contains("website/empty.html")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|key, data, _| Ok(ObjectInfo::new(key, data.len() as i64)));
        store
            .expect_put_bucket_acl()
            .withf(|acl| *acl == BucketAcl::PublicRead)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_put_bucket_website()
            .withf(|website| website.index_document == "index.html")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let site = generate(&store, &SiteSettings::new("photos")).await.unwrap();
        assert_eq!(site.url, "https://photos.website.yandexcloud.net");
        assert_eq!(site.albums, vec!["2021", "vacation"]);
        assert_eq!(
            site.pages,
            vec!["website/2021.html", "website/vacation.html", "index.html"]
        );
    }

    #[tokio::test]
    async fn test_generate_stops_before_hosting_on_put_failure() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_| Ok(listing(&["trip/a.jpg"])));
        store
            .expect_put_object()
            .times(1)
            .returning(|_, _, _| Err(crate::Error::Auth("AccessDenied".into())));

        let err = generate(&store, &SiteSettings::new("photos"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Auth(_)));
    }
}
