//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const PAGE_URL: &str = "https://shop.example.com/products/";

/// A product page referencing a same-origin sheet, a cross-origin font sheet,
/// and the usual scripts, images and media.
pub const PAGE_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <link rel="stylesheet" href="/css/site.css">
    <link rel="stylesheet" href="https://fonts.example.net/css?family=Inter">
    <link rel="icon" href="/favicon.ico">
    <script src="/js/app.js" defer></script>
    <style>.hero { background-image: url("../img/hero.jpg") }</style>
  </head>
  <body>
    <div class="hero"></div>
    <img src="../img/logo.png" alt="">
    <img src="/css/site.css">
    <video src="/media/promo.mp4" poster="/media/promo.jpg"></video>
    <iframe src="https://reviews.example.org/widget"></iframe>
  </body>
</html>"#;

pub const SITE_CSS: &str = r#"
@font-face { font-family: Shop; src: url(../fonts/shop.woff2) format("woff2") }
.banner { background: url(/img/banner.png) no-repeat }
"#;

pub const REMOTE_FONT_CSS: &str = r#"
@font-face { font-family: Inter; src: url(https://fonts.example.net/inter.woff2) }
"#;

pub const PAGE_HAR: &str = r#"{
    "log": {
        "version": "1.2",
        "pages": [ { "id": "page_1", "startedDateTime": "2024-05-01T10:00:00.000Z" } ],
        "entries": [
            {
                "startedDateTime": "2024-05-01T10:00:00.000Z",
                "time": 80,
                "_resourceType": "document",
                "request": { "url": "https://shop.example.com/products/" },
                "response": { "status": 200, "headersSize": 250, "bodySize": 4000 }
            },
            {
                "startedDateTime": "2024-05-01T10:00:00.100Z",
                "time": 30,
                "_resourceType": "stylesheet",
                "request": { "url": "https://shop.example.com/css/site.css" },
                "response": { "status": 200, "_transferSize": 900 }
            },
            {
                "startedDateTime": "2024-05-01T10:00:00.120Z",
                "time": 35,
                "_resourceType": "script",
                "request": { "url": "https://shop.example.com/js/app.js" },
                "response": { "status": 200, "_transferSize": 12000 }
            },
            {
                "startedDateTime": "2024-05-01T10:00:00.300Z",
                "time": 50,
                "_resourceType": "image",
                "request": { "url": "https://shop.example.com/img/logo.png" },
                "response": { "status": 200, "_transferSize": 3000 }
            }
        ]
    }
}"#;

pub fn write_temp(body: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(body.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}
