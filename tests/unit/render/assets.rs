use std::cell::RefCell;
use base64::Engine as _;

use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

struct FakeFetcher {
    body: Option<Vec<u8>>,
    calls: RefCell<Vec<String>>,
}

impl ImageFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> VizResult<Vec<u8>> {
        self.calls.borrow_mut().push(url.to_owned());
        self.body
            .clone()
            .ok_or_else(|| VizError::evaluation("offline"))
    }
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn data_url_is_png_and_capped() {
    let url = png_data_url(&png_bytes(2000, 10)).unwrap();
    let b64 = url.strip_prefix("data:image/png;base64,").unwrap();
    let png = base64::engine::general_purpose::STANDARD
        .decode(b64)
        .unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!(img.width(), MAX_IMAGE_EDGE);
    assert!(img.height() <= 10);
}

#[test]
fn garbage_bytes_are_rejected() {
    assert!(png_data_url(b"not an image").is_err());
}

#[test]
fn prepare_loads_remote_once_and_skips_failures() {
    let fetcher = FakeFetcher {
        body: Some(png_bytes(4, 4)),
        calls: RefCell::new(Vec::new()),
    };
    let remote = ImageSource::Remote("https://example.com/a.png".into());
    let mut store = AssetStore::new("/nonexistent-root");
    let missing_local = ImageSource::Local("nope.png".into());

    let n = store.prepare(&[remote.clone(), missing_local.clone()], &fetcher);
    assert_eq!(n, 1);
    assert!(store.data_url(&remote).is_some());
    assert!(store.data_url(&missing_local).is_none());

    store.prepare(&[remote.clone()], &fetcher);
    assert_eq!(fetcher.calls.borrow().len(), 1);
}

#[test]
fn prepare_reads_local_files_under_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bg.png"), png_bytes(3, 3)).unwrap();
    let fetcher = FakeFetcher {
        body: None,
        calls: RefCell::new(Vec::new()),
    };
    let mut store = AssetStore::new(dir.path());
    let local = ImageSource::Local("./bg.png".into());
    assert_eq!(store.prepare(&[local.clone()], &fetcher), 1);
    assert!(store.contains(&local));
    assert!(fetcher.calls.borrow().is_empty());
}

#[test]
fn failed_remote_fetch_leaves_store_empty() {
    let fetcher = FakeFetcher {
        body: None,
        calls: RefCell::new(Vec::new()),
    };
    let mut store = AssetStore::default();
    store.prepare(&[ImageSource::Remote("https://example.com/x.png".into())], &fetcher);
    assert!(store.is_empty());
}
