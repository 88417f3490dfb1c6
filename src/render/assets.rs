use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{VizError, VizResult};
use crate::scene::node::ImageSource;
use crate::scene::svg::ImageResolver;

/// Longest edge an embedded image is downscaled to.
pub const MAX_IMAGE_EDGE: u32 = 1280;

/// Source of remote image bytes.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> VizResult<Vec<u8>>;
}

/// Blocking HTTP fetcher for avatars and background images.
#[derive(Clone, Debug)]
pub struct HttpImageFetcher {
    http: reqwest::blocking::Client,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> VizResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("pr-visualizer/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("build image http client")?;
        Ok(Self { http })
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> VizResult<Vec<u8>> {
        let resp = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(VizError::evaluation(format!(
                "image request to {url} failed with {status}"
            )));
        }
        let bytes = resp.bytes().with_context(|| format!("read body of {url}"))?;
        Ok(bytes.to_vec())
    }
}

/// Images referenced by a composition, decoded once and kept as PNG `data:` URLs.
///
/// Local sources resolve against `root`; remote ones go through an [`ImageFetcher`]. An image
/// that fails to load is left out and its node paints the fallback instead.
#[derive(Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    images: HashMap<ImageSource, String>,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn contains(&self, source: &ImageSource) -> bool {
        self.images.contains_key(source)
    }

    /// Load every source not loaded yet. Returns how many are available afterwards.
    #[tracing::instrument(skip_all, fields(sources = sources.len()))]
    pub fn prepare(&mut self, sources: &[ImageSource], fetcher: &dyn ImageFetcher) -> usize {
        for source in sources {
            if self.images.contains_key(source) {
                continue;
            }
            let loaded = self
                .read_source(source, fetcher)
                .and_then(|bytes| self.insert_bytes(source.clone(), &bytes));
            if let Err(e) = loaded {
                tracing::warn!(source = source.key(), error = %e, "image unavailable, using fallback");
            }
        }
        tracing::info!(loaded = self.images.len(), "images prepared");
        self.images.len()
    }

    /// Decode `bytes` and keep them for `source`.
    pub fn insert_bytes(&mut self, source: ImageSource, bytes: &[u8]) -> VizResult<()> {
        let url = png_data_url(bytes)?;
        self.images.insert(source, url);
        Ok(())
    }

    fn read_source(&self, source: &ImageSource, fetcher: &dyn ImageFetcher) -> VizResult<Vec<u8>> {
        match source {
            ImageSource::Remote(url) => fetcher.fetch(url),
            ImageSource::Local(rel) => {
                let norm = normalize_rel_path(rel)?;
                let path = self.root.join(Path::new(&norm));
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read image '{}'", path.display()))?;
                Ok(bytes)
            }
        }
    }
}

impl ImageResolver for AssetStore {
    fn data_url(&self, source: &ImageSource) -> Option<&str> {
        self.images.get(source).map(String::as_str)
    }
}

/// Decode any supported image, cap its size and re-encode it as a PNG `data:` URL.
pub fn png_data_url(bytes: &[u8]) -> VizResult<String> {
    let mut img = image::load_from_memory(bytes).context("decode image from memory")?;
    if img.width() > MAX_IMAGE_EDGE || img.height() > MAX_IMAGE_EDGE {
        img = img.thumbnail(MAX_IMAGE_EDGE, MAX_IMAGE_EDGE);
    }
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode image as png")?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    ))
}

/// Normalize and validate asset-relative paths.
///
/// The result uses `/` separators and drops `.` segments. Absolute paths and `..` are rejected.
pub fn normalize_rel_path(source: &str) -> VizResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(VizError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(VizError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(VizError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(VizError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/assets.rs"]
mod tests;
