//! Client-side image compression: fit inside a bounding box and re-encode.

use crate::CompressError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Advisory upload limit used by the dashboard forms
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// ============================================================================
// OPTIONS
// ============================================================================

/// Encoding of the compressed output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// 0.0..=1.0, only honoured by JPEG
    pub quality: f32,
    pub format: OutputFormat,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
            quality: 0.8,
            format: OutputFormat::Jpeg,
        }
    }
}

impl CompressOptions {
    pub fn with_max_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Quality on the JPEG encoder's 1..=100 scale
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
    }
}

// ============================================================================
// SOURCES AND RESULTS
// ============================================================================

/// Where the input image comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// `data:` URL, `http(s)` URL (browser only) or filesystem path (native only)
    Url(String),
    /// Bytes picked by the user, e.g. from a file input
    File { name: String, bytes: Vec<u8> },
}

impl ImageSource {
    pub fn label(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressedImage {
    pub data_url: String,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub original_width: u32,
    pub original_height: u32,
    /// Encoded size, before base64
    pub size_bytes: usize,
}

impl CompressedImage {
    /// Stand-in for a failed batch item: the original URL with zero sizes
    pub fn passthrough(url: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            data_url: url.into(),
            format,
            width: 0,
            height: 0,
            original_width: 0,
            original_height: 0,
            size_bytes: 0,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.size_bytes == 0 && self.width == 0
    }
}

// ============================================================================
// COMPRESSION
// ============================================================================

/// Largest size with the original aspect ratio inside `max_width x max_height`.
/// Never upscales; both sides are at least 1.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }

    let scale = (max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64)
        .min(1.0);

    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Load, resize and re-encode one image
pub async fn compress_image(
    source: ImageSource,
    options: CompressOptions,
) -> Result<CompressedImage, CompressError> {
    let bytes = load_bytes(&source).await?;
    let compressed = compress_bytes(&bytes, &options)?;

    tracing::debug!(
        source = source.label(),
        original_width = compressed.original_width,
        original_height = compressed.original_height,
        width = compressed.width,
        height = compressed.height,
        size_bytes = compressed.size_bytes,
        "image compressed"
    );

    Ok(compressed)
}

/// Synchronous core of [`compress_image`] over already-loaded bytes
pub fn compress_bytes(bytes: &[u8], options: &CompressOptions) -> Result<CompressedImage, CompressError> {
    let original = image::load_from_memory(bytes)?;
    let (original_width, original_height) = original.dimensions();
    let (width, height) = fit_within(
        original_width,
        original_height,
        options.max_width,
        options.max_height,
    );

    let resized = if (width, height) == (original_width, original_height) {
        original
    } else {
        original.resize_exact(width, height, FilterType::Lanczos3)
    };

    let encoded = encode(&resized, options)?;

    Ok(CompressedImage {
        data_url: to_data_url(options.format.mime(), &encoded),
        format: options.format,
        width,
        height,
        original_width,
        original_height,
        size_bytes: encoded.len(),
    })
}

fn encode(image: &DynamicImage, options: &CompressOptions) -> Result<Vec<u8>, CompressError> {
    let mut buf = Vec::new();
    match options.format {
        OutputFormat::Jpeg => {
            let rgb = image.to_rgb8();
            JpegEncoder::new_with_quality(&mut buf, options.jpeg_quality()).encode_image(&rgb)?;
        }
        OutputFormat::Png => {
            DynamicImage::ImageRgba8(image.to_rgba8())
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        }
        OutputFormat::WebP => {
            DynamicImage::ImageRgba8(image.to_rgba8())
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)?;
        }
    }
    Ok(buf)
}

/// Compress every URL concurrently. Failed items come back as pass-through
/// records keyed by their URL, in input order.
pub async fn compress_batch(urls: &[String], options: CompressOptions) -> IndexMap<String, CompressedImage> {
    let jobs = urls.iter().map(|url| async move {
        let result = compress_image(ImageSource::Url(url.clone()), options).await;
        (url, result)
    });

    let mut out = IndexMap::with_capacity(urls.len());
    for (url, result) in join_all(jobs).await {
        let image = result.unwrap_or_else(|err| {
            tracing::warn!(url = %url, %err, "image compression failed, keeping original");
            CompressedImage::passthrough(url.clone(), options.format)
        });
        out.insert(url.clone(), image);
    }
    out
}

// ============================================================================
// LOADING
// ============================================================================

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode the payload of a base64 `data:` URL
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, CompressError> {
    let rest = url.strip_prefix("data:").ok_or(CompressError::InvalidDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(CompressError::InvalidDataUrl)?;
    if !meta.ends_with(";base64") {
        return Err(CompressError::InvalidDataUrl);
    }
    Ok(STANDARD.decode(payload.trim())?)
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

async fn load_bytes(source: &ImageSource) -> Result<Vec<u8>, CompressError> {
    match source {
        ImageSource::File { bytes, .. } => Ok(bytes.clone()),
        ImageSource::Url(url) if url.starts_with("data:") => decode_data_url(url),
        ImageSource::Url(url) if is_remote(url) => fetch_remote(url).await,
        ImageSource::Url(path) => read_local(path),
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_remote(url: &str) -> Result<Vec<u8>, CompressError> {
    let fetch_err = |reason: String| CompressError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| fetch_err(e.to_string()))?;

    if !response.ok() {
        return Err(fetch_err(format!("HTTP {}", response.status())));
    }

    response.binary().await.map_err(|e| fetch_err(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_remote(url: &str) -> Result<Vec<u8>, CompressError> {
    Err(CompressError::UnsupportedSource(url.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_local(path: &str) -> Result<Vec<u8>, CompressError> {
    Ok(std::fs::read(path)?)
}

#[cfg(target_arch = "wasm32")]
fn read_local(path: &str) -> Result<Vec<u8>, CompressError> {
    Err(CompressError::UnsupportedSource(path.to_string()))
}

// ============================================================================
// UPLOAD SIZE CHECK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: usize,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl From<&ImageSource> for UploadFile {
    fn from(source: &ImageSource) -> Self {
        match source {
            ImageSource::File { name, bytes } => Self::new(name.clone(), bytes.len()),
            ImageSource::Url(url) => Self::new(url.clone(), 0),
        }
    }
}

/// Outcome of an advisory size check; nothing is blocked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadCheck {
    pub accepted: Vec<UploadFile>,
    pub rejected: Vec<UploadFile>,
}

impl UploadCheck {
    pub fn all_accepted(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub fn check_upload_sizes(files: &[UploadFile], max_bytes: usize) -> UploadCheck {
    let (accepted, rejected): (Vec<_>, Vec<_>) = files.iter().cloned().partition(|f| f.size <= max_bytes);

    for file in &rejected {
        tracing::warn!(name = %file.name, size = file.size, max_bytes, "upload exceeds size limit");
    }

    UploadCheck { accepted, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn png_data_url(width: u32, height: u32) -> String {
        to_data_url("image/png", &png_bytes(width, height))
    }

    #[test]
    fn test_fit_within_keeps_aspect_ratio() {
        assert_eq!(fit_within(1600, 1200, 800, 600), (800, 600));
        assert_eq!(fit_within(1000, 500, 800, 600), (800, 400));
        assert_eq!(fit_within(500, 2000, 800, 600), (150, 600));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(320, 240, 800, 600), (320, 240));
    }

    #[test]
    fn test_fit_within_minimum_one_pixel() {
        assert_eq!(fit_within(10_000, 1, 800, 600), (800, 1));
        assert_eq!(fit_within(100, 100, 0, 0), (1, 1));
    }

    #[test]
    fn test_jpeg_quality_scale() {
        assert_eq!(CompressOptions::default().jpeg_quality(), 80);
        assert_eq!(CompressOptions::default().with_quality(0.0).jpeg_quality(), 1);
        assert_eq!(CompressOptions::default().with_quality(2.0).jpeg_quality(), 100);
    }

    #[test]
    fn test_compress_file_source_downscales() {
        let source = ImageSource::File {
            name: "floor.png".into(),
            bytes: png_bytes(400, 300),
        };
        let options = CompressOptions::default().with_max_size(200, 200);
        let out = block_on(compress_image(source, options)).unwrap();

        assert_eq!((out.original_width, out.original_height), (400, 300));
        assert_eq!((out.width, out.height), (200, 150));
        assert!(out.data_url.starts_with("data:image/jpeg;base64,"));

        let decoded = image::load_from_memory(&decode_data_url(&out.data_url).unwrap()).unwrap();
        assert_eq!(decoded.dimensions(), (200, 150));
        assert_eq!(out.size_bytes, decode_data_url(&out.data_url).unwrap().len());
    }

    #[test]
    fn test_compress_png_output() {
        let options = CompressOptions::default().with_format(OutputFormat::Png);
        let out = block_on(compress_image(ImageSource::Url(png_data_url(40, 20)), options)).unwrap();
        assert_eq!((out.width, out.height), (40, 20));
        assert!(out.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(out.format, OutputFormat::Png);
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        let options = CompressOptions::default();
        let not_an_image = ImageSource::File {
            name: "notes.txt".into(),
            bytes: b"hello".to_vec(),
        };
        assert!(matches!(
            block_on(compress_image(not_an_image, options)),
            Err(CompressError::Image(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png,plain"),
            Err(CompressError::InvalidDataUrl)
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(CompressError::Base64(_))
        ));
    }

    #[test]
    fn test_remote_url_unsupported_off_browser() {
        let result = block_on(compress_image(
            ImageSource::Url("https://example.com/a.png".into()),
            CompressOptions::default(),
        ));
        assert!(matches!(result, Err(CompressError::UnsupportedSource(_))));
    }

    #[test]
    fn test_batch_keeps_order_and_passes_failures_through() {
        let good_a = png_data_url(30, 30);
        let bad = "data:image/png;base64,AAAA".to_string();
        let good_b = png_data_url(10, 5);
        let urls = vec![good_a.clone(), bad.clone(), good_b.clone()];

        let out = block_on(compress_batch(&urls, CompressOptions::default()));

        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, vec![&good_a, &bad, &good_b]);

        let failed = &out[&bad];
        assert!(failed.is_passthrough());
        assert_eq!(failed.data_url, bad);
        assert_eq!((failed.width, failed.height, failed.size_bytes), (0, 0, 0));

        assert_eq!((out[&good_b].width, out[&good_b].height), (10, 5));
    }

    #[test]
    fn test_upload_size_check() {
        let files = vec![
            UploadFile::new("small.jpg", 1_000),
            UploadFile::new("exact.jpg", 2_000),
            UploadFile::new("huge.jpg", 2_001),
        ];
        let check = check_upload_sizes(&files, 2_000);
        assert_eq!(check.accepted.len(), 2);
        assert_eq!(check.rejected, vec![UploadFile::new("huge.jpg", 2_001)]);
        assert!(!check.all_accepted());
    }

    #[test]
    fn test_upload_file_from_source() {
        let source = ImageSource::File {
            name: "a.png".into(),
            bytes: vec![0; 12],
        };
        assert_eq!(UploadFile::from(&source), UploadFile::new("a.png", 12));
    }
}
