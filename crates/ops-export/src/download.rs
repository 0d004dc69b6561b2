//! Hand a generated document to the user: a Blob download in the browser, a
//! file on native targets.

use crate::ExportError;
use std::path::PathBuf;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const HTML_MIME: &str = "text/html;charset=utf-8";

/// Object URLs stay valid this long after the download click
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const REVOKE_DELAY_MS: i32 = 1_000;

/// Where an export ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// Browser download started under this name
    Browser { filename: String },
    /// Written to disk
    File(PathBuf),
}

/// `filename` with an `.html` extension; empty names become `report.html`
pub fn html_filename(filename: &str) -> String {
    let name = filename.trim();
    if name.is_empty() {
        return "report.html".to_string();
    }
    if name.to_ascii_lowercase().ends_with(".html") {
        name.to_string()
    } else {
        format!("{name}.html")
    }
}

/// Save `html` as `filename` (extension enforced)
pub fn download(html: &str, filename: &str) -> Result<DownloadTarget, ExportError> {
    let filename = html_filename(filename);
    let result = save(html, &filename);

    match &result {
        Ok(target) => tracing::debug!(?target, bytes = html.len(), "report exported"),
        Err(err) => tracing::error!(%err, %filename, "report export failed"),
    }
    result
}

#[cfg(target_arch = "wasm32")]
fn save(html: &str, filename: &str) -> Result<DownloadTarget, ExportError> {
    use wasm_bindgen::{JsCast, JsValue, closure::Closure};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let browser = |reason: &str| ExportError::Browser(reason.to_string());

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(html));

    let opts = BlobPropertyBag::new();
    opts.set_type(HTML_MIME);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| browser("failed to create blob"))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|_| browser("failed to create object URL"))?;

    let window = web_sys::window().ok_or_else(|| browser("window unavailable"))?;
    let document = window.document().ok_or_else(|| browser("document unavailable"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| browser("failed to create anchor"))?
        .dyn_into()
        .map_err(|_| browser("anchor cast failed"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document.body().ok_or_else(|| browser("missing body"))?;
    body.append_child(&anchor).map_err(|_| browser("failed to attach anchor"))?;
    anchor.click();
    anchor.remove();

    // the click's navigation still reads the URL after this returns
    let revoke = Closure::once_into_js(move || {
        Url::revoke_object_url(&url).ok();
    });
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS)
    {
        tracing::warn!(?err, filename, "object URL revoke not scheduled");
    }

    Ok(DownloadTarget::Browser {
        filename: filename.to_string(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn save(html: &str, filename: &str) -> Result<DownloadTarget, ExportError> {
    let dir = std::env::current_dir()?;
    download_to_dir(html, filename, &dir)
}

/// Write `html` into `dir` under `filename` (extension enforced)
#[cfg(not(target_arch = "wasm32"))]
pub fn download_to_dir(html: &str, filename: &str, dir: &std::path::Path) -> Result<DownloadTarget, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(html_filename(filename));
    std::fs::write(&path, html)?;
    Ok(DownloadTarget::File(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_extension_enforced() {
        assert_eq!(html_filename("ops-report"), "ops-report.html");
        assert_eq!(html_filename("ops-report.html"), "ops-report.html");
        assert_eq!(html_filename("Ops.HTML"), "Ops.HTML");
        assert_eq!(html_filename("data.csv"), "data.csv.html");
        assert_eq!(html_filename("  "), "report.html");
    }

    #[test]
    fn test_object_url_revoke_is_deferred() {
        assert_eq!(REVOKE_DELAY_MS, 1_000);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_download_writes_file() {
        let dir = std::env::temp_dir().join(format!("ops-export-test-{}", std::process::id()));
        let target = download_to_dir("<html></html>", "weekly", &dir).unwrap();

        let DownloadTarget::File(path) = target else {
            panic!("expected a file target");
        };
        assert_eq!(path, dir.join("weekly.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");

        std::fs::remove_dir_all(&dir).ok();
    }
}
