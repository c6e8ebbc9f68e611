//! Media reference normalization.
//!
//! Product and category images arrive as absolute URLs, relative paths, or
//! inline `data:` URIs. The store keeps only canonical references and turns
//! them back into public URLs on the way out; image bytes are never stored
//! here.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha256};
use url::Url;

use crate::config::StoreConfig;

/// Converts image references to a canonical stored form and back.
///
/// Implementations are called while the store holds its lock, so they must
/// be pure and non-blocking (no network or disk I/O).
pub trait MediaNormalizer: Send + Sync {
    /// Canonicalize a reference. Unrecognized input is returned unchanged.
    ///
    /// Must be idempotent: `normalize(normalize(x)) == normalize(x)`.
    fn normalize(&self, reference: &str) -> String;

    /// Resolve a canonical reference to an absolute public URL.
    fn to_public_url(&self, reference: &str) -> String;
}

/// Default normalizer that maps uploads under one base URL to relative paths.
#[derive(Debug, Clone)]
pub struct UrlMediaNormalizer {
    base: Url,
    upload_prefix: String,
}

impl UrlMediaNormalizer {
    /// Create a normalizer rooted at `base`.
    ///
    /// `upload_prefix` is the first path segment of canonical references
    /// (e.g. `uploads` for `uploads/photo.png`).
    #[must_use]
    pub fn new(mut base: Url, upload_prefix: &str) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            base,
            upload_prefix: upload_prefix.trim_matches('/').to_string(),
        }
    }

    /// Create a normalizer from store configuration.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.media_base_url.clone(), &config.upload_prefix)
    }

    fn is_canonical(&self, path: &str) -> bool {
        path.strip_prefix(self.upload_prefix.as_str())
            .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
    }

    /// Map an absolute URL on our own media host back to its relative form.
    fn normalize_absolute(&self, url: &Url) -> Option<String> {
        if url.origin() != self.base.origin() || url.query().is_some() || url.fragment().is_some()
        {
            return None;
        }
        let relative = url.path().strip_prefix(self.base.path())?;
        self.is_canonical(relative).then(|| relative.to_string())
    }

    /// Content-address an inline `data:<mime>;base64,<payload>` reference.
    fn normalize_inline(&self, data: &str) -> Option<String> {
        let (meta, payload) = data.split_once(',')?;
        let mime = meta.strip_suffix(";base64")?;
        let bytes = BASE64.decode(payload.trim()).ok()?;
        if bytes.is_empty() {
            return None;
        }

        let digest = hex::encode(Sha256::digest(&bytes));
        let key = digest.get(..16).unwrap_or(&digest);
        let name = format!("{}/{key}.{}", self.upload_prefix, extension_for(mime));
        tracing::debug!(mime, bytes = bytes.len(), reference = %name, "Normalized inline media");
        Some(name)
    }

    fn normalize_relative(&self, reference: &str) -> String {
        let mut path = reference;
        loop {
            if let Some(rest) = path.strip_prefix("./") {
                path = rest;
            } else if let Some(rest) = path.strip_prefix('/') {
                path = rest;
            } else {
                break;
            }
        }
        if self.is_canonical(path) {
            path.to_string()
        } else {
            format!("{}/{path}", self.upload_prefix)
        }
    }
}

impl MediaNormalizer for UrlMediaNormalizer {
    fn normalize(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.is_empty() {
            return String::new();
        }

        if let Some(data) = reference.strip_prefix("data:") {
            return self
                .normalize_inline(data)
                .unwrap_or_else(|| reference.to_string());
        }

        match Url::parse(reference) {
            Ok(url) => self
                .normalize_absolute(&url)
                .unwrap_or_else(|| reference.to_string()),
            Err(_) => self.normalize_relative(reference),
        }
    }

    fn to_public_url(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.is_empty() || Url::parse(reference).is_ok() {
            return reference.to_string();
        }
        self.base
            .join(reference.trim_start_matches('/'))
            .map_or_else(|_| reference.to_string(), String::from)
    }
}

/// File extension for an image MIME type.
fn extension_for(mime: &str) -> &'static str {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "bin",
    }
}
