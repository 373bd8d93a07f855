//! Vite build-manifest resolution for front-end assets.
//!
//! The front-end build writes `manifest.json`, mapping source entries such as
//! `src/main.js` to content-hashed output files. [`AssetResolver`] loads it
//! once and answers "which URLs does this entry need?".
//!
//! Three modes:
//!
//! - **dev**: `DEBUG` is on, every asset is served by the Vite dev server.
//! - **manifest**: the manifest loaded and contains the entry.
//! - **fallback**: the manifest is missing, malformed, or lacks the entry;
//!   un-hashed paths under the static URL are used plus the default stylesheet.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Stylesheet used when the manifest cannot tell us the real one.
pub const DEFAULT_STYLESHEET: &str = "css/main.css";

/// Script injected in dev mode for hot module replacement.
pub const VITE_CLIENT: &str = "@vite/client";

/// Inline stylesheet used when the critical-CSS file is missing.
pub const FALLBACK_CRITICAL_CSS: &str = "\
body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif;\
background:#0d0d0d;color:#f5f5f5;line-height:1.5}\
a{color:#e63946}\
img{max-width:100%;height:auto}\
.hero{min-height:60vh;display:flex;align-items:center;justify-content:center}";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Asset resolution settings.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Location of Vite's `manifest.json`.
    pub manifest_path: PathBuf,
    /// Public URL prefix for built files, always ending in `/`.
    pub static_url: String,
    /// Vite dev server origin used in dev mode.
    pub dev_server_url: String,
    /// Pre-extracted above-the-fold CSS.
    pub critical_css_path: PathBuf,
    /// Serve assets from the dev server instead of the manifest.
    pub debug: bool,
}

impl AssetConfig {
    /// Load from environment variables.
    ///
    /// | Env Var               | Default                        |
    /// |-----------------------|--------------------------------|
    /// | `VITE_MANIFEST_PATH`  | `static/dist/manifest.json`    |
    /// | `STATIC_URL`          | `/static/`                     |
    /// | `VITE_DEV_SERVER_URL` | `http://localhost:5173`        |
    /// | `CRITICAL_CSS_PATH`   | `static/dist/critical.css`     |
    /// | `DEBUG`               | `false`                        |
    pub fn from_env() -> Self {
        let static_url = std::env::var("STATIC_URL").unwrap_or_else(|_| "/static/".into());
        Self {
            manifest_path: std::env::var("VITE_MANIFEST_PATH")
                .unwrap_or_else(|_| "static/dist/manifest.json".into())
                .into(),
            static_url: normalize_prefix(&static_url),
            dev_server_url: std::env::var("VITE_DEV_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into())
                .trim_end_matches('/')
                .to_string(),
            critical_css_path: std::env::var("CRITICAL_CSS_PATH")
                .unwrap_or_else(|_| "static/dist/critical.css".into())
                .into(),
            debug: parse_bool_env("DEBUG"),
        }
    }
}

/// Interpret `1/true/yes/on` (any case) as `true`.
pub fn parse_bool_env(var: &str) -> bool {
    std::env::var(var)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// One chunk in Vite's manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestChunk {
    pub file: String,
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default, rename = "isEntry")]
    pub is_entry: bool,
}

pub type Manifest = BTreeMap<String, ManifestChunk>;

/// Read and parse a manifest file.
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// URLs a page needs for one entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryAssets {
    pub scripts: Vec<String>,
    pub styles: Vec<String>,
    /// Set in dev mode: the Vite HMR client script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_client: Option<String>,
}

/// Resolves logical asset names to served URLs.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    config: AssetConfig,
    manifest: Option<Manifest>,
}

impl AssetResolver {
    /// Load the manifest described by `config`.
    ///
    /// In dev mode the manifest is not read. A missing or malformed manifest
    /// is logged and the resolver falls back to un-hashed paths.
    pub fn load(config: AssetConfig) -> Self {
        if config.debug {
            tracing::debug!(dev_server = %config.dev_server_url, "Assets served by Vite dev server");
            return Self { config, manifest: None };
        }

        let manifest = match read_manifest(&config.manifest_path) {
            Ok(manifest) => {
                tracing::info!(
                    path = %config.manifest_path.display(),
                    entries = manifest.len(),
                    "Loaded asset manifest"
                );
                Some(manifest)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Asset manifest unavailable, using fallback paths");
                None
            }
        };
        Self { config, manifest }
    }

    /// Build a resolver from an already-parsed manifest.
    pub fn with_manifest(config: AssetConfig, manifest: Option<Manifest>) -> Self {
        Self { config, manifest }
    }

    /// Whether a manifest is loaded (reported by the readiness probe).
    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }

    pub fn is_dev(&self) -> bool {
        self.config.debug
    }

    /// Resolve a single source asset to its URL.
    pub fn resolve(&self, name: &str) -> String {
        let name = name.trim_start_matches('/');
        if self.config.debug {
            return format!("{}/{name}", self.config.dev_server_url);
        }
        match self.manifest.as_ref().and_then(|m| m.get(name)) {
            Some(chunk) => self.static_url(&chunk.file),
            None => self.static_url(name),
        }
    }

    /// Scripts and stylesheets needed by an entry point.
    ///
    /// Styles include the CSS of every transitively imported chunk,
    /// deduplicated in first-seen order.
    pub fn entry_assets(&self, entry: &str) -> EntryAssets {
        let entry = entry.trim_start_matches('/');

        if self.config.debug {
            return EntryAssets {
                scripts: vec![self.resolve(entry)],
                styles: Vec::new(),
                dev_client: Some(format!("{}/{VITE_CLIENT}", self.config.dev_server_url)),
            };
        }

        let Some(manifest) = self.manifest.as_ref().filter(|m| m.contains_key(entry)) else {
            return EntryAssets {
                scripts: vec![self.static_url(entry)],
                styles: vec![self.static_url(DEFAULT_STYLESHEET)],
                dev_client: None,
            };
        };

        let mut styles = Vec::new();
        let mut seen_css = HashSet::new();
        let mut visited = HashSet::new();
        collect_css(manifest, entry, &mut visited, &mut seen_css, &mut styles);

        EntryAssets {
            scripts: vec![self.static_url(&manifest[entry].file)],
            styles: styles.iter().map(|css| self.static_url(css)).collect(),
            dev_client: None,
        }
    }

    /// Inline critical CSS, or the built-in fallback when the file is missing.
    pub fn critical_css(&self) -> String {
        match std::fs::read_to_string(&self.config.critical_css_path) {
            Ok(css) => css,
            Err(e) => {
                tracing::debug!(
                    path = %self.config.critical_css_path.display(),
                    error = %e,
                    "Critical CSS unavailable, using inline fallback"
                );
                FALLBACK_CRITICAL_CSS.to_string()
            }
        }
    }

    fn static_url(&self, file: &str) -> String {
        format!("{}{}", self.config.static_url, file.trim_start_matches('/'))
    }
}

fn collect_css(
    manifest: &Manifest,
    key: &str,
    visited: &mut HashSet<String>,
    seen_css: &mut HashSet<String>,
    out: &mut Vec<String>,
) {
    if !visited.insert(key.to_string()) {
        return;
    }
    let Some(chunk) = manifest.get(key) else {
        return;
    };
    for css in &chunk.css {
        if seen_css.insert(css.clone()) {
            out.push(css.clone());
        }
    }
    for import in &chunk.imports {
        collect_css(manifest, import, visited, seen_css, out);
    }
}
