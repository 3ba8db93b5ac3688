//! Loading and classifying a webpack build manifest.
//!
//! The manifest is a single JSON object mapping chunk names (`app.js`,
//! `app.css`, `app.js.map`) to their built output files. [`resolve`] reads it
//! once and buckets the entries into ordered CSS and JavaScript lists keyed by
//! each chunk name's extension; every other chunk type is skipped without
//! complaint, since real manifests routinely carry source maps and assets this
//! crate has no business registering.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::alias::{self, AliasResolver};
use crate::bundle::BundleConfig;

/// The two asset classes a bundle exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
  /// Stylesheet chunks (`*.css`).
  Css,
  /// Script chunks (`*.js`).
  Js,
}

impl AssetType {
  /// Extension and accessor token for this asset class.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Css => "css",
      Self::Js => "js",
    }
  }

  /// Classify a chunk name extension. Comparison is case-sensitive; anything
  /// other than `css` or `js` is not an asset class.
  pub fn from_extension(extension: &str) -> Option<Self> {
    match extension {
      "css" => Some(Self::Css),
      "js" => Some(Self::Js),
      _ => None,
    }
  }
}

impl fmt::Display for AssetType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AssetType {
  type Err = UnknownAssetType;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    Self::from_extension(value).ok_or_else(|| UnknownAssetType(value.to_string()))
  }
}

/// Error produced when an accessor token is neither `css` nor `js`.
///
/// This indicates a caller programming error rather than a configuration
/// problem and is raised before any file I/O takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAssetType(
  /// The rejected token.
  pub String,
);

impl fmt::Display for UnknownAssetType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "invalid asset type: {} - must be either css or js",
      self.0
    )
  }
}

impl std::error::Error for UnknownAssetType {}

/// Ordered file lists produced by one manifest parse.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolvedAssets {
  /// CSS files in manifest iteration order.
  pub css: Vec<String>,
  /// JavaScript files in manifest iteration order.
  pub js: Vec<String>,
}

impl ResolvedAssets {
  /// Select the list for one asset class.
  pub fn of(&self, kind: AssetType) -> &[String] {
    match kind {
      AssetType::Css => &self.css,
      AssetType::Js => &self.js,
    }
  }

  /// Returns `true` when the manifest yielded no CSS and no JavaScript files.
  pub fn is_empty(&self) -> bool {
    self.css.is_empty() && self.js.is_empty()
  }
}

/// Errors that can occur while locating, reading, or decoding the manifest.
#[derive(Debug)]
pub enum ManifestError {
  /// No file exists at the resolved manifest path.
  NotFound {
    /// Resolved path that was checked.
    path: PathBuf,
  },
  /// The manifest existed but reading it failed.
  Io {
    /// Resolved path that was read.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The manifest contents are not a JSON object.
  Parse {
    /// Resolved path that was parsed.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// A manifest entry maps a chunk to something other than a string.
  Value {
    /// Resolved path that was parsed.
    path: PathBuf,
    /// Chunk name of the offending entry.
    chunk: String,
  },
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotFound { path } => {
        write!(f, "webpack manifest not found: {}", path.display())
      }
      Self::Io { path, source } => {
        write!(f, "failed to read webpack manifest {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse webpack manifest {}: {}", path.display(), source)
      }
      Self::Value { path, chunk } => {
        write!(
          f,
          "webpack manifest {}: chunk {chunk} does not map to a string",
          path.display()
        )
      }
    }
  }
}

impl std::error::Error for ManifestError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
      Self::NotFound { .. } | Self::Value { .. } => None,
    }
  }
}

/// Read the manifest named by the configuration and classify its entries.
///
/// An alias-prefixed `manifest` value is handed to the resolver first; a plain
/// path is used verbatim and the resolver is never invoked. The existence
/// check and the read are not atomic, so a manifest removed in between
/// surfaces as [`ManifestError::Io`] for the same path.
pub fn resolve(
  config: &BundleConfig,
  aliases: &dyn AliasResolver,
) -> Result<ResolvedAssets, ManifestError> {
  let path = if alias::is_alias(&config.manifest) {
    aliases.resolve_alias(&config.manifest)
  } else {
    PathBuf::from(&config.manifest)
  };

  if !path.exists() {
    return Err(ManifestError::NotFound { path });
  }

  let contents = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
    path: path.clone(),
    source,
  })?;
  let entries: Map<String, Value> =
    serde_json::from_str(&contents).map_err(|source| ManifestError::Parse {
      path: path.clone(),
      source,
    })?;

  classify(&path, &entries)
}

/// Bucket manifest entries by the extension after the last `.` of the chunk
/// name. A chunk name without a dot is compared whole, so it falls through to
/// neither list in any real manifest.
fn classify(path: &Path, entries: &Map<String, Value>) -> Result<ResolvedAssets, ManifestError> {
  let mut assets = ResolvedAssets::default();

  for (chunk, value) in entries {
    let file = value.as_str().ok_or_else(|| ManifestError::Value {
      path: path.to_path_buf(),
      chunk: chunk.clone(),
    })?;

    let extension = chunk.rsplit('.').next().unwrap_or(chunk.as_str());
    match AssetType::from_extension(extension) {
      Some(AssetType::Css) => assets.css.push(file.to_string()),
      Some(AssetType::Js) => assets.js.push(file.to_string()),
      None => {}
    }
  }

  Ok(assets)
}
