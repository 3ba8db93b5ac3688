//! The caller-facing asset bundle: configuration plus lazily resolved lists.

use std::fmt;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::alias::AliasResolver;
use crate::manifest::{self, AssetType, ManifestError, ResolvedAssets, UnknownAssetType};

/// Default manifest location, an alias resolved by the hosting framework.
pub const DEFAULT_MANIFEST: &str = "@public/manifest.json";

/// Caller-supplied bundle configuration.
///
/// Fields mirror what an asset-bundle framework needs to register the files
/// this crate extracts: only `manifest` is interpreted here, the rest are
/// passed through to the publishing and registration steps of the consumer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleConfig {
  /// Web-accessible directory containing the bundle's asset files. May be
  /// overwritten by an external publishing step when `source_path` is set.
  pub base_path: Option<String>,
  /// Base URL prefixed to the listed files, with the same overwrite caveat.
  pub base_url: Option<String>,
  /// Options handed to the consumer when registering CSS files.
  pub css_options: Map<String, Value>,
  /// Options handed to the consumer when registering JavaScript files.
  pub js_options: Map<String, Value>,
  /// Identifiers of bundles this one depends on, in order. Opaque here.
  pub depends: Vec<String>,
  /// Manifest file location: either a plain path or a `@`-prefixed alias.
  pub manifest: String,
  /// Directory holding the source asset files for an external publishing
  /// step. Not interpreted by this crate.
  pub source_path: Option<String>,
  /// Options for the external publishing step. Not interpreted by this crate.
  pub publish_options: Map<String, Value>,
}

impl Default for BundleConfig {
  fn default() -> Self {
    Self {
      base_path: None,
      base_url: None,
      css_options: Map::new(),
      js_options: Map::new(),
      depends: Vec::new(),
      manifest: DEFAULT_MANIFEST.to_string(),
      source_path: None,
      publish_options: Map::new(),
    }
  }
}

/// Errors surfaced by the generic [`WebpackAssetBundle::assets`] accessor.
#[derive(Debug)]
pub enum AssetError {
  /// The requested asset type token is neither `css` nor `js`.
  UnknownType(UnknownAssetType),
  /// Resolving the manifest failed.
  Manifest(ManifestError),
}

impl fmt::Display for AssetError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnknownType(err) => err.fmt(f),
      Self::Manifest(err) => err.fmt(f),
    }
  }
}

impl std::error::Error for AssetError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::UnknownType(err) => Some(err),
      Self::Manifest(err) => Some(err),
    }
  }
}

impl From<UnknownAssetType> for AssetError {
  fn from(err: UnknownAssetType) -> Self {
    Self::UnknownType(err)
  }
}

impl From<ManifestError> for AssetError {
  fn from(err: ManifestError) -> Self {
    Self::Manifest(err)
  }
}

/// An asset bundle backed by a webpack manifest.
///
/// The manifest is parsed at most once per bundle instance, on the first
/// access to either list; both lists are populated together by that single
/// parse and cached for the lifetime of the bundle, including when both turn
/// out empty. Concurrent first accesses are serialised so only one read and
/// classification pass runs.
pub struct WebpackAssetBundle {
  /// Bundle configuration. Adjust before the first asset access; once the
  /// lists are resolved, configuration changes have no further effect.
  pub config: BundleConfig,
  aliases: Box<dyn AliasResolver + Send + Sync>,
  assets: OnceCell<ResolvedAssets>,
}

impl WebpackAssetBundle {
  /// Create a bundle with the default configuration and the given alias
  /// resolver.
  pub fn new<R>(aliases: R) -> Self
  where
    R: AliasResolver + Send + Sync + 'static,
  {
    Self::with_config(BundleConfig::default(), aliases)
  }

  /// Create a bundle from an explicit configuration.
  pub fn with_config<R>(config: BundleConfig, aliases: R) -> Self
  where
    R: AliasResolver + Send + Sync + 'static,
  {
    Self {
      config,
      aliases: Box::new(aliases),
      assets: OnceCell::new(),
    }
  }

  /// CSS files listed in the manifest, resolving it on first access.
  pub fn css(&self) -> Result<&[String], ManifestError> {
    Ok(&self.resolved()?.css)
  }

  /// JavaScript files listed in the manifest, resolving it on first access.
  pub fn js(&self) -> Result<&[String], ManifestError> {
    Ok(&self.resolved()?.js)
  }

  /// The list for one asset class.
  pub fn assets_of(&self, kind: AssetType) -> Result<&[String], ManifestError> {
    Ok(self.resolved()?.of(kind))
  }

  /// The list for an asset type given by token.
  ///
  /// A token other than `css` or `js` fails before any file I/O takes place.
  pub fn assets(&self, kind: &str) -> Result<&[String], AssetError> {
    let kind: AssetType = kind.parse()?;
    Ok(self.assets_of(kind)?)
  }

  /// One-shot `unresolved -> resolved` transition. A failed resolve is not
  /// cached; the error is returned to whichever access triggered it.
  fn resolved(&self) -> Result<&ResolvedAssets, ManifestError> {
    self
      .assets
      .get_or_try_init(|| manifest::resolve(&self.config, &*self.aliases))
  }
}

impl fmt::Debug for WebpackAssetBundle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WebpackAssetBundle")
      .field("config", &self.config)
      .field("assets", &self.assets.get())
      .finish_non_exhaustive()
  }
}
