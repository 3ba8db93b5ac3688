#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod alias;
pub mod bundle;
pub mod manifest;

pub use alias::AliasResolver;
pub use bundle::{AssetError, BundleConfig, WebpackAssetBundle};
pub use manifest::{AssetType, ManifestError, ResolvedAssets, UnknownAssetType};
