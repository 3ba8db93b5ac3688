//! Alias detection and the injected alias-resolution seam.
//!
//! Configuration strings beginning with [`ALIAS`] are opaque tokens owned by the
//! hosting framework's alias service. This crate only detects the prefix and
//! hands the literal token to an [`AliasResolver`]; it never parses alias
//! syntax itself.

use std::path::PathBuf;

/// Character marking a configuration string as an alias.
pub const ALIAS: char = '@';

/// Returns `true` when the value uses the alias convention.
pub fn is_alias(value: &str) -> bool {
  value.starts_with(ALIAS)
}

/// Maps an alias token to a concrete filesystem path.
///
/// Implementations belong to the caller. An unknown alias should map to an
/// unusable path; the manifest loader then reports that path through its
/// existence check rather than wrapping a resolver failure.
pub trait AliasResolver {
  /// Resolve the full alias token (including the leading `@`) into a path.
  fn resolve_alias(&self, alias: &str) -> PathBuf;
}

impl<F> AliasResolver for F
where
  F: Fn(&str) -> PathBuf,
{
  fn resolve_alias(&self, alias: &str) -> PathBuf {
    self(alias)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_alias_prefix() {
    assert!(is_alias("@public/manifest.json"));
    assert!(!is_alias("/var/www/manifest.json"));
    assert!(!is_alias(""));
  }

  #[test]
  fn alias_must_be_leading() {
    assert!(!is_alias("manifest@public.json"));
  }

  #[test]
  fn closures_act_as_resolvers() {
    let resolver = |alias: &str| PathBuf::from("/srv").join(alias.trim_start_matches('@'));

    assert_eq!(
      resolver.resolve_alias("@public/manifest.json"),
      PathBuf::from("/srv/public/manifest.json")
    );
  }
}
