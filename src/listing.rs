//! Prefix listing of adapter keys
//!
//! Listing is computed entirely on the client side from the adapter's raw
//! key list and its directory predicate, so it works with any adapter.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Keys under a prefix, split into files and directories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct ListedKeys {
    /// Keys that are not directories
    pub keys: Vec<String>,
    /// Keys the adapter reports as directories
    pub dirs: Vec<String>,
}

impl ListedKeys {
    /// Total number of listed entries
    pub fn len(&self) -> usize {
        self.keys.len() + self.dirs.len()
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.dirs.is_empty()
    }
}

/// Keep the keys starting with `prefix` and split them with `is_directory`.
///
/// Matching is case-sensitive and an empty prefix matches everything.
/// Relative order from `keys` is kept inside each group. The predicate is
/// only consulted for keys that matched, and its first error aborts the
/// listing.
pub fn partition_keys<I, F, E>(keys: I, prefix: &str, mut is_directory: F) -> Result<ListedKeys, E>
where
    I: IntoIterator<Item = String>,
    F: FnMut(&str) -> Result<bool, E>,
{
    let mut listed = ListedKeys::default();

    for key in keys.into_iter().filter(|key| key.starts_with(prefix)) {
        if is_directory(&key)? {
            listed.dirs.push(key);
        } else {
            listed.keys.push(key);
        }
    }

    Ok(listed)
}
