//! Uid to user-name resolution from the system account listing.

use crate::collector::procfs::parser::lookup_user_name;
use crate::collector::traits::FileSystem;
use std::path::Path;
use tracing::debug;

/// Resolves numeric uids to user names via the colon-delimited account
/// listing (normally `/etc/passwd`).
///
/// Each lookup re-scans the source in a single pass; there is no cache, so
/// account changes are visible on the next call.
pub struct UserDirectory<F: FileSystem> {
    fs: F,
    passwd_path: String,
}

impl<F: FileSystem> UserDirectory<F> {
    pub fn new(fs: F, passwd_path: impl Into<String>) -> Self {
        Self {
            fs,
            passwd_path: passwd_path.into(),
        }
    }

    /// The user name whose account record carries `uid`; empty string when
    /// no record matches or the listing is unreadable.
    pub fn user_name(&self, uid: u32) -> String {
        let content = match self.fs.read_to_string(Path::new(&self.passwd_path)) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.passwd_path, error = %e, "account listing unreadable");
                return String::new();
            }
        };
        lookup_user_name(&content, uid).unwrap_or_default()
    }
}
