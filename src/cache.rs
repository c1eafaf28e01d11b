//! Build manifest for incremental output.
//!
//! Every build renders every page; rendering is cheap. Writing is what
//! touches the disk and invalidates downstream caches (CDN uploads, rsync),
//! so a file is only written when its contents changed since the last build.
//!
//! # Design
//!
//! The manifest maps each output file's relative path to the SHA-256 of the
//! contents last written there. A write is skipped when:
//! 1. the manifest has an entry for the path with the same hash, and
//! 2. the file is still on disk.
//!
//! Hashes are content-based rather than mtime-based so they survive
//! `git checkout` and CI cache restores.
//!
//! The manifest is also the record of what the previous build produced:
//! paths in the old manifest that the new build no longer emits are stale
//! (a comparison was removed, an industry renamed) and get deleted.
//!
//! ## Storage
//!
//! JSON at `<output_dir>/.build-manifest.json`, next to the pages it
//! describes so it travels with the output directory.
//!
//! ## Bypassing the cache
//!
//! `build --no-cache` ignores stored hashes and rewrites every file. Stale
//! pruning still uses the old manifest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".build-manifest.json";

/// Bump to invalidate every existing manifest.
const MANIFEST_VERSION: u32 = 1;

/// On-disk record of the files a build wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub version: u32,
    /// Content revision the build ran from.
    #[serde(default)]
    pub revision: String,
    /// Relative output path → SHA-256 hex of its contents.
    pub files: BTreeMap<String, String>,
}

impl BuildManifest {
    /// Empty manifest (first build, or a corrupt previous one).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            revision: String::new(),
            files: BTreeMap::new(),
        }
    }

    pub fn with_revision(mut self, revision: &str) -> Self {
        self.revision = revision.to_string();
        self
    }

    /// Load from the output directory. Missing, unreadable and
    /// wrong-version manifests all load as empty.
    pub fn load(output_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(manifest_path(output_dir)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable build manifest");
                return Self::empty();
            }
        };
        if manifest.version != MANIFEST_VERSION {
            tracing::debug!(found = manifest.version, "build manifest version changed");
            return Self::empty();
        }
        manifest
    }

    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)
    }

    /// Whether `path` already holds contents hashing to `hash`.
    pub fn is_fresh(&self, path: &str, hash: &str, output_dir: &Path) -> bool {
        self.files.get(path).is_some_and(|h| h == hash) && output_dir.join(path).exists()
    }

    pub fn insert(&mut self, path: String, hash: String) {
        self.files.insert(path, hash);
    }

    /// Paths recorded here that `next` no longer produces, in path order.
    pub fn stale_paths<'a>(&'a self, next: &BuildManifest) -> Vec<&'a str> {
        self.files
            .keys()
            .filter(|p| !next.files.contains_key(*p))
            .map(String::as_str)
            .collect()
    }
}

/// SHA-256 of `bytes` as lowercase hex.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}

/// File-level outcome counts for one build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub written: u32,
    pub unchanged: u32,
    pub removed: u32,
}

impl CacheStats {
    pub fn write(&mut self) {
        self.written += 1;
    }

    pub fn skip(&mut self) {
        self.unchanged += 1;
    }

    pub fn remove(&mut self) {
        self.removed += 1;
    }

    pub fn total(&self) -> u32 {
        self.written + self.unchanged
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} written, {} unchanged ({} total)",
                self.written,
                self.unchanged,
                self.total()
            )?;
        } else {
            write!(f, "{} written", self.written)?;
        }
        if self.removed > 0 {
            write!(f, ", {} removed", self.removed)?;
        }
        Ok(())
    }
}
