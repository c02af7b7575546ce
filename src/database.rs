//! Persisted seed → advance-count table.
//!
//! On disk a table is a bincode payload followed by its SHA-256 digest:
//!
//! ```text
//! magic "TIDB" | version u16 | target IdPair | timeout u32 | entries Vec<(u32, u32)> | sha256
//! ```
//!
//! Entries are written sorted by seed so identical tables produce identical
//! files. Loading verifies every layer before handing out a table.

use crate::{IdPair, TidSearchError};
use bincode::Options;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::hash_map::{Entry, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// File magic for table files.
pub const TABLE_MAGIC: [u8; 4] = *b"TIDB";
/// Current table format version.
pub const TABLE_VERSION: u16 = 1;
/// Extension used for generated table files.
pub const TABLE_EXTENSION: &str = "dat";

const DIGEST_LEN: usize = 32;

#[derive(Serialize, Deserialize)]
struct TableFile {
    magic: [u8; 4],
    version: u16,
    target: IdPair,
    timeout: u32,
    entries: Vec<(u32, u32)>,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Seeds that reached the target pair, keyed by seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedDatabase {
    target: IdPair,
    timeout: u32,
    entries: HashMap<u32, u32>,
}

impl SeedDatabase {
    pub fn new(target: IdPair, timeout: u32) -> Self {
        Self {
            target,
            timeout,
            entries: HashMap::new(),
        }
    }

    /// Build a table from `(seed, advance)` pairs. Later duplicates win.
    pub fn from_entries<I>(target: IdPair, timeout: u32, entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        Self {
            target,
            timeout,
            entries: entries.into_iter().collect(),
        }
    }

    pub fn target(&self) -> IdPair {
        self.target
    }

    pub fn timeout(&self) -> u32 {
        self.timeout
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, seed: u32) -> Option<u32> {
        self.entries.get(&seed).copied()
    }

    pub fn insert(&mut self, seed: u32, advance: u32) {
        self.entries.insert(seed, advance);
    }

    /// Unordered iteration over `(seed, advance)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.entries.iter().map(|(&s, &a)| (s, a))
    }

    /// Entries sorted by seed.
    pub fn sorted_entries(&self) -> Vec<(u32, u32)> {
        let mut out: Vec<(u32, u32)> = self.iter().collect();
        out.sort_unstable();
        out
    }

    /// Smallest and largest recorded advance, if any.
    pub fn advance_bounds(&self) -> Option<(u32, u32)> {
        let min = self.entries.values().min()?;
        let max = self.entries.values().max()?;
        Some((*min, *max))
    }

    /// Absorb another table's entries. Used to join per-worker tables.
    pub fn merge(&mut self, other: SeedDatabase) {
        if self.entries.len() < other.entries.len() {
            let mine = std::mem::replace(&mut self.entries, other.entries);
            self.entries.extend(mine);
        } else {
            self.entries.extend(other.entries);
        }
    }

    /// Canonical file name for a table built for `target`.
    pub fn file_name(target: IdPair) -> String {
        format!("{}-{}.{}", target.low, target.high, TABLE_EXTENSION)
    }

    /// Path of this table's canonical file inside `dir`.
    pub fn default_path<P: AsRef<Path>>(&self, dir: P) -> PathBuf {
        dir.as_ref().join(Self::file_name(self.target))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TidSearchError> {
        let file = TableFile {
            magic: TABLE_MAGIC,
            version: TABLE_VERSION,
            target: self.target,
            timeout: self.timeout,
            entries: self.sorted_entries(),
        };
        let mut out = codec().serialize(&file)?;
        let digest = Sha256::digest(&out);
        out.extend_from_slice(&digest);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TidSearchError> {
        if bytes.len() < DIGEST_LEN {
            return Err(TidSearchError::Format("file too short".into()));
        }
        let (payload, digest) = bytes.split_at(bytes.len() - DIGEST_LEN);
        if payload.len() < TABLE_MAGIC.len() || payload[..TABLE_MAGIC.len()] != TABLE_MAGIC {
            return Err(TidSearchError::Format("bad magic".into()));
        }
        if Sha256::digest(payload).as_slice() != digest {
            return Err(TidSearchError::Checksum);
        }
        let file: TableFile = codec().deserialize(payload)?;
        if file.version != TABLE_VERSION {
            return Err(TidSearchError::Format(format!(
                "unsupported version {}",
                file.version
            )));
        }

        let mut entries = HashMap::with_capacity(file.entries.len());
        for (seed, advance) in file.entries {
            match entries.entry(seed) {
                Entry::Occupied(_) => {
                    return Err(TidSearchError::Format(format!(
                        "duplicate seed {seed:08X}"
                    )))
                }
                Entry::Vacant(v) => {
                    v.insert(advance);
                }
            }
        }
        Ok(Self {
            target: file.target,
            timeout: file.timeout,
            entries,
        })
    }

    /// Serialize this table to disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TidSearchError> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), bytes)?;
        tracing::info!(path = %path.as_ref().display(), entries = self.len(), "table saved");
        Ok(())
    }

    /// Load and fully validate a table from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TidSearchError> {
        let bytes = fs::read(path.as_ref())?;
        let db = Self::from_bytes(&bytes)?;
        tracing::info!(path = %path.as_ref().display(), entries = db.len(), "table loaded");
        Ok(db)
    }

    /// Write `seed,advance` rows sorted by seed.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TidSearchError> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        writer.write_record(["seed", "advance"])?;
        for (seed, advance) in self.sorted_entries() {
            writer.write_record([format!("{seed:08X}"), advance.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}
