//! A bounded LRU of region files, keyed by file name.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::BiomeError;
use crate::region::{BiomeRegion, region_file_name};

/// Lookup statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionCacheStats {
    pub lookups: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl RegionCacheStats {
    /// Hit rate in `0.0..=1.0`.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

type Entry = (String, Option<Arc<BiomeRegion>>);

/// Keeps the most recently used region files in memory.
///
/// A missing file is remembered as "no data" so it is not looked up again while
/// it stays cached.
#[derive(Debug)]
pub struct BiomeRegionCache {
    dir: PathBuf,
    capacity: usize,
    // Least recently used first.
    entries: VecDeque<Entry>,
    stats: RegionCacheStats,
}

impl BiomeRegionCache {
    /// Creates a cache reading from `dir`; a capacity of zero is raised to one.
    pub fn new(dir: impl Into<PathBuf>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            dir: dir.into(),
            capacity,
            entries: VecDeque::with_capacity(capacity),
            stats: RegionCacheStats::default(),
        }
    }

    /// Region data for chunk `(chunk_x, chunk_z)`, or `None` if the world has
    /// no biome file for it.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or has the wrong size.
    /// Failed loads are not cached.
    pub fn get(
        &mut self,
        chunk_x: i32,
        chunk_z: i32,
    ) -> Result<Option<Arc<BiomeRegion>>, BiomeError> {
        let name = region_file_name(chunk_x, chunk_z);
        self.stats.lookups += 1;

        if let Some(pos) = self.entries.iter().position(|(n, _)| *n == name) {
            self.stats.hits += 1;
            if let Some(entry) = self.entries.remove(pos) {
                let data = entry.1.clone();
                self.entries.push_back(entry);
                trace!(%name, "biome region hit");
                return Ok(data);
            }
        }

        self.stats.misses += 1;
        let data = load(&self.dir, &name)?.map(Arc::new);
        debug!(%name, present = data.is_some(), "loaded biome region");

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
            self.stats.evictions += 1;
        }
        self.entries.push_back((name, data.clone()));
        Ok(data)
    }

    pub fn stats(&self) -> &RegionCacheStats {
        &self.stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn load(dir: &Path, name: &str) -> Result<Option<BiomeRegion>, BiomeError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Ok(None);
    }
    BiomeRegion::read(&path).map(Some)
}
