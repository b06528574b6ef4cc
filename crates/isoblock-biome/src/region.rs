//! Region files: 512×512 big-endian `u16` biome indices.

use std::path::Path;

use crate::BiomeError;

/// Blocks along each side of a region.
pub const REGION_SIZE: usize = 512;

/// Exact size of a region file in bytes.
pub const REGION_BYTES: usize = REGION_SIZE * REGION_SIZE * 2;

/// Chunks along each side of a region.
const CHUNKS_PER_REGION: i32 = 32;

/// Name of the region file holding chunk `(chunk_x, chunk_z)`.
pub fn region_file_name(chunk_x: i32, chunk_z: i32) -> String {
    format!(
        "b.{}.{}.biome",
        chunk_x.div_euclid(CHUNKS_PER_REGION),
        chunk_z.div_euclid(CHUNKS_PER_REGION)
    )
}

/// Biome indices for one region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeRegion {
    values: Vec<u16>,
}

impl BiomeRegion {
    /// Parses raw file contents; `name` is only used in errors.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, BiomeError> {
        if bytes.len() != REGION_BYTES {
            return Err(BiomeError::InvalidRegion {
                name: name.to_string(),
                len: bytes.len(),
            });
        }
        let values = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self { values })
    }

    pub fn read(path: &Path) -> Result<Self, BiomeError> {
        let bytes = std::fs::read(path).map_err(|source| BiomeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(&name, &bytes)
    }

    /// The biome index at region-local block `(x, z)`.
    pub fn value(&self, x: usize, z: usize) -> Option<u16> {
        if x >= REGION_SIZE || z >= REGION_SIZE {
            return None;
        }
        self.values.get(z * REGION_SIZE + x).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_file_name_floors_negative_chunks() {
        assert_eq!(region_file_name(0, 0), "b.0.0.biome");
        assert_eq!(region_file_name(31, 32), "b.0.1.biome");
        assert_eq!(region_file_name(-1, -32), "b.-1.-1.biome");
        assert_eq!(region_file_name(-33, 65), "b.-2.2.biome");
    }

    #[test]
    fn test_values_are_big_endian_row_major() {
        let mut bytes = vec![0u8; REGION_BYTES];
        // (x = 3, z = 2)
        let offset = (2 * REGION_SIZE + 3) * 2;
        bytes[offset] = 0x01;
        bytes[offset + 1] = 0x02;

        let region = BiomeRegion::from_bytes("b.0.0.biome", &bytes).unwrap();
        assert_eq!(region.value(3, 2), Some(0x0102));
        assert_eq!(region.value(2, 3), Some(0));
        assert_eq!(region.value(512, 0), None);
    }

    #[test]
    fn test_wrong_size_is_rejected() {
        let result = BiomeRegion::from_bytes("b.0.0.biome", &[0u8; 10]);
        assert!(matches!(result, Err(BiomeError::InvalidRegion { len: 10, .. })));
    }
}
