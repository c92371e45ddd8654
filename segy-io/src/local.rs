//! A local-disk [`RangeSource`] reference implementation, built on
//! `memmap2` in the teacher's own idiom (`giga-segy-in::memory_map`), with
//! the per-range fan-out handed to `rayon` and the blocking memory-map
//! access bridged into async with `tokio::task::spawn_blocking`.
//!
//! `url` arguments are accepted (and ignored) to satisfy [`RangeSource`]'s
//! signature: a [`LocalFileSource`] is already bound to one file, opened up
//! front via [`LocalFileSource::open`], mirroring `MappedSegY::new`.
use crate::transport::RangeSource;
use memmap2::{Mmap, MmapOptions};
use rayon::prelude::*;
use segy_core::SegyError;
use std::fs::File;
use std::sync::Arc;

/// A memory-mapped local file, shareable across the `tokio` blocking pool.
pub struct LocalFileSource {
    map: Arc<Mmap>,
    _file: File,
}

impl LocalFileSource {
    /// Map `path` into memory. Mirrors `giga_segy_in::memory_map::map_file_to_memory`.
    pub fn open(path: &str) -> Result<Self, SegyError> {
        let file = File::open(path)?;
        let map = unsafe { MmapOptions::new().map(&file)? };
        Ok(LocalFileSource {
            map: Arc::new(map),
            _file: file,
        })
    }

    pub fn len(&self) -> u64 {
        self.map.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl RangeSource for LocalFileSource {
    async fn size(&self, _url: &str) -> Result<u64, SegyError> {
        Ok(self.len())
    }

    async fn range_fetch(
        &self,
        _url: &str,
        ranges: &[(u64, u64)],
    ) -> Result<Vec<Vec<u8>>, SegyError> {
        let map = Arc::clone(&self.map);
        let ranges = ranges.to_vec();
        tokio::task::spawn_blocking(move || {
            ranges
                .into_par_iter()
                .map(|(start, end)| {
                    let (start, end) = (start as usize, end as usize);
                    if end > map.len() {
                        return Err(SegyError::TruncatedBuffer {
                            expected: end - start,
                            actual: map.len().saturating_sub(start),
                        });
                    }
                    Ok(map[start..end].to_vec())
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|e| SegyError::TransportError {
            message: e.to_string(),
            retriable: false,
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "segy-io-test-{}-{}.bin",
            std::process::id(),
            bytes.len()
        ));
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn size_matches_the_mapped_file() {
        let path = write_temp(&[1, 2, 3, 4, 5]);
        let source = LocalFileSource::open(path.to_str().unwrap()).unwrap();
        assert_eq!(source.size("ignored").await.unwrap(), 5);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn range_fetch_returns_requested_order() {
        let path = write_temp(b"abcdefghij");
        let source = LocalFileSource::open(path.to_str().unwrap()).unwrap();
        let bufs = source
            .range_fetch("ignored", &[(5, 10), (0, 5)])
            .await
            .unwrap();
        assert_eq!(bufs[0], b"fghij");
        assert_eq!(bufs[1], b"abcde");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn out_of_range_fetch_is_truncated_buffer() {
        let path = write_temp(b"abc");
        let source = LocalFileSource::open(path.to_str().unwrap()).unwrap();
        let err = source.range_fetch("ignored", &[(0, 100)]).await.unwrap_err();
        assert!(matches!(err, SegyError::TruncatedBuffer { .. }));
        let _ = std::fs::remove_file(path);
    }
}
