use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::file_source::LineSource;

pub struct MappedFile {
    // Zero-length files are never mapped.
    mmap: Option<Mmap>,
    line_offsets: Vec<usize>,
    display_name: String,
}

impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display_name = path.display().to_string();

        let not_found = |source: io::Error| ScanError::ResourceNotFound {
            path: display_name.clone(),
            source,
        };

        let file = File::open(path).map_err(not_found)?;
        let metadata = file.metadata().map_err(not_found)?;
        if metadata.is_dir() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::Other,
                "is a directory",
            )));
        }

        let mmap = if metadata.len() == 0 {
            None
        } else {
            // Safety: the map is read-only and lives no longer than this scan.
            Some(unsafe { Mmap::map(&file) }.map_err(not_found)?)
        };

        let mut loader = Self {
            mmap,
            line_offsets: Vec::new(),
            display_name,
        };

        loader.build_line_index();
        tracing::debug!(
            path = %loader.display_name,
            lines = loader.line_offsets.len(),
            "mapped source"
        );
        Ok(loader)
    }

    fn data(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    fn build_line_index(&mut self) {
        self.line_offsets = line_offsets(self.data());
    }
}

/// Start offsets of every line in `data`. Empty input has no lines.
pub(crate) fn line_offsets(data: &[u8]) -> Vec<usize> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut offsets = vec![0];
    for (i, &byte) in data.iter().enumerate() {
        if byte == b'\n' {
            let next_line_start = i + 1;
            if next_line_start < data.len() {
                offsets.push(next_line_start);
            }
        }
    }
    offsets
}

/// Slice line `line_num` out of `data`, dropping its `\n` or `\r\n`.
pub(crate) fn line_at<'a>(data: &'a [u8], offsets: &[usize], line_num: usize) -> Option<Cow<'a, str>> {
    let start = *offsets.get(line_num)?;
    let end = offsets.get(line_num + 1).copied().unwrap_or(data.len());

    let line_bytes = &data[start..end];
    let line_bytes = line_bytes.strip_suffix(b"\n").unwrap_or(line_bytes);
    let line_bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);

    Some(String::from_utf8_lossy(line_bytes))
}

impl LineSource for MappedFile {
    fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    fn get_line(&self, line_num: usize) -> Option<Cow<'_, str>> {
        line_at(self.data(), &self.line_offsets, line_num)
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}
