use std::borrow::Cow;
use std::io::Read;

use crate::error::Result;
use crate::file_loader::{line_at, line_offsets};

pub trait LineSource {
    /// Returns total number of lines in the source
    fn line_count(&self) -> usize;

    /// Get a single line by 0-based line number, without its terminator
    fn get_line(&self, line_num: usize) -> Option<Cow<'_, str>>;

    /// Name used in reports and logs
    fn display_name(&self) -> &str;
}

/// A source held fully in memory, used for standard input.
pub struct TextBuffer {
    data: Vec<u8>,
    line_offsets: Vec<usize>,
    display_name: String,
}

impl TextBuffer {
    pub fn new(display_name: &str, data: Vec<u8>) -> Self {
        let line_offsets = line_offsets(&data);
        Self {
            data,
            line_offsets,
            display_name: display_name.to_string(),
        }
    }

    pub fn from_reader<R: Read>(display_name: &str, mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::new(display_name, data))
    }
}

impl LineSource for TextBuffer {
    fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    fn get_line(&self, line_num: usize) -> Option<Cow<'_, str>> {
        line_at(&self.data, &self.line_offsets, line_num)
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}
