use std::path::Path;

use crate::error::Result;
use crate::file_loader::MappedFile;
use crate::file_source::LineSource;
use crate::rule::MatchRule;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanEntry {
    pub line_num: usize,              // 0-based
    pub text: String,
    pub matched: bool,
}

/// One pass over a source. Owns the source, so dropping the scan releases it.
pub struct Scan<'r, S: LineSource> {
    source: S,
    rule: &'r MatchRule,
    next_line: usize,
    matched: usize,
    finished: bool,
}

/// Open `path` and classify its lines with `rule`.
pub fn scan<P: AsRef<Path>>(path: P, rule: &MatchRule) -> Result<Scan<'_, MappedFile>> {
    let source = MappedFile::open(path)?;
    Ok(scan_source(source, rule))
}

pub fn scan_source<S: LineSource>(source: S, rule: &MatchRule) -> Scan<'_, S> {
    tracing::debug!(
        source = source.display_name(),
        rule = %rule.kind(),
        target = rule.target(),
        "starting scan"
    );
    Scan {
        source,
        rule,
        next_line: 0,
        matched: 0,
        finished: false,
    }
}

impl<'r, S: LineSource> Scan<'r, S> {
    pub fn rule(&self) -> &'r MatchRule {
        self.rule
    }

    /// Matches seen so far.
    pub fn matched_count(&self) -> usize {
        self.matched
    }

    pub fn line_count(&self) -> usize {
        self.source.line_count()
    }
}

impl<S: LineSource> Iterator for Scan<'_, S> {
    type Item = ScanEntry;

    fn next(&mut self) -> Option<ScanEntry> {
        let line_num = self.next_line;
        let Some(text) = self.source.get_line(line_num) else {
            if !self.finished {
                self.finished = true;
                tracing::debug!(
                    source = self.source.display_name(),
                    lines = self.next_line,
                    matched = self.matched,
                    "scan finished"
                );
            }
            return None;
        };
        self.next_line += 1;

        let matched = self.rule.evaluate(&text);
        if matched {
            self.matched += 1;
        }
        tracing::trace!(line = line_num, matched, "classified");

        Some(ScanEntry {
            line_num,
            text: text.into_owned(),
            matched,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.source.line_count().saturating_sub(self.next_line);
        (remaining, Some(remaining))
    }
}
