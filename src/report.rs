use std::io::{self, Write};

use crate::rule::{MatchRule, RuleKind};
use crate::scan::ScanEntry;

pub const READ_FAILURE: &str = "ERROR: We had trouble reading the file.";
pub const READ_SUCCESS: &str = "We were able to access the file. Cool!";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub only_matching: bool,
    pub line_numbers: bool,
}

/// Message printed for a matched line.
pub fn match_message(rule: &MatchRule, line: &str) -> String {
    match rule.kind() {
        RuleKind::Exact => format!("-> We found {}!", rule.target()),
        RuleKind::Contains => format!("-> We found {} in the line of text!", rule.target()),
        RuleKind::Pattern => format!(
            "-> We found the text: {}, in this line: {}",
            rule.target(),
            line
        ),
    }
}

pub struct Reporter<W: Write> {
    out: W,
    options: ReportOptions,
    total: usize,
    matched: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, options: ReportOptions) -> Self {
        Self {
            out,
            options,
            total: 0,
            matched: 0,
        }
    }

    pub fn entry(&mut self, rule: &MatchRule, entry: &ScanEntry) -> io::Result<()> {
        self.total += 1;
        if entry.matched {
            self.matched += 1;
            let message = match_message(rule, &entry.text);
            self.write_line(entry.line_num, &message)
        } else if self.options.only_matching {
            Ok(())
        } else {
            self.write_line(entry.line_num, &entry.text)
        }
    }

    /// Listing mode: every line, numbered from 1.
    pub fn listing(&mut self, line_num: usize, text: &str) -> io::Result<()> {
        self.total += 1;
        writeln!(self.out, "Line {}: {}", line_num + 1, text)
    }

    pub fn finish(&mut self, with_summary: bool) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", READ_SUCCESS)?;
        if with_summary {
            writeln!(self.out, "{} of {} lines matched", self.matched, self.total)?;
        }
        self.out.flush()
    }

    pub fn failure(&mut self, err: &dyn std::error::Error) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", READ_FAILURE)?;
        writeln!(self.out, "{}", err)?;
        self.out.flush()
    }

    fn write_line(&mut self, line_num: usize, text: &str) -> io::Result<()> {
        if self.options.line_numbers {
            writeln!(self.out, "{}: {}", line_num + 1, text)
        } else {
            writeln!(self.out, "{}", text)
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
