// src/render.rs
//! Full diagnostic reports.
//!
//! A report lays out the whole cause chain in Python's traceback
//! style: the root cause comes first, each later error follows its
//! own `The above error was the direct cause of the following error:`
//! separator, and every link prints its trimmed traceback above its
//! message line.

use std::io::{self, Write};

use crate::error::Error;

const CAUSE_SEPARATOR: &str = "The above error was the direct cause of the following error:";

/// Render the full report for `err` and everything that caused it.
///
/// Traces that were never captured, or that trimming emptied out, are
/// left off the report entirely.
pub fn render_to_string(err: &Error) -> String {
    use std::fmt::Write as _;

    let chain: Vec<&Error> = err.causes().collect();
    let mut out = String::new();
    for (idx, link) in chain.iter().rev().enumerate() {
        if idx > 0 {
            out.push('\n');
            out.push_str(CAUSE_SEPARATOR);
            out.push_str("\n\n");
        }
        if let Some(bt) = link.backtrace() {
            if !bt.is_empty() {
                let _ = writeln!(out, "{bt}");
            }
        }
        let _ = writeln!(out, "{link}");
    }
    out
}

pub fn render_to_writer<W: Write>(err: &Error, mut writer: W) -> io::Result<()> {
    writer.write_all(render_to_string(err).as_bytes())
}

pub fn render_to_stderr(err: &Error) {
    let _ = render_to_writer(err, io::stderr().lock());
}
