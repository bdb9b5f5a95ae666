// src/backtrace.rs
//! Stack trace capture, symbolization and trimming.
//!
//! A [`Backtrace`] is a list of program counters, most recent frame
//! first, captured at the point an error is raised. Symbol resolution
//! is deferred until the trace is actually rendered, so raising an
//! error stays cheap even in hot paths.
//!
//! Traces render in Python's order, oldest frame first, under a
//! `Traceback (most recent call last):` header.

use std::fmt;

use crate::walker;

/// One resolved stack frame.
///
/// The program counter is always known; the symbol name is only
/// present when the platform has symbol data for that address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSymbol {
    pub name: Option<String>,
    pub addr: usize,
}

impl FrameSymbol {
    pub(crate) fn resolve(addr: usize) -> Self {
        Self {
            name: walker::resolve_symbol(addr),
            addr,
        }
    }
}

impl fmt::Display for FrameSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "[{:#x}]", self.addr),
        }
    }
}

/// Captured stack trace.
///
/// Equality and hashing ignore symbol names on purpose: two traces are
/// the same trace when their program counters match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backtrace {
    /// Program counters, most recent call first.
    frames: Vec<usize>,
}

impl Backtrace {
    /// Capture the current call stack, at most 64 frames deep.
    pub fn capture() -> Self {
        Self {
            frames: walker::capture_frames(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Raw program counters, most recent call first.
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Resolve every frame, oldest call first. This is the order the
    /// trace renders in.
    pub fn symbols(&self) -> impl Iterator<Item = FrameSymbol> + '_ {
        self.frames.iter().rev().map(|&addr| FrameSymbol::resolve(addr))
    }

    /// Resolve every frame in capture order, most recent call first.
    pub fn symbols_raw(&self) -> impl Iterator<Item = FrameSymbol> + '_ {
        self.frames.iter().map(|&addr| FrameSymbol::resolve(addr))
    }

    /// Drop the frames this trace shares with the stack active right
    /// now, leaving only the path from the divergence point to where
    /// the trace was captured.
    ///
    /// Called when an error is stored as the cause of another: the
    /// outer error's trace already covers the shared part of the
    /// stack, so the cause keeps only what the outer trace cannot
    /// show.
    pub fn trim_to_current_stack(&mut self) {
        let current = walker::capture_frames();
        let before = self.frames.len();
        self.trim_common_suffix(&current);
        tracing::trace!(
            before,
            after = self.frames.len(),
            "trimmed backtrace to current stack"
        );
    }

    /// Remove the longest common suffix, comparing frame by frame from
    /// the oldest end of both traces and stopping at the first
    /// divergence.
    fn trim_common_suffix(&mut self, current: &[usize]) {
        let mut keep = self.frames.len();
        let mut other = current.len();
        while keep > 0 && other > 0 && self.frames[keep - 1] == current[other - 1] {
            keep -= 1;
            other -= 1;
        }
        self.frames.truncate(keep);
    }
}

impl fmt::Display for Backtrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Traceback (most recent call last):")?;
        for symbol in self.symbols() {
            write!(f, "\n -> {symbol}")?;
        }
        Ok(())
    }
}
