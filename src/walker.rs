// src/walker.rs
//! Thin seam over the `backtrace` crate.
//!
//! Everything that touches the unwinder lives here so the rest of the
//! crate can treat a stack trace as a plain slice of program counters.
//! Keeping the seam narrow also keeps trimming and rendering testable
//! with synthetic addresses.

use std::ffi::c_void;

/// Upper bound on captured frames per trace.
pub(crate) const MAX_DEPTH: usize = 64;

/// Frames belonging to the capture machinery itself, dropped from the
/// front of every trace.
const SELF_FRAMES: usize = 2;

/// Walk the current stack and return its program counters, most recent
/// first.
#[inline(never)]
pub(crate) fn capture_frames() -> Vec<usize> {
    let mut frames = Vec::with_capacity(MAX_DEPTH);
    let mut skip = SELF_FRAMES;
    backtrace::trace(|frame| {
        if skip > 0 {
            skip -= 1;
            return true;
        }
        frames.push(frame.ip() as usize);
        frames.len() < MAX_DEPTH
    });
    frames
}

/// Resolve one program counter to a demangled symbol name, if the
/// platform has symbol data for it.
pub(crate) fn resolve_symbol(addr: usize) -> Option<String> {
    let mut name = None;
    backtrace::resolve(addr as *mut c_void, |symbol| {
        if name.is_none() {
            name = symbol.name().map(|n| n.to_string());
        }
    });
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_is_bounded_and_non_empty() {
        let frames = capture_frames();
        assert!(!frames.is_empty());
        assert!(frames.len() <= MAX_DEPTH);
    }

    #[test]
    fn bogus_addresses_do_not_resolve() {
        assert_eq!(resolve_symbol(0x1), None);
    }
}
