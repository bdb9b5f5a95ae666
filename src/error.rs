// src/error.rs
//! The error type shared by every stage of the toolchain.
//!
//! [`Error`] pairs a closed [`ErrorKind`] with a human-readable
//! message, an optional captured [`Backtrace`] and an optional cause.
//! Kinds fall into two families: API misuse (a caller asked for
//! something that does not exist) and file content problems (the input
//! itself is wrong, pinned to a [`Location`]).
//!
//! Causes are chained by value. Storing a cause trims its backtrace
//! against the current stack, so a rendered chain shows each hop once
//! instead of repeating the shared frames.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::backtrace::Backtrace;
use crate::ident::{Fqon, MemberId};
use crate::location::Location;

pub type Result<T> = std::result::Result<T, Error>;

static BREAK_ON_ERROR: AtomicBool = AtomicBool::new(false);

/// Make every subsequent error construction raise `SIGTRAP`, stopping
/// an attached debugger at the exact raise site. Takes effect process
/// wide and immediately.
pub fn enable_break(enable: bool) {
    BREAK_ON_ERROR.store(enable, Ordering::Relaxed);
}

#[inline]
fn breakpoint() {
    #[cfg(unix)]
    unsafe {
        libc::raise(libc::SIGTRAP);
    }
}

/// Location payload shared by the file content kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDetail {
    pub location: Location,
    /// Offending identifier, set for name errors.
    pub name: Option<String>,
    /// Accumulated explanations, each pinned to its own location.
    pub reasons: Vec<(Location, String)>,
}

impl FileDetail {
    pub fn at(location: Location) -> Self {
        Self {
            location,
            name: None,
            reasons: Vec::new(),
        }
    }
}

/// Every kind of error the toolchain raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bug in the toolchain itself.
    Internal,
    /// Caller misused the public API.
    Api,
    /// Lookup of an object that is not in the store.
    ObjectNotFound { object: Fqon },
    /// Lookup of a member the object does not have.
    MemberNotFound { object: Fqon, member: MemberId },
    /// An input file could not be read at all.
    FileRead,
    /// Generic problem with file content.
    File(FileDetail),
    /// An identifier does not resolve.
    Name(FileDetail),
    /// The tokenizer rejected the input.
    Tokenize(FileDetail),
    /// A diagnosis built up from one or more located reasons.
    Reason(FileDetail),
}

impl ErrorKind {
    /// Stable name of the kind, used as the prefix of rendered
    /// messages and in trace events.
    pub fn type_name(&self) -> &'static str {
        match self {
            ErrorKind::Internal => "InternalError",
            ErrorKind::Api => "APIError",
            ErrorKind::ObjectNotFound { .. } => "ObjectNotFoundError",
            ErrorKind::MemberNotFound { .. } => "MemberNotFoundError",
            ErrorKind::FileRead => "FileReadError",
            ErrorKind::File(_) => "FileError",
            ErrorKind::Name(_) => "NameError",
            ErrorKind::Tokenize(_) => "TokenizeError",
            ErrorKind::Reason(_) => "ReasonError",
        }
    }

    /// True for the kinds raised when a caller asks the API for
    /// something that does not exist.
    pub fn is_api_misuse(&self) -> bool {
        matches!(
            self,
            ErrorKind::Api | ErrorKind::ObjectNotFound { .. } | ErrorKind::MemberNotFound { .. }
        )
    }

    /// True for the kinds that point at a place in an input file.
    pub fn is_file_content(&self) -> bool {
        self.file_detail().is_some()
    }

    pub fn file_detail(&self) -> Option<&FileDetail> {
        match self {
            ErrorKind::File(detail)
            | ErrorKind::Name(detail)
            | ErrorKind::Tokenize(detail)
            | ErrorKind::Reason(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        self.file_detail().map(|detail| &detail.location)
    }
}

/// An error raised anywhere in the toolchain.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
    backtrace: Option<Backtrace>,
    cause: Option<Box<Error>>,
    what_cache: OnceLock<String>,
}

impl Error {
    /// Raise an error, capturing the current stack.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self::build(kind, msg.into(), true)
    }

    /// Raise an error without paying for a stack capture. Used on hot
    /// paths where the raise site is obvious from the message.
    pub fn without_backtrace(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self::build(kind, msg.into(), false)
    }

    fn build(kind: ErrorKind, msg: String, capture: bool) -> Self {
        tracing::trace!(kind = kind.type_name(), %msg, "error raised");
        let err = Self {
            kind,
            msg,
            backtrace: capture.then(Backtrace::capture),
            cause: None,
            what_cache: OnceLock::new(),
        };
        if BREAK_ON_ERROR.load(Ordering::Relaxed) {
            breakpoint();
        }
        err
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, msg)
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, msg)
    }

    pub fn object_not_found(object: impl Into<Fqon>) -> Self {
        let object = object.into();
        let msg = format!("object not found: {object}");
        Self::new(ErrorKind::ObjectNotFound { object }, msg)
    }

    pub fn member_not_found(object: impl Into<Fqon>, member: impl Into<MemberId>) -> Self {
        let object = object.into();
        let member = member.into();
        let msg = format!("member not found: {object}.{member}");
        Self::new(ErrorKind::MemberNotFound { object, member }, msg)
    }

    pub fn file_read(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileRead, msg)
    }

    pub fn file(location: Location, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::File(FileDetail::at(location)), msg)
    }

    pub fn name(location: Location, msg: impl Into<String>, name: Option<String>) -> Self {
        let mut detail = FileDetail::at(location);
        detail.name = name;
        Self::new(ErrorKind::Name(detail), msg)
    }

    pub fn tokenize(location: Location, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Tokenize(FileDetail::at(location)), msg)
    }

    pub fn reasons(
        location: Location,
        msg: impl Into<String>,
        reasons: Vec<(Location, String)>,
    ) -> Self {
        let mut detail = FileDetail::at(location);
        detail.reasons = reasons;
        Self::new(ErrorKind::Reason(detail), msg)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_api_misuse(&self) -> bool {
        self.kind.is_api_misuse()
    }

    pub fn is_file_content(&self) -> bool {
        self.kind.is_file_content()
    }

    pub fn location(&self) -> Option<&Location> {
        self.kind.location()
    }

    pub fn file_detail(&self) -> Option<&FileDetail> {
        self.kind.file_detail()
    }

    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_ref()
    }

    /// Trim the captured trace against the stack active right now.
    /// Does nothing when no trace was captured.
    pub fn trim_backtrace(&mut self) {
        if let Some(bt) = &mut self.backtrace {
            bt.trim_to_current_stack();
        }
    }

    /// Store `cause` as the error this one was raised in response to.
    /// The cause's backtrace is trimmed first, so the two traces chain
    /// instead of overlapping.
    pub fn store_cause(&mut self, mut cause: Error) {
        cause.trim_backtrace();
        self.cause = Some(Box::new(cause));
    }

    /// Builder form of [`Error::store_cause`].
    pub fn with_cause(mut self, cause: Error) -> Self {
        self.store_cause(cause);
        self
    }

    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    /// Take the stored cause out of this error, consuming the wrapper.
    /// This is how a handler re-raises the underlying problem.
    pub fn into_cause(self) -> Option<Error> {
        self.cause.map(|boxed| *boxed)
    }

    /// Walk the cause chain to its innermost error.
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.cause() {
            err = cause;
        }
        err
    }

    /// This error followed by every transitive cause, outermost first.
    pub fn causes(&self) -> impl Iterator<Item = &Error> + '_ {
        std::iter::successors(Some(self), |err| err.cause())
    }

    /// The rendered one-line message. Built once, then cached.
    pub fn what(&self) -> &str {
        self.what_cache.get_or_init(|| self.describe())
    }

    fn describe(&self) -> String {
        match &self.kind {
            ErrorKind::Name(detail) => {
                let mut out = format!("{}: {}", detail.location, self.msg);
                if let Some(name) = &detail.name {
                    out.push_str(&format!(": '{name}'"));
                }
                out
            }
            ErrorKind::File(detail) | ErrorKind::Tokenize(detail) | ErrorKind::Reason(detail) => {
                format!("{}: {}", detail.location, self.msg)
            }
            _ => format!("{}: {}", self.kind.type_name(), self.msg),
        }
    }

    /// Point at where in the input the problem comes from. Reason
    /// errors list every recorded reason on its own line; the other
    /// file content kinds render an arrow at their location. `None`
    /// for kinds without a location.
    pub fn problem_origin(&self) -> Option<String> {
        let detail = self.file_detail()?;
        if let ErrorKind::Reason(detail) = &self.kind {
            if !detail.reasons.is_empty() {
                let lines: Vec<String> = detail
                    .reasons
                    .iter()
                    .map(|(location, msg)| format!("{location}: {msg}"))
                    .collect();
                return Some(lines.join("\n"));
            }
        }
        Some(format!(" --> {}", detail.location))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.what())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
