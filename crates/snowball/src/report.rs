use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::warn;

use crate::stack::Frame;

const BLUE: &str = "\x1b[34m";
const GREY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Assertion family a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Fatal `require*` assertions.
    Require,
    /// Soft `check*` assertions.
    Check,
}

impl Family {
    /// Returns the family prefix used in console messages.
    pub const fn name(self) -> &'static str {
        match self {
            Family::Require => "require",
            Family::Check => "check",
        }
    }
}

/// Why a judged invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The result differed from the expected value.
    Mismatch,
    /// The result equalled a value it was required to differ from.
    Match,
    /// An error was expected but the invocation completed normally.
    NothingThrown,
    /// The invocation raised an error of a different kind than declared.
    UnexpectedKind,
    /// The invocation raised an error where none was allowed.
    SomethingThrown,
}

/// Fully qualified failure kind, selecting the canned console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FailureKind {
    /// Family of the failing assertion.
    pub family: Family,
    /// Reason for the failure.
    pub verdict: Verdict,
}

impl FailureKind {
    /// Creates a kind from its parts.
    pub const fn new(family: Family, verdict: Verdict) -> Self {
        Self { family, verdict }
    }

    /// Stable name of the assertion variant, e.g. `require_false`.
    pub const fn name(&self) -> &'static str {
        match (self.family, self.verdict) {
            (Family::Require, Verdict::Mismatch) => "require",
            (Family::Require, Verdict::Match) => "require_false",
            (Family::Require, Verdict::NothingThrown | Verdict::UnexpectedKind) => "require_throw",
            (Family::Require, Verdict::SomethingThrown) => "require_nothrow",
            (Family::Check, Verdict::Mismatch) => "check",
            (Family::Check, Verdict::Match) => "check_false",
            (Family::Check, Verdict::NothingThrown | Verdict::UnexpectedKind) => "check_throw",
            (Family::Check, Verdict::SomethingThrown) => "check_nothrow",
        }
    }

    /// Canned explanation printed after the failure marker.
    pub const fn detail(&self) -> &'static str {
        match self.verdict {
            Verdict::Mismatch => "expected output was false.",
            Verdict::Match => "expected output was true.",
            Verdict::NothingThrown => "nothing was thrown.",
            Verdict::UnexpectedKind => "unexpected exception was thrown.",
            Verdict::SomethingThrown => "something was thrown.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() failure: {}", self.name(), self.detail())
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

/// Writes the console protocol: informational lines to the output sink and
/// failures to the error sink.
///
/// Write failures are logged and swallowed so diagnostics can never change
/// an assertion outcome.
pub struct Reporter {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    color: bool,
}

impl Reporter {
    /// Reporter writing to arbitrary sinks.
    pub fn new(out: Box<dyn Write>, err: Box<dyn Write>, color: bool) -> Self {
        Self { out, err, color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&mut self, stream: Stream, line: &str) {
        let sink = match stream {
            Stream::Out => &mut self.out,
            Stream::Err => &mut self.err,
        };
        if let Err(err) = writeln!(sink, "{line}").and_then(|()| sink.flush()) {
            warn!(error = %err, "diagnostic write failed");
        }
    }

    fn frame_test_case(&mut self, test_case: &str) {
        if test_case.is_empty() {
            return;
        }
        let heading = self.paint(BLUE, ":: Test case error...");
        let label = self.paint(GREY, &format!("[ {test_case} ]"));
        self.emit(Stream::Err, &heading);
        self.emit(Stream::Err, &label);
    }

    /// Reports a failed assertion, framed by the active test case when set.
    pub fn report_failure(&mut self, test_case: &str, kind: FailureKind) {
        self.frame_test_case(test_case);
        let marker = self.paint(BLUE, &format!("snowball {}() failure:", kind.name()));
        self.emit(Stream::Err, &format!("{marker} {}", kind.detail()));
    }

    /// Reports an explicit `error()` call with a caller supplied message.
    pub fn report_error(&mut self, test_case: &str, message: &str) {
        self.frame_test_case(test_case);
        let marker = self.paint(BLUE, "snowball error():");
        self.emit(Stream::Err, &format!("{marker} {message}"));
    }

    /// Writes an informational line prefixed with the `snowball msg:` marker.
    pub fn report_info(&mut self, message: &str) {
        let marker = self.paint(BLUE, "snowball msg:");
        self.emit(Stream::Out, &format!("{marker} {message}"));
    }

    /// Echoes the message of an error caught by a typed throw assertion.
    pub fn report_caught(&mut self, family: Family, message: &str) {
        let marker = self.paint(BLUE, &format!("snowball {}_throw():", family.name()));
        self.emit(Stream::Out, &format!("{marker} {message}"));
    }

    /// Writes a warning line to the output sink.
    pub fn report_warning(&mut self, message: &str) {
        let marker = self.paint(BLUE, "snowball warning:");
        self.emit(Stream::Out, &format!("{marker} {message}"));
    }

    /// Writes captured frames as `#<index>: <symbol>` lines.
    ///
    /// Nothing is written when `frames` is empty.
    pub fn dump_call_stack(&mut self, frames: &[Frame]) {
        if frames.is_empty() {
            return;
        }
        self.emit(Stream::Err, "Start of call stack:");
        for frame in frames {
            self.emit(Stream::Err, &format!("#{}: {}", frame.index, frame.symbol));
        }
    }

    /// Flushes both sinks.
    pub fn flush(&mut self) {
        for sink in [&mut self.out, &mut self.err] {
            if let Err(err) = sink.flush() {
                warn!(error = %err, "diagnostic flush failed");
            }
        }
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// In-memory sink shared between a [`Reporter`] and its owner.
///
/// Clones share the same buffer, so one clone can be handed to a session
/// while another reads back what was written.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
