use std::backtrace::{Backtrace, BacktraceStatus};

/// Upper bound on the number of frames captured per dump.
pub const MAX_FRAMES: usize = 64;

/// One resolved frame of a captured call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position of the frame, innermost first.
    pub index: usize,
    /// Symbol name, or the raw address text when no symbol resolved.
    pub symbol: String,
}

/// Source of call stack frames for failure diagnostics.
///
/// Implementations must never panic; an empty vector means nothing could be
/// captured and the dump is skipped.
pub trait StackCapture {
    /// Captures at most [`MAX_FRAMES`] frames of the current thread.
    fn capture_frames(&self) -> Vec<Frame>;
}

impl<F> StackCapture for F
where
    F: Fn() -> Vec<Frame>,
{
    fn capture_frames(&self) -> Vec<Frame> {
        let mut frames = self();
        frames.truncate(MAX_FRAMES);
        frames
    }
}

/// Captures frames through [`std::backtrace::Backtrace`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture;

impl StackCapture for BacktraceCapture {
    fn capture_frames(&self) -> Vec<Frame> {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() != BacktraceStatus::Captured {
            return Vec::new();
        }
        parse_frames(&backtrace.to_string())
    }
}

/// Capture that never yields frames, for platforms without unwinding support
/// or callers that want quiet output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCapture;

impl StackCapture for NoopCapture {
    fn capture_frames(&self) -> Vec<Frame> {
        Vec::new()
    }
}

/// Extracts `<index>: <symbol>` lines from a rendered backtrace.
///
/// Source location lines (`at path:line`) are skipped.
pub fn parse_frames(rendered: &str) -> Vec<Frame> {
    rendered
        .lines()
        .filter_map(|line| {
            let (index, symbol) = line.trim_start().split_once(": ")?;
            let index = index.parse::<usize>().ok()?;
            Some(Frame {
                index,
                symbol: symbol.trim().to_string(),
            })
        })
        .take(MAX_FRAMES)
        .collect()
}
