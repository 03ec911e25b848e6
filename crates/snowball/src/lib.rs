#![deny(missing_docs)]
#![doc = "Call-and-compare assertion engine: fatal `require*` and soft `check*` families over free functions, bound methods, and closures."]

/// Soft assertion family that reports and continues.
pub mod check;
/// Folding of invocation results against an expected value.
pub mod compare;
/// Randomized single-argument input driver.
pub mod fuzz;
/// Uniform invocation of free functions, closures, and bound methods.
pub mod invoke;
/// Console diagnostics for failures and informational messages.
pub mod report;
/// Fatal assertion family that applies the abort policy.
pub mod require;
/// Session state: active test case, hooks, and configuration.
pub mod session;
/// Best-effort call stack capture.
pub mod stack;

pub use compare::{matches_all, mismatches_all};
pub use fuzz::{fuzz, fuzz_seeded};
pub use invoke::{Attempt, AttemptResult, Bound, BoundWith, Fallible, Invoke, Raised};
pub use report::{Family, FailureKind, Reporter, SharedBuffer, Verdict};
pub use session::{Hook, Session, SessionBuilder};
pub use stack::{BacktraceCapture, Frame, NoopCapture, StackCapture, MAX_FRAMES};

pub use snowball_core::{AbortPolicy, AssertionFailure, SessionConfig, SnowballError};
