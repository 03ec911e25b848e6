use std::fmt::{self, Display};
use std::io::Write;
use std::process;

use snowball_core::{AbortPolicy, AssertionFailure, SessionConfig, SnowballError};
use tracing::debug;

use crate::report::{Family, FailureKind, Reporter};
use crate::stack::{BacktraceCapture, StackCapture};

/// Zero-argument callback run when an assertion of its family fails.
pub type Hook = Box<dyn FnMut()>;

/// State of one test run: the active test case label, the failure hooks,
/// the diagnostic reporter, and the fixed configuration.
///
/// Assertions are methods on the session (see the `require` and `check`
/// modules). A session belongs to one thread; run independent sessions for
/// independent workers.
pub struct Session {
    test_case: String,
    on_require: Option<Hook>,
    on_check: Option<Hook>,
    config: SessionConfig,
    reporter: Reporter,
    stack: Box<dyn StackCapture>,
}

impl Session {
    /// Session with the build default configuration writing to stdio.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Session with `config` writing to stdio.
    pub fn with_config(config: SessionConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Starts building a session with custom sinks or stack capture.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Sets the active test case label and returns it.
    pub fn test_case(&mut self, label: impl Display) -> String {
        self.test_case = label.to_string();
        debug!(test_case = %self.test_case, "test case started");
        self.test_case.clone()
    }

    /// Clears the active test case label.
    pub fn end_test_case(&mut self) {
        debug!(test_case = %self.test_case, "test case ended");
        self.test_case.clear();
    }

    /// Active test case label; empty when none is set.
    pub fn current_test_case(&self) -> &str {
        &self.test_case
    }

    /// Registers the hook run on fatal failures. `None` keeps the current hook.
    pub fn require_callback(&mut self, hook: Option<Hook>) {
        if let Some(hook) = hook {
            debug!("require hook registered");
            self.on_require = Some(hook);
        }
    }

    /// Registers the hook run on soft failures. `None` keeps the current hook.
    pub fn check_callback(&mut self, hook: Option<Hook>) {
        if let Some(hook) = hook {
            debug!("check hook registered");
            self.on_check = Some(hook);
        }
    }

    /// Writes an informational line with the `snowball msg:` marker.
    pub fn print(&mut self, message: impl Display) {
        self.reporter.report_info(&message.to_string());
    }

    /// Prints an advisory when the binary was built without debug assertions.
    pub fn verify_debug(&mut self) {
        if !cfg!(debug_assertions) {
            self.reporter.report_warning("the executable *wasn't* compiled in debug mode.");
        }
    }

    /// Reports an unconditional fatal failure with a custom message, runs the
    /// require hook, and applies the abort policy.
    pub fn error(&mut self, message: impl Display) -> Result<(), SnowballError> {
        let message = message.to_string();
        self.reporter.report_error(&self.test_case, &message);
        self.run_hook(Family::Require);
        let failure = self.failure("error", message);
        self.abort(failure)
    }

    /// Applies the abort policy without reporting anything.
    pub fn early_end(&mut self) -> Result<(), SnowballError> {
        let failure = self.failure("early_end", "run ended early");
        self.abort(failure)
    }

    pub(crate) fn reporter_mut(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    /// Reports a failure, dumps the stack when enabled, and runs the hook of
    /// the kind's family. The abort policy is not applied here.
    pub(crate) fn report(&mut self, kind: FailureKind, note: Option<&str>) {
        debug!(
            test_case = %self.test_case,
            kind = kind.name(),
            note = note.unwrap_or(""),
            "assertion failed"
        );
        self.reporter.report_failure(&self.test_case, kind);
        if self.config.print_stack {
            let frames = self.stack.capture_frames();
            self.reporter.dump_call_stack(&frames);
        }
        self.run_hook(kind.family);
    }

    /// Soft failure path: report and continue.
    pub(crate) fn fail_soft(&mut self, kind: FailureKind, note: Option<&str>) {
        self.report(kind, note);
    }

    /// Fatal failure path: report, then apply the abort policy.
    pub(crate) fn fail_fatal(
        &mut self,
        kind: FailureKind,
        note: Option<&str>,
    ) -> Result<(), SnowballError> {
        self.report(kind, note);
        let mut failure = self.failure(kind.name(), kind.detail());
        failure.raised = note.map(str::to_string);
        self.abort(failure)
    }

    fn run_hook(&mut self, family: Family) {
        let hook = match family {
            Family::Require => self.on_require.as_mut(),
            Family::Check => self.on_check.as_mut(),
        };
        if let Some(hook) = hook {
            hook();
        }
    }

    fn failure(&self, kind: &str, message: impl Into<String>) -> AssertionFailure {
        AssertionFailure {
            test_case: (!self.test_case.is_empty()).then(|| self.test_case.clone()),
            ..AssertionFailure::new(kind, message)
        }
    }

    fn abort(&mut self, failure: AssertionFailure) -> Result<(), SnowballError> {
        match self.config.abort {
            AbortPolicy::Terminate { status } => {
                debug!(status, kind = %failure.kind, "terminating run");
                self.reporter.flush();
                process::exit(status)
            }
            AbortPolicy::Raise => Err(SnowballError::Assertion(failure)),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("test_case", &self.test_case)
            .field("on_require", &self.on_require.is_some())
            .field("on_check", &self.on_check.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Session`] with custom sinks or stack capture.
#[derive(Default)]
pub struct SessionBuilder {
    config: Option<SessionConfig>,
    out: Option<Box<dyn Write>>,
    err: Option<Box<dyn Write>>,
    stack: Option<Box<dyn StackCapture>>,
}

impl SessionBuilder {
    /// Uses `config` instead of the build default.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sends informational output to `sink` instead of stdout.
    pub fn stdout(mut self, sink: impl Write + 'static) -> Self {
        self.out = Some(Box::new(sink));
        self
    }

    /// Sends failure output to `sink` instead of stderr.
    pub fn stderr(mut self, sink: impl Write + 'static) -> Self {
        self.err = Some(Box::new(sink));
        self
    }

    /// Replaces the default [`BacktraceCapture`].
    pub fn stack_capture(mut self, capture: impl StackCapture + 'static) -> Self {
        self.stack = Some(Box::new(capture));
        self
    }

    /// Builds the session with an empty test case and no hooks.
    pub fn build(self) -> Session {
        let config = self.config.unwrap_or_default();
        let out = self
            .out
            .unwrap_or_else(|| Box::new(std::io::stdout()) as Box<dyn Write>);
        let err = self
            .err
            .unwrap_or_else(|| Box::new(std::io::stderr()) as Box<dyn Write>);
        let reporter = Reporter::new(out, err, config.color);
        Session {
            test_case: String::new(),
            on_require: None,
            on_check: None,
            config,
            reporter,
            stack: self
                .stack
                .unwrap_or_else(|| Box::new(BacktraceCapture) as Box<dyn StackCapture>),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{SharedBuffer, Verdict};
    use crate::stack::NoopCapture;
    use std::cell::Cell;
    use std::rc::Rc;

    fn quiet_session() -> (Session, SharedBuffer) {
        let err = SharedBuffer::new();
        let session = Session::builder()
            .config(SessionConfig::embedded())
            .stdout(std::io::sink())
            .stderr(err.clone())
            .stack_capture(NoopCapture)
            .build();
        (session, err)
    }

    #[test]
    fn test_case_round_trip() {
        let (mut session, _) = quiet_session();
        assert_eq!(session.current_test_case(), "");
        assert_eq!(session.test_case("Factorial test case"), "Factorial test case");
        assert_eq!(session.test_case(42), "42");
        session.end_test_case();
        assert_eq!(session.current_test_case(), "");
    }

    #[test]
    fn registering_none_keeps_previous_hook() {
        let (mut session, _) = quiet_session();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        session.check_callback(Some(Box::new(move || counter.set(counter.get() + 1))));
        session.check_callback(None);
        session.fail_soft(FailureKind::new(Family::Check, Verdict::Mismatch), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn hooks_are_per_family() {
        let (mut session, _) = quiet_session();
        let require_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&require_calls);
        session.require_callback(Some(Box::new(move || counter.set(counter.get() + 1))));
        session.fail_soft(FailureKind::new(Family::Check, Verdict::Mismatch), None);
        assert_eq!(require_calls.get(), 0);
        let err = session
            .fail_fatal(FailureKind::new(Family::Require, Verdict::Mismatch), None)
            .unwrap_err();
        assert_eq!(require_calls.get(), 1);
        assert_eq!(err.assertion().map(|f| f.kind.as_str()), Some("require"));
    }

    #[test]
    fn raised_error_carries_test_case_and_note() {
        let (mut session, err_out) = quiet_session();
        session.test_case("Checking if functions throw");
        let err = session
            .fail_fatal(
                FailureKind::new(Family::Require, Verdict::UnexpectedKind),
                Some("sample throw"),
            )
            .unwrap_err();
        let failure = err.assertion().expect("assertion payload");
        assert_eq!(failure.message, "unexpected exception was thrown.");
        assert_eq!(failure.test_case.as_deref(), Some("Checking if functions throw"));
        assert_eq!(failure.raised.as_deref(), Some("sample throw"));
        assert!(err_out.contents().contains("[ Checking if functions throw ]"));
    }

    #[test]
    fn error_reports_custom_message() {
        let (mut session, err_out) = quiet_session();
        let err = session.error("disk full").unwrap_err();
        let failure = err.assertion().expect("assertion payload");
        assert_eq!(failure.kind, "error");
        assert_eq!(failure.test_case, None);
        assert_eq!(err_out.contents(), "snowball error(): disk full\n");
    }

    #[test]
    fn early_end_raises_without_output() {
        let (mut session, err_out) = quiet_session();
        assert!(session.early_end().unwrap_err().is_assertion());
        assert!(err_out.contents().is_empty());
    }

    #[test]
    fn stack_is_dumped_when_enabled() {
        let err = SharedBuffer::new();
        let mut config = SessionConfig::embedded();
        config.print_stack = true;
        let mut session = Session::builder()
            .config(config)
            .stderr(err.clone())
            .stack_capture(|| {
                vec![crate::stack::Frame {
                    index: 0,
                    symbol: "main".to_string(),
                }]
            })
            .build();
        session.fail_soft(FailureKind::new(Family::Check, Verdict::Match), None);
        assert_eq!(
            err.contents(),
            "snowball check_false() failure: expected output was true.\n\
             Start of call stack:\n#0: main\n"
        );
    }
}
