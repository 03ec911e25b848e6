//! Every `require*` method reports a failure, runs the require hook, and then
//! applies the session's abort policy: under `Terminate` the process exits
//! and the method never returns, under `Raise` it returns
//! [`SnowballError::Assertion`]. A passing assertion returns `Ok(())`.

use std::error::Error;
use std::iter;

use snowball_core::SnowballError;

use crate::compare::{matches_all, mismatches_all};
use crate::invoke::{Attempt, AttemptResult, Invoke, Raised};
use crate::report::{Family, FailureKind, Verdict};
use crate::session::Session;

const fn fatal(verdict: Verdict) -> FailureKind {
    FailureKind::new(Family::Require, verdict)
}

impl Session {
    /// Requires `condition` to hold.
    pub fn require(&mut self, condition: bool) -> Result<(), SnowballError> {
        if condition {
            return Ok(());
        }
        self.fail_fatal(fatal(Verdict::Mismatch), None)
    }

    /// Requires `actual == expected`.
    pub fn require_eq<A, B>(&mut self, actual: &A, expected: &B) -> Result<(), SnowballError>
    where
        A: PartialEq<B> + ?Sized,
        B: ?Sized,
    {
        self.require(actual == expected)
    }

    /// Requires one invocation of `target` with `args` to return `expected`.
    ///
    /// `target` is a free function or closure, a [`Bound`](crate::Bound)
    /// method, or a [`BoundWith`](crate::BoundWith) method plus getter.
    pub fn require_call<T, Args, E>(
        &mut self,
        target: T,
        expected: E,
        args: Args,
    ) -> Result<(), SnowballError>
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
    {
        self.require_all(target, expected, iter::once(args))
    }

    /// Requires every tuple in `tuples` to make `target` return `expected`.
    ///
    /// An empty `tuples` passes.
    pub fn require_all<T, Args, E, I>(
        &mut self,
        mut target: T,
        expected: E,
        tuples: I,
    ) -> Result<(), SnowballError>
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
        I: IntoIterator<Item = Args>,
    {
        if matches_all(&expected, &mut target, tuples) {
            return Ok(());
        }
        self.fail_fatal(fatal(Verdict::Mismatch), None)
    }

    /// Requires one invocation of `target` with `args` to differ from
    /// `expected`.
    pub fn require_false_call<T, Args, E>(
        &mut self,
        target: T,
        expected: E,
        args: Args,
    ) -> Result<(), SnowballError>
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
    {
        self.require_false_all(target, expected, iter::once(args))
    }

    /// Requires every tuple in `tuples` to make `target` return something
    /// other than `expected`.
    ///
    /// An empty `tuples` passes.
    pub fn require_false_all<T, Args, E, I>(
        &mut self,
        mut target: T,
        expected: E,
        tuples: I,
    ) -> Result<(), SnowballError>
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
        I: IntoIterator<Item = Args>,
    {
        if mismatches_all(&expected, &mut target, tuples) {
            return Ok(());
        }
        self.fail_fatal(fatal(Verdict::Match), None)
    }

    /// Requires the invocation to panic. The return type is unconstrained.
    pub fn require_throw<Args>(
        &mut self,
        mut target: impl Attempt<Args>,
        args: Args,
    ) -> Result<(), SnowballError> {
        let raised = target.attempt(args).err();
        self.require_raised(raised)
    }

    /// Requires the invocation to panic with a payload of kind `X`, raised
    /// through [`std::panic::panic_any`].
    ///
    /// The caught error's message is echoed on the output stream. Raising a
    /// different kind fails with "unexpected exception was thrown".
    pub fn require_throw_as<X, Args>(
        &mut self,
        mut target: impl Attempt<Args>,
        args: Args,
    ) -> Result<(), SnowballError>
    where
        X: Error + 'static,
    {
        let raised = target.attempt(args).err();
        self.require_raised_as::<X>(raised)
    }

    /// Requires the invocation to complete without panicking, whatever it
    /// returns.
    pub fn require_nothrow<Args>(
        &mut self,
        mut target: impl Attempt<Args>,
        args: Args,
    ) -> Result<(), SnowballError> {
        let raised = target.attempt(args).err();
        self.require_quiet(raised)
    }

    /// Requires a `Result` returning invocation to return `Err` or panic.
    pub fn require_throw_result<Args>(
        &mut self,
        mut target: impl AttemptResult<Args>,
        args: Args,
    ) -> Result<(), SnowballError> {
        let raised = target.attempt_result(args);
        self.require_raised(raised)
    }

    /// Requires a `Result` returning invocation to raise an error of kind
    /// `X`, either as its `Err` value or as a panic payload.
    ///
    /// Echoes the caught message like [`Session::require_throw_as`].
    pub fn require_throw_result_as<X, Args>(
        &mut self,
        mut target: impl AttemptResult<Args>,
        args: Args,
    ) -> Result<(), SnowballError>
    where
        X: Error + 'static,
    {
        let raised = target.attempt_result(args);
        self.require_raised_as::<X>(raised)
    }

    /// Requires a `Result` returning invocation to return `Ok` without
    /// panicking.
    pub fn require_nothrow_result<Args>(
        &mut self,
        mut target: impl AttemptResult<Args>,
        args: Args,
    ) -> Result<(), SnowballError> {
        let raised = target.attempt_result(args);
        self.require_quiet(raised)
    }

    fn require_raised(&mut self, raised: Option<Raised>) -> Result<(), SnowballError> {
        match raised {
            Some(_) => Ok(()),
            None => self.fail_fatal(fatal(Verdict::NothingThrown), None),
        }
    }

    fn require_raised_as<X>(&mut self, raised: Option<Raised>) -> Result<(), SnowballError>
    where
        X: Error + 'static,
    {
        let Some(raised) = raised else {
            return self.fail_fatal(fatal(Verdict::NothingThrown), None);
        };
        match raised.downcast_ref::<X>() {
            Some(err) => {
                let message = err.to_string();
                self.reporter_mut().report_caught(Family::Require, &message);
                Ok(())
            }
            None => {
                let note = raised.message();
                self.fail_fatal(fatal(Verdict::UnexpectedKind), Some(&note))
            }
        }
    }

    fn require_quiet(&mut self, raised: Option<Raised>) -> Result<(), SnowballError> {
        match raised {
            None => Ok(()),
            Some(raised) => {
                let note = raised.message();
                self.fail_fatal(fatal(Verdict::SomethingThrown), Some(&note))
            }
        }
    }

    /// Requires `a > b`.
    pub fn require_greater<A, B>(&mut self, a: &A, b: &B) -> Result<(), SnowballError>
    where
        A: PartialOrd<B>,
    {
        self.require(a > b)
    }

    /// Requires `a < b`.
    pub fn require_smaller<A, B>(&mut self, a: &A, b: &B) -> Result<(), SnowballError>
    where
        A: PartialOrd<B>,
    {
        self.require(a < b)
    }

    /// Requires the caller supplied comparator to accept `(a, b)`.
    pub fn require_cmp<A, B, F>(&mut self, a: &A, b: &B, cmp: F) -> Result<(), SnowballError>
    where
        F: FnOnce(&A, &B) -> bool,
    {
        self.require(cmp(a, b))
    }

    /// Invokes a boolean `target`, echoes the result, then requires it.
    pub fn require_print<T, Args>(
        &mut self,
        mut target: T,
        args: Args,
    ) -> Result<(), SnowballError>
    where
        T: Invoke<Args, Output = bool>,
    {
        let outcome = target.invoke(args);
        self.print(outcome);
        self.require(outcome)
    }
}
