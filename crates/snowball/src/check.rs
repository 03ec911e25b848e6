//! `check*` methods mirror the fatal family but only report and run the
//! check hook; they never end the run.

use std::error::Error;
use std::iter;

use crate::compare::{matches_all, mismatches_all};
use crate::invoke::{Attempt, AttemptResult, Invoke, Raised};
use crate::report::{Family, FailureKind, Verdict};
use crate::session::Session;

const fn soft(verdict: Verdict) -> FailureKind {
    FailureKind::new(Family::Check, verdict)
}

impl Session {
    /// Checks that `condition` holds.
    pub fn check(&mut self, condition: bool) {
        if !condition {
            self.fail_soft(soft(Verdict::Mismatch), None);
        }
    }

    /// Checks `actual == expected`.
    pub fn check_eq<A, B>(&mut self, actual: &A, expected: &B)
    where
        A: PartialEq<B> + ?Sized,
        B: ?Sized,
    {
        self.check(actual == expected)
    }

    /// Checks that one invocation of `target` with `args` returns `expected`.
    pub fn check_call<T, Args, E>(&mut self, target: T, expected: E, args: Args)
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
    {
        self.check_all(target, expected, iter::once(args))
    }

    /// Checks that every tuple in `tuples` makes `target` return `expected`.
    pub fn check_all<T, Args, E, I>(&mut self, mut target: T, expected: E, tuples: I)
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
        I: IntoIterator<Item = Args>,
    {
        if !matches_all(&expected, &mut target, tuples) {
            self.fail_soft(soft(Verdict::Mismatch), None);
        }
    }

    /// Checks that one invocation of `target` with `args` differs from
    /// `expected`.
    pub fn check_false_call<T, Args, E>(&mut self, target: T, expected: E, args: Args)
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
    {
        self.check_false_all(target, expected, iter::once(args))
    }

    /// Checks that no tuple in `tuples` makes `target` return `expected`.
    pub fn check_false_all<T, Args, E, I>(&mut self, mut target: T, expected: E, tuples: I)
    where
        T: Invoke<Args>,
        T::Output: PartialEq<E>,
        I: IntoIterator<Item = Args>,
    {
        if !mismatches_all(&expected, &mut target, tuples) {
            self.fail_soft(soft(Verdict::Match), None);
        }
    }

    /// Checks that the invocation panics. The return type is unconstrained.
    pub fn check_throw<Args>(&mut self, mut target: impl Attempt<Args>, args: Args) {
        let raised = target.attempt(args).err();
        self.check_raised(raised);
    }

    /// Checks that the invocation panics with a payload of kind `X`, echoing
    /// its message when it does.
    pub fn check_throw_as<X, Args>(&mut self, mut target: impl Attempt<Args>, args: Args)
    where
        X: Error + 'static,
    {
        let raised = target.attempt(args).err();
        self.check_raised_as::<X>(raised);
    }

    /// Checks that the invocation completes without panicking.
    pub fn check_nothrow<Args>(&mut self, mut target: impl Attempt<Args>, args: Args) {
        let raised = target.attempt(args).err();
        self.check_quiet(raised);
    }

    /// Checks that a `Result` returning invocation returns `Err` or panics.
    pub fn check_throw_result<Args>(&mut self, mut target: impl AttemptResult<Args>, args: Args) {
        let raised = target.attempt_result(args);
        self.check_raised(raised);
    }

    /// Checks that a `Result` returning invocation raises an error of kind
    /// `X`, echoing its message when it does.
    pub fn check_throw_result_as<X, Args>(
        &mut self,
        mut target: impl AttemptResult<Args>,
        args: Args,
    ) where
        X: Error + 'static,
    {
        let raised = target.attempt_result(args);
        self.check_raised_as::<X>(raised);
    }

    /// Checks that a `Result` returning invocation returns `Ok` without
    /// panicking.
    pub fn check_nothrow_result<Args>(
        &mut self,
        mut target: impl AttemptResult<Args>,
        args: Args,
    ) {
        let raised = target.attempt_result(args);
        self.check_quiet(raised);
    }

    fn check_raised(&mut self, raised: Option<Raised>) {
        if raised.is_none() {
            self.fail_soft(soft(Verdict::NothingThrown), None);
        }
    }

    fn check_raised_as<X>(&mut self, raised: Option<Raised>)
    where
        X: Error + 'static,
    {
        let Some(raised) = raised else {
            self.fail_soft(soft(Verdict::NothingThrown), None);
            return;
        };
        match raised.downcast_ref::<X>() {
            Some(err) => {
                let message = err.to_string();
                self.reporter_mut().report_caught(Family::Check, &message);
            }
            None => {
                let note = raised.message();
                self.fail_soft(soft(Verdict::UnexpectedKind), Some(&note));
            }
        }
    }

    fn check_quiet(&mut self, raised: Option<Raised>) {
        if let Some(raised) = raised {
            let note = raised.message();
            self.fail_soft(soft(Verdict::SomethingThrown), Some(&note));
        }
    }
}
