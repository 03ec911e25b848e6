mod common;

use std::error::Error;

use proptest::prelude::*;
use snowball::{Bound, BoundWith, SnowballError};

use common::{
    captured_session, counting_hook, factorial, failure, never_throws, panics_sample,
    panics_text, throws_other, throws_sample, SampleError, Tally,
};

#[test]
fn factorial_scenario_stops_at_first_fatal_failure() -> Result<(), SnowballError> {
    let (mut session, out, err) = captured_session();
    session.test_case("Factorial test case");
    session.require_call(factorial, 1, (1,))?;
    session.require_call(factorial, 2, (2,))?;
    session.require_call(factorial, 6, (3,))?;

    let outcome = failure(session.require_call(factorial, 1, (0,)).unwrap_err());
    assert_eq!(outcome.kind, "require");
    assert_eq!(outcome.test_case.as_deref(), Some("Factorial test case"));
    assert_eq!(outcome.raised, None);
    assert_eq!(
        err.contents(),
        ":: Test case error...\n\
         [ Factorial test case ]\n\
         snowball require() failure: expected output was false.\n"
    );
    assert!(out.contents().is_empty());
    Ok(())
}

#[test]
fn every_tuple_is_judged() -> Result<(), SnowballError> {
    let (mut session, _, _) = captured_session();
    session.require_all(factorial, 1, [(1,), (1,)])?;
    assert!(session.require_all(factorial, 1, [(1,), (0,)]).is_err());
    session.require_false_all(factorial, 7, [(1,), (2,), (3,)])?;
    let outcome = failure(session.require_false_call(factorial, 6, (3,)).unwrap_err());
    assert_eq!(outcome.kind, "require_false");
    assert_eq!(outcome.message, "expected output was true.");
    Ok(())
}

#[test]
fn zero_tuples_pass_without_invoking() -> Result<(), SnowballError> {
    let (mut session, _, err) = captured_session();
    let mut calls = 0;
    session.require_all(
        |x: u32| {
            calls += 1;
            x
        },
        99,
        std::iter::empty::<(u32,)>(),
    )?;
    assert_eq!(calls, 0);
    assert!(err.contents().is_empty());
    Ok(())
}

#[test]
fn bound_method_result_is_compared() -> Result<(), SnowballError> {
    let (mut session, _, _) = captured_session();
    let mut tally = Tally::default();
    session.require_call(Bound::new(&mut tally, Tally::add), true, (5,))?;
    assert!(session
        .require_call(Bound::new(&mut tally, Tally::add), true, (-9,))
        .is_err());
    assert_eq!(tally.total(), -4);
    Ok(())
}

#[test]
fn getter_result_replaces_method_result() -> Result<(), SnowballError> {
    let (mut session, _, _) = captured_session();
    let mut tally = Tally::default();
    session.require_call(BoundWith::new(&mut tally, Tally::add, Tally::total), 5, (5,))?;
    session.require_all(
        BoundWith::new(&mut tally, Tally::add, Tally::total),
        5,
        [(0,), (0,)],
    )?;
    session.require_false_call(BoundWith::new(&mut tally, Tally::add, Tally::total), 5, (1,))?;
    assert_eq!(tally.total(), 6);
    Ok(())
}

#[test]
fn throw_accepts_panics_of_any_return_type() -> Result<(), SnowballError> {
    let (mut session, out, err) = captured_session();
    session.require_throw(panics_sample, ())?;
    session.require_throw(panics_text, ())?;
    session.require_throw(|values: &[u8]| values[3], (&[1u8, 2][..],))?;
    assert!(out.contents().is_empty());
    assert!(err.contents().is_empty());

    let outcome = failure(session.require_throw(|| vec![1u8], ()).unwrap_err());
    assert_eq!(outcome.kind, "require_throw");
    assert_eq!(outcome.message, "nothing was thrown.");
    Ok(())
}

#[test]
fn returning_err_is_not_a_panic() {
    let (mut session, _, _) = captured_session();
    assert!(session.require_nothrow(throws_sample, ()).is_ok());
    assert!(session.require_throw(throws_sample, ()).is_err());
}

#[test]
fn nothrow_accepts_any_return_type() -> Result<(), SnowballError> {
    let (mut session, _, _) = captured_session();
    let words = ["snow", "ball"];
    session.require_nothrow(|| vec![1u8, 2], ())?;
    session.require_nothrow(|| Option::<u8>::None, ())?;
    session.require_nothrow(Tally::default, ())?;
    session.require_nothrow(|| &words[1], ())?;
    session.require_nothrow(|| false, ())?;

    let outcome = failure(session.require_nothrow(panics_text, ()).unwrap_err());
    assert_eq!(outcome.kind, "require_nothrow");
    assert_eq!(outcome.raised.as_deref(), Some("sample panic"));
    Ok(())
}

#[test]
fn typed_throw_matches_panic_payload() -> Result<(), SnowballError> {
    let (mut session, out, err) = captured_session();
    session.require_throw_as::<SampleError, _>(panics_sample, ())?;
    assert_eq!(out.contents(), "snowball require_throw(): sample throw\n");
    assert!(err.contents().is_empty());

    let outcome = failure(
        session
            .require_throw_as::<SampleError, _>(panics_text, ())
            .unwrap_err(),
    );
    assert_eq!(outcome.message, "unexpected exception was thrown.");
    assert_eq!(outcome.raised.as_deref(), Some("sample panic"));
    Ok(())
}

#[test]
fn result_throw_accepts_err_and_panics() -> Result<(), SnowballError> {
    let (mut session, out, _) = captured_session();
    session.require_throw_result(throws_sample, ())?;
    session.require_throw_result(|| -> Result<(), String> { Err("text".into()) }, ())?;
    session.require_throw_result(|| -> Result<u8, Box<dyn Error>> { panic!("boom") }, ())?;
    assert!(out.contents().is_empty());

    let outcome = failure(session.require_throw_result(never_throws, ()).unwrap_err());
    assert_eq!(outcome.kind, "require_throw");
    assert_eq!(outcome.message, "nothing was thrown.");
    Ok(())
}

#[test]
fn typed_result_throw_echoes_caught_message() -> Result<(), SnowballError> {
    let (mut session, out, err) = captured_session();
    session.require_throw_result_as::<SampleError, _>(throws_sample, ())?;
    session.require_throw_result_as::<SampleError, _>(
        || -> Result<u8, Box<dyn Error>> { Err(Box::new(SampleError)) },
        (),
    )?;
    assert_eq!(
        out.contents(),
        "snowball require_throw(): sample throw\nsnowball require_throw(): sample throw\n"
    );
    assert!(err.contents().is_empty());
    Ok(())
}

#[test]
fn typed_result_throw_rejects_other_kinds() {
    let (mut session, _, err) = captured_session();
    let outcome = failure(
        session
            .require_throw_result_as::<SampleError, _>(throws_other, ())
            .unwrap_err(),
    );
    assert_eq!(outcome.message, "unexpected exception was thrown.");
    assert_eq!(outcome.raised.as_deref(), Some("other throw"));
    assert_eq!(
        err.contents(),
        "snowball require_throw() failure: unexpected exception was thrown.\n"
    );

    let outcome = failure(
        session
            .require_throw_result_as::<SampleError, _>(never_throws, ())
            .unwrap_err(),
    );
    assert_eq!(outcome.message, "nothing was thrown.");
}

#[test]
fn nothrow_result_rejects_err() -> Result<(), SnowballError> {
    let (mut session, _, _) = captured_session();
    session.require_nothrow_result(never_throws, ())?;
    session.require_nothrow_result(|| -> Result<Vec<u8>, String> { Ok(Vec::new()) }, ())?;

    let outcome = failure(session.require_nothrow_result(throws_sample, ()).unwrap_err());
    assert_eq!(outcome.kind, "require_nothrow");
    assert_eq!(outcome.raised.as_deref(), Some("sample throw"));
    Ok(())
}

#[test]
fn ordering_assertions() -> Result<(), SnowballError> {
    let (mut session, _, _) = captured_session();
    session.require_greater(&3, &2)?;
    session.require_smaller(&2.5, &3.0)?;
    session.require_cmp(&"abc", &"abd", |a, b| a < b)?;
    session.require_eq("snow", "snow")?;
    assert!(session.require_greater(&2, &2).is_err());
    assert!(session.require_smaller(&2, &2).is_err());
    assert!(session.require_cmp(&1, &2, |a, b| a == b).is_err());
    Ok(())
}

#[test]
fn require_hook_runs_once_per_fatal_failure() {
    let (mut session, _, _) = captured_session();
    let (require_hook, require_calls) = counting_hook();
    let (check_hook, check_calls) = counting_hook();
    session.require_callback(Some(require_hook));
    session.check_callback(Some(check_hook));

    assert!(session.require(false).is_err());
    assert_eq!(require_calls.get(), 1);
    assert_eq!(check_calls.get(), 0);

    let outcome = failure(session.error("custom failure").unwrap_err());
    assert_eq!(outcome.kind, "error");
    assert_eq!(outcome.message, "custom failure");
    assert_eq!(require_calls.get(), 2);
}

#[test]
fn require_print_echoes_outcome() -> Result<(), SnowballError> {
    let (mut session, out, _) = captured_session();
    session.require_print(|| true, ())?;
    assert!(session.require_print(|x: u8| x > 3, (1,)).is_err());
    assert_eq!(out.contents(), "snowball msg: true\nsnowball msg: false\n");
    Ok(())
}

#[test]
fn verify_debug_is_silent_in_debug_builds() {
    let (mut session, out, _) = captured_session();
    session.verify_debug();
    if cfg!(debug_assertions) {
        assert!(out.contents().is_empty());
    } else {
        assert!(out.contents().contains("wasn't* compiled in debug mode"));
    }
}

proptest! {
    #[test]
    fn require_and_require_false_disagree(input in 0u32..10, expected in 0u32..400_000) {
        let (mut session, _, _) = captured_session();
        let held = session.require_call(factorial, expected, (input,)).is_ok();
        let refuted = session.require_false_call(factorial, expected, (input,)).is_ok();
        prop_assert!(held != refuted);
    }
}
