#![allow(dead_code)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use snowball::{
    AssertionFailure, Hook, NoopCapture, Session, SessionConfig, SharedBuffer, SnowballError,
};

/// Session configured to raise, with both streams captured.
pub fn captured_session() -> (Session, SharedBuffer, SharedBuffer) {
    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    let session = Session::builder()
        .config(SessionConfig::embedded())
        .stdout(out.clone())
        .stderr(err.clone())
        .stack_capture(NoopCapture)
        .build();
    (session, out, err)
}

/// Unwraps the payload of a failed fatal assertion.
pub fn failure(err: SnowballError) -> AssertionFailure {
    match err {
        SnowballError::Assertion(failure) => failure,
        other => panic!("expected an assertion failure, got {other:?}"),
    }
}

/// Hook that counts its invocations.
pub fn counting_hook() -> (Hook, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let hook: Hook = Box::new(move || counter.set(counter.get() + 1));
    (hook, calls)
}

pub fn factorial(number: u32) -> u32 {
    if number <= 1 {
        number
    } else {
        factorial(number - 1) * number
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SampleError;

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample throw")
    }
}

impl std::error::Error for SampleError {}

#[derive(Debug, PartialEq, Eq)]
pub struct OtherError;

impl fmt::Display for OtherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "other throw")
    }
}

impl std::error::Error for OtherError {}

pub fn throws_sample() -> Result<(), SampleError> {
    Err(SampleError)
}

pub fn throws_other() -> Result<(), OtherError> {
    Err(OtherError)
}

pub fn never_throws() -> Result<u8, SampleError> {
    Ok(1)
}

pub fn panics_sample() -> Vec<u8> {
    std::panic::panic_any(SampleError)
}

pub fn panics_text() -> Option<&'static str> {
    panic!("sample panic")
}

/// Object fixture with a mutating method and a getter.
#[derive(Debug, Default)]
pub struct Tally {
    total: i64,
}

impl Tally {
    pub fn add(&mut self, by: i64) -> bool {
        self.total += by;
        self.total > 0
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}
