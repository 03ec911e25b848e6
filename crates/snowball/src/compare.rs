use crate::invoke::Invoke;

/// Invokes `target` once per tuple and returns whether every result equals
/// `expected`.
///
/// Evaluation stops at the first mismatch. With no tuples the result is
/// `true`: the empty conjunction holds.
pub fn matches_all<T, Args, E, I>(expected: &E, target: &mut T, tuples: I) -> bool
where
    T: Invoke<Args>,
    T::Output: PartialEq<E>,
    I: IntoIterator<Item = Args>,
{
    tuples
        .into_iter()
        .all(|args| target.invoke(args) == *expected)
}

/// Invokes `target` once per tuple and returns whether every result differs
/// from `expected`.
///
/// Evaluation stops at the first match. With no tuples the result is `true`.
pub fn mismatches_all<T, Args, E, I>(expected: &E, target: &mut T, tuples: I) -> bool
where
    T: Invoke<Args>,
    T::Output: PartialEq<E>,
    I: IntoIterator<Item = Args>,
{
    tuples
        .into_iter()
        .all(|args| target.invoke(args) != *expected)
}
