use snowball::{Bound, BoundWith, SnowballError};
use snowball_demo::{start, Member};

fn returns_5() -> i32 {
    5
}

fn doesnt_throw() {}

fn all_zero(a: i32, b: i64, c: u8) -> bool {
    a == 0 && b == 0 && c == 0
}

fn main() -> Result<(), SnowballError> {
    let mut session = start()?;
    session.require_callback(Some(Box::new(|| println!("custom callback"))));

    session.test_case("Equality check by value");
    session.require_eq(&0, &0)?;

    session.test_case("Function calling");
    session.require_call(all_zero, true, (0, 0, 0))?;

    session.test_case("Function calling inline execution");
    session.require_call(returns_5, 5, ())?;

    session.test_case("Object testing");
    let mut object = Member::default();
    session.require_call(BoundWith::new(&mut object, Member::set, Member::get), 1, (1,))?;
    let expected = Member { member: 1 };
    session.require_call(Bound::new(&mut object, Member::set), expected, (1,))?;

    session.test_case("Checking if output is false");
    session.require_false_call(returns_5, 435, ())?;

    session.test_case("Checking if functions throw");
    session.require_throw(doesnt_throw, ())?;
    session.print("unreachable");
    Ok(())
}
