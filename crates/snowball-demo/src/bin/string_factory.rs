use snowball::{Bound, SnowballError};
use snowball_demo::{start, StringFactory};

fn main() -> Result<(), SnowballError> {
    let mut session = start()?;
    session.verify_debug();
    session.test_case("String factory test");
    let mut factory = StringFactory::default();
    for _ in 0..1000 {
        session.check_call(Bound::new(&mut factory, StringFactory::append), true, ("Test",));
    }

    session.test_case("Checking at() accesses:");
    session.check_nothrow_result(Bound::new(&mut factory, StringFactory::at), (0,));
    let first = factory.at(0).unwrap_or_default();
    session.check(first == "Test");
    session.check(first == "tseT");
    for index in [10, 20, 60, 2 << 20] {
        session.check_nothrow_result(Bound::new(&mut factory, StringFactory::at), (index,));
    }

    session.test_case("Checking invert():");
    session.check_nothrow(Bound::new(&mut factory, StringFactory::invert), ());
    Ok(())
}
