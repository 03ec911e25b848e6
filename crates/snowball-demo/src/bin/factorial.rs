use snowball::SnowballError;
use snowball_demo::{factorial, start};

fn main() -> Result<(), SnowballError> {
    let mut session = start()?;
    session.test_case("Factorial test case");
    session.require_call(factorial, 1, (1,))?;
    session.require_call(factorial, 2, (2,))?;
    session.require_call(factorial, 6, (3,))?;
    session.require_call(factorial, 3_628_800, (10,))?;
    // factorial(0) is 0 here, so this ends the run
    session.require_call(factorial, 1, (0,))?;
    session.print("unreachable");
    Ok(())
}
