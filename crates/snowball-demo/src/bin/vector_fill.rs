use snowball::SnowballError;
use snowball_demo::{fill_vec, start, verify_vec};

fn main() -> Result<(), SnowballError> {
    let mut session = start()?;
    session.verify_debug();
    session.test_case("Vector fill test");
    let mut values = vec![0i32; 1024];
    session.require_nothrow(fill_vec, (values.as_mut_slice(),))?;
    session.require_call(verify_vec, true, (values.as_slice(),))?;
    session.require_throw(|index: usize| values[index], (values.len(),))?;
    Ok(())
}
