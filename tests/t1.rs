use anyhow::Result;
use ednish::read::{read_all, write_all};

const INPUT: &str = include_str!("t-input.edn");
const EXPECTED: &str = include_str!("t-expected.edn");

#[test]
fn t1() -> Result<()> {
    let vals = read_all(INPUT)?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &vals)?;
    assert_eq!(std::str::from_utf8(&out)?, EXPECTED);
    Ok(())
}
