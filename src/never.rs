/// Stable stand-in for the `!` type. `Result<Never>` is the return type of loops that only
/// ever stop with an error.
#[derive(Debug)]
pub enum Never {}
