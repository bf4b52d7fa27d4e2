use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The clock arithmetic itself is total; only the hardware boundary and the fixed-capacity
/// text buffer can fail.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Error setting output state")]
    CannotSetOutputState,

    #[display("Error reading input state")]
    CannotReadInput,

    #[display("Index out of bounds")]
    IndexOutOfBounds,

    #[display("Spoken time does not fit its buffer")]
    SpokenTimeOverflow,
}

// `heapless` reports a full buffer as `()`.
impl From<()> for Error {
    fn from(_: ()) -> Self {
        Self::SpokenTimeOverflow
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
