use std::fmt;

/// Errors produced when building networks or targeting devices.
#[derive(Debug)]
pub enum Error {
    /// An activation name outside the fixed lookup table.
    UnknownActivation(String),

    /// An accelerator operation was requested but no adapter is present.
    NoAccelerator,

    /// An accelerator index beyond the enumerated adapters.
    AcceleratorIndex {
        /// Index asked for.
        requested: usize,
        /// Number of adapters actually present.
        available: usize,
    },

    /// The adapter refused to hand out a device.
    Accelerator(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownActivation(name) => write!(f, "unknown activation: {name}"),
            Error::NoAccelerator => write!(f, "no accelerator present"),
            Error::AcceleratorIndex {
                requested,
                available,
            } => {
                write!(
                    f,
                    "accelerator index out of range: requested {requested}, {available} available"
                )
            }
            Error::Accelerator(msg) => write!(f, "accelerator error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
