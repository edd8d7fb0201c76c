use thiserror::Error;

/// Failures returned by the decoder, the dispatchers and the output encoders.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A required context or handler table was absent.
    #[error("null reference")]
    NullReference,
    /// The byte is not a command this engine understands, or a data byte had
    /// bit 7 set.
    #[error("unsupported command")]
    UnsupportedCommand,
    /// A complete frame had the wrong shape for its command.
    #[error("invalid frame")]
    InvalidFrame,
    /// A 14-bit pair would fall outside the buffer.
    #[error("offset out of bounds")]
    OutOfBounds,
    /// The input buffer cannot hold another byte of the current frame.
    #[error("buffer full")]
    BufferFull,
    /// An encoder argument is outside the range the wire format can carry.
    #[error("invalid argument")]
    InvalidArgument,
}

/// Returned by handlers. The engine never inspects it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CallbackError;

pub type CallbackResult = Result<(), CallbackError>;
