pub mod constants;
pub mod encoding;
pub mod frame;
pub mod frame_data;
pub mod types;

pub use encoding::{decode14, encode14, AnalogMessage, DigitalMessage, Encodable, ProtocolVersionReply};
pub use frame::{BodyLength, Command, FrameDecoder, State};
pub use frame_data::Message;
pub use types::{PinCapability, PinMode, UnknownPinMode};
