#![cfg_attr(not(test), no_std)]

//! firmata
//!
//! Device-side engine for the [Firmata](https://github.com/firmata/protocol)
//! protocol, version 2.6. A host uses Firmata to query and drive the I/O pins
//! of a board over any byte stream.
//!
//! It is intended for use on embedded hardware, and as such is `no_std` and
//! never allocates: both the input and the output buffer are fixed-capacity
//! and live inside the [`Context`].
//!
//! There is no transport here. Feed received bytes to [`Context::feed`] one at
//! a time; complete frames are decoded and handed to the callbacks you
//! attached. Outbound messages are written to a bounded buffer and passed to
//! your output callback in chunks. [`interface`] has ready-made glue for
//! `embedded-hal` serial ports.
//!
//! ## General Usage
//!
//! Handle incoming frames:
//!
//! ```
//! use firmata::{Callbacks, CallbackResult, Context};
//!
//! #[derive(Default)]
//! struct Board {
//!     analog: [u16; 16],
//! }
//!
//! fn analog_write(ctx: &mut Context<Board>, _cmd: u8, pin: u8, value: u16) -> CallbackResult {
//!     ctx.user_data_mut().analog[pin as usize] = value;
//!     Ok(())
//! }
//!
//! let mut ctx = Context::new(Board::default());
//!
//! let mut callbacks: Callbacks<Board> = Callbacks::new();
//! callbacks.analog_io = Some(analog_write);
//! ctx.attach_callbacks(&callbacks);
//!
//! // Analog I/O message for pin 3
//! //
//! //       ---- 0xE0 | pin
//! //       ||||  ---------- value 0xE3 as two 7-bit bytes, lsb first
//! //       ||||  ||||  ||||
//! ctx.feed_all(&[0xE3, 0x63, 0x01]).unwrap();
//!
//! assert_eq!(ctx.user_data().analog[3], 0xE3);
//! ```
//!
//! Answer a capability query:
//!
//! ```
//! use firmata::{Callbacks, CallbackResult, Context, PinCapability, PinMode};
//!
//! static CAPS: [PinCapability; 3] = [
//!     PinCapability::new(0, PinMode::Input, 1),
//!     PinCapability::new(0, PinMode::Output, 1),
//!     PinCapability::new(1, PinMode::Analog, 10),
//! ];
//!
//! fn collect(bytes: &[u8], sent: &mut Vec<u8>) -> CallbackResult {
//!     sent.extend_from_slice(bytes);
//!     Ok(())
//! }
//!
//! fn capabilities(ctx: &mut Context<Vec<u8>>, _cmd: u8, _id: u8) -> CallbackResult {
//!     ctx.output_capability_response(&CAPS).map_err(|_| firmata::CallbackError)
//! }
//!
//! let mut ctx = Context::new(Vec::new());
//!
//! let mut callbacks: Callbacks<Vec<u8>> = Callbacks::new();
//! callbacks.output = Some(collect);
//! callbacks.capability_query = Some(capabilities);
//! ctx.attach_callbacks(&callbacks);
//!
//! ctx.feed_all(&[0xF0, 0x6B, 0xF7]).unwrap();
//!
//! assert_eq!(
//!     // Header
//!     &[ 0xF0, 0x6C,
//!
//!     // Pin 0: INPUT/1, OUTPUT/1, separator
//!        0x00, 0x01, 0x01, 0x01, 0x7F,
//!
//!     // Pin 1: ANALOG/10, separator
//!        0x02, 0x0A, 0x7F,
//!
//!     // Footer
//!        0xF7 ][..],
//!     &ctx.user_data()[..]);
//! ```

#[macro_use]
mod fmt;

mod context;
mod decoder;
mod dispatch;
mod error;
pub mod interface;
mod output;
pub mod protocol;

pub use context::{
    Callbacks, CommandCallback, Context, IoCallback, OutputCallback, DEFAULT_INPUT_CAPACITY,
    DEFAULT_OUTPUT_CAPACITY,
};
pub use error::{CallbackError, CallbackResult, Error};

#[doc(inline)]
pub use protocol::*;
