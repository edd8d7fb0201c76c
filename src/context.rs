use heapless::Vec;

use crate::error::CallbackResult;
use crate::protocol::frame::{FrameDecoder, State};

pub const DEFAULT_INPUT_CAPACITY: usize = 64;
pub const DEFAULT_OUTPUT_CAPACITY: usize = 64;

/// Receives every outbound chunk. One logical message may arrive over several
/// calls.
pub type OutputCallback<U> = fn(&[u8], &mut U) -> CallbackResult;

/// Called with `(command, channel, value)`. For the pin commands the channel
/// is the pin number.
pub type IoCallback<U, const IN: usize, const OUT: usize> =
    fn(&mut Context<U, IN, OUT>, u8, u8, u16) -> CallbackResult;

/// Called with `(command, sysex_id)`.
pub type CommandCallback<U, const IN: usize, const OUT: usize> =
    fn(&mut Context<U, IN, OUT>, u8, u8) -> CallbackResult;

/// The handler table. An empty slot makes its command a no-op.
pub struct Callbacks<U, const IN: usize = DEFAULT_INPUT_CAPACITY, const OUT: usize = DEFAULT_OUTPUT_CAPACITY> {
    pub output: Option<OutputCallback<U>>,
    /// Analog I/O message (0xE0)
    pub analog_io: Option<IoCallback<U, IN, OUT>>,
    /// Digital I/O message (0x90)
    pub digital_io: Option<IoCallback<U, IN, OUT>>,
    /// Report analog pin (0xC0)
    pub report_analog: Option<IoCallback<U, IN, OUT>>,
    /// Report digital port (0xD0)
    pub report_digital: Option<IoCallback<U, IN, OUT>>,
    /// Set pin mode (0xF4)
    pub set_pin_mode: Option<IoCallback<U, IN, OUT>>,
    /// Set digital pin value (0xF5)
    pub set_pin_value: Option<IoCallback<U, IN, OUT>>,
    /// Analog mapping query (0xF0 0x69)
    pub analog_mapping_query: Option<CommandCallback<U, IN, OUT>>,
    /// Capability query (0xF0 0x6B)
    pub capability_query: Option<CommandCallback<U, IN, OUT>>,
}

impl<U, const IN: usize, const OUT: usize> Callbacks<U, IN, OUT> {
    pub const fn new() -> Self {
        Callbacks {
            output: None,
            analog_io: None,
            digital_io: None,
            report_analog: None,
            report_digital: None,
            set_pin_mode: None,
            set_pin_value: None,
            analog_mapping_query: None,
            capability_query: None,
        }
    }
}

impl<U, const IN: usize, const OUT: usize> Default for Callbacks<U, IN, OUT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, const IN: usize, const OUT: usize> Clone for Callbacks<U, IN, OUT> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U, const IN: usize, const OUT: usize> Copy for Callbacks<U, IN, OUT> {}

/// All state of one Firmata connection.
///
/// `IN` bounds the longest inbound frame, SysEx terminator included. `OUT` is
/// the size of the chunks handed to the output callback. Neither buffer ever
/// grows.
pub struct Context<U, const IN: usize = DEFAULT_INPUT_CAPACITY, const OUT: usize = DEFAULT_OUTPUT_CAPACITY> {
    pub(crate) callbacks: Callbacks<U, IN, OUT>,
    pub(crate) user_data: U,
    pub(crate) decoder: FrameDecoder<IN>,
    pub(crate) output_buf: Vec<u8, OUT>,
}

impl<U, const IN: usize, const OUT: usize> Context<U, IN, OUT> {
    const CAPACITY_CHECK: () = {
        assert!(IN >= 3, "the minimum input buffer size is 3");
        assert!(OUT >= 2, "the minimum output buffer size is 2");
    };

    pub fn new(user_data: U) -> Self {
        let () = Self::CAPACITY_CHECK;

        Context {
            callbacks: Callbacks::new(),
            user_data,
            decoder: FrameDecoder::new(),
            output_buf: Vec::new(),
        }
    }

    /// Returns the engine to its freshly-built state: decoder idle, both
    /// buffers empty, no handlers attached. The user data is kept.
    pub fn init(&mut self) {
        self.callbacks = Callbacks::new();
        self.decoder.reset();
        self.output_buf.clear();
    }

    /// Drops a partially received frame, for example after the transport
    /// reconnects. Handlers stay attached.
    pub fn reset_decoder(&mut self) {
        self.decoder.reset();
    }

    /// Replaces the whole handler table.
    pub fn attach_callbacks(&mut self, callbacks: &Callbacks<U, IN, OUT>) {
        self.callbacks = *callbacks;
    }

    pub fn callbacks(&self) -> &Callbacks<U, IN, OUT> {
        &self.callbacks
    }

    pub fn state(&self) -> State {
        self.decoder.state()
    }

    /// Body bytes still expected by a fixed-length frame.
    pub fn remaining(&self) -> u16 {
        self.decoder.remaining()
    }

    /// Bytes of the current frame received so far.
    pub fn input_len(&self) -> usize {
        self.decoder.frame().len()
    }

    /// Bytes buffered for output but not yet flushed.
    pub fn pending_output(&self) -> usize {
        self.output_buf.len()
    }

    pub fn user_data(&self) -> &U {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut U {
        &mut self.user_data
    }

    pub fn into_user_data(self) -> U {
        self.user_data
    }
}

impl<U: Default, const IN: usize, const OUT: usize> Default for Context<U, IN, OUT> {
    fn default() -> Self {
        Self::new(U::default())
    }
}
