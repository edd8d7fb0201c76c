use crate::context::Context;
use crate::error::Error;
use crate::protocol::constants::*;
use crate::protocol::encoding::{encode14, AnalogMessage, DigitalMessage, Encodable};
use crate::protocol::types::PinCapability;

impl<U, const IN: usize, const OUT: usize> Context<U, IN, OUT> {
    /// Passes `bytes` straight to the output callback, bypassing the output
    /// buffer. The caller is responsible for the message format.
    pub fn output(&mut self, bytes: &[u8]) {
        if let Some(output) = self.callbacks.output {
            if output(bytes, &mut self.user_data).is_err() {
                warn!("output rejected {} bytes", bytes.len());
            }
        }
    }

    fn flush_output(&mut self) {
        if self.output_buf.is_empty() {
            return;
        }

        if let Some(output) = self.callbacks.output {
            if output(&self.output_buf[..], &mut self.user_data).is_err() {
                warn!("output rejected {} bytes", self.output_buf.len());
            }
        }
        self.output_buf.clear();
    }

    fn append_output(&mut self, byte: u8) -> Result<(), Error> {
        if self.output_buf.is_full() {
            self.flush_output();
        }
        self.output_buf.push(byte).map_err(|_| Error::BufferFull)
    }

    fn append_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        bytes.iter().try_for_each(|&byte| self.append_output(byte))
    }

    fn output_message<E: Encodable>(&mut self, message: &E) -> Result<(), Error> {
        let mut buf = [0u8; 3];
        let encoded = message.encode(&mut buf)?;
        self.append_all(encoded)?;
        self.flush_output();
        Ok(())
    }

    /// Reports the value of an analog pin. `pin` must fit in a nibble and
    /// `value` in 14 bits; nothing is sent otherwise.
    pub fn output_analog_msg(&mut self, pin: u8, value: u16) -> Result<(), Error> {
        self.output_message(&AnalogMessage { pin, value })
    }

    /// Reports the pin bitmask of a digital port. Same limits as
    /// [`output_analog_msg`](Self::output_analog_msg).
    pub fn output_digital_msg(&mut self, port: u8, value: u16) -> Result<(), Error> {
        self.output_message(&DigitalMessage { port, value })
    }

    /// Sends `string` as a string-data SysEx, each byte split into a 7-bit
    /// pair.
    pub fn output_string_data(&mut self, string: &str) -> Result<(), Error> {
        if string.is_empty() {
            return Err(Error::InvalidArgument);
        }

        // START_SYSEX, STRING_DATA, 2 bytes per character, END_SYSEX
        self.append_all(&[START_SYSEX, STRING_DATA])?;
        for byte in string.bytes() {
            let mut pair = [0u8; 2];
            encode14(&mut pair, 0, u16::from(byte))?;
            self.append_all(&pair)?;
        }
        self.append_output(END_SYSEX)?;

        self.flush_output();
        Ok(())
    }

    /// Answers a capability query.
    ///
    /// Records for the same pin must be adjacent; each change of pin number
    /// closes the previous pin's mode list with a separator.
    pub fn output_capability_response(&mut self, caps: &[PinCapability]) -> Result<(), Error> {
        let first = caps.first().ok_or(Error::InvalidArgument)?;

        // START_SYSEX, CAPABILITY_RESPONSE, (mode, resolution)* per pin each
        // followed by a separator, END_SYSEX
        self.append_all(&[START_SYSEX, CAPABILITY_RESPONSE])?;

        let mut current_pin = first.pin;
        for cap in caps {
            if cap.pin != current_pin {
                self.append_output(CAPABILITY_SEPARATOR)?;
                current_pin = cap.pin;
            }
            self.append_all(&[cap.mode.encoded_as_byte(), cap.resolution])?;
        }

        self.append_all(&[CAPABILITY_SEPARATOR, END_SYSEX])?;

        self.flush_output();
        Ok(())
    }

    /// Answers an analog mapping query. `map[pin]` is the analog channel of
    /// `pin`, or [`NOT_ANALOG`].
    ///
    /// Entries are checked as they are written. A bad entry stops the message
    /// with `InvalidArgument`; chunks already flushed to the output callback
    /// stay sent and whatever is still buffered is dropped.
    pub fn output_analog_mapping_response(&mut self, map: &[u8]) -> Result<(), Error> {
        if map.is_empty() {
            return Err(Error::InvalidArgument);
        }

        self.append_all(&[START_SYSEX, ANALOG_MAPPING_RESPONSE])?;

        for &channel in map {
            if channel != NOT_ANALOG && channel > MAX_ANALOG_CHANNEL {
                error!("invalid analog mapping entry: {:#x}", channel);
                self.output_buf.clear();
                return Err(Error::InvalidArgument);
            }
            self.append_output(channel)?;
        }

        self.append_output(END_SYSEX)?;

        self.flush_output();
        Ok(())
    }
}
