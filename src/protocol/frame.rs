use heapless::Vec;

use super::constants::*;
use crate::error::Error;

/// What a command byte announces, with the channel decoded for the
/// nibble-addressed commands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    AnalogIo(u8),
    DigitalIo(u8),
    ReportAnalog(u8),
    ReportDigital(u8),
    SetPinMode,
    SetPinValue,
    ProtocolVersion,
    SystemReset,
    SysexStart,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BodyLength {
    Fixed(u16),
    /// Runs until [`END_SYSEX`].
    Terminated,
}

impl Command {
    pub fn classify(byte: u8) -> Option<Self> {
        if !is_command(byte) {
            return None;
        }

        let channel = byte & CHANNEL_MASK;
        if high_nibble_eq(byte, ANALOG_MESSAGE) {
            return Some(Command::AnalogIo(channel));
        }
        if high_nibble_eq(byte, DIGITAL_MESSAGE) {
            return Some(Command::DigitalIo(channel));
        }
        if high_nibble_eq(byte, REPORT_ANALOG) {
            return Some(Command::ReportAnalog(channel));
        }
        if high_nibble_eq(byte, REPORT_DIGITAL) {
            return Some(Command::ReportDigital(channel));
        }

        match byte {
            SET_PIN_MODE => Some(Command::SetPinMode),
            SET_PIN_VALUE => Some(Command::SetPinValue),
            PROTOCOL_VERSION => Some(Command::ProtocolVersion),
            SYSTEM_RESET => Some(Command::SystemReset),
            START_SYSEX => Some(Command::SysexStart),
            _ => None,
        }
    }

    pub fn body_length(&self) -> BodyLength {
        match self {
            Command::AnalogIo(_) | Command::DigitalIo(_) | Command::SetPinMode | Command::SetPinValue => {
                BodyLength::Fixed(2)
            }
            Command::ReportAnalog(_) | Command::ReportDigital(_) => BodyLength::Fixed(1),
            Command::ProtocolVersion | Command::SystemReset => BodyLength::Fixed(0),
            Command::SysexStart => BodyLength::Terminated,
        }
    }
}

/// Decoder states. `Ready` holds only while a completed frame is being
/// dispatched.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Command,
    CommandData,
    Ready,
}

/// Assembles one frame at a time into a fixed-capacity buffer.
#[derive(Debug)]
pub struct FrameDecoder<const N: usize> {
    state: State,
    remaining: u16,
    sysex: bool,
    buf: Vec<u8, N>,
}

impl<const N: usize> FrameDecoder<N> {
    pub const fn new() -> Self {
        FrameDecoder {
            state: State::Command,
            remaining: 0,
            sysex: false,
            buf: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// The bytes buffered so far, command byte first.
    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn reset(&mut self) {
        self.state = State::Command;
        self.remaining = 0;
        self.sysex = false;
        self.buf.clear();
    }

    /// Consumes one byte. Returns `Ok(true)` once a complete frame is
    /// buffered; the caller must [`reset`](Self::reset) after handling it.
    /// On error the decoder is already reset.
    pub fn push(&mut self, byte: u8) -> Result<bool, Error> {
        let result = match self.state {
            State::Command => self.push_command(byte),
            State::CommandData => self.push_data(byte),
            State::Ready => Err(Error::UnsupportedCommand),
        };

        match result {
            Ok(()) => Ok(self.state == State::Ready),
            Err(e) => {
                error!("input error: {}, {:#x}", self.state, byte);
                self.reset();
                Err(e)
            }
        }
    }

    fn append(&mut self, byte: u8) -> Result<(), Error> {
        self.buf.push(byte).map_err(|_| Error::BufferFull)
    }

    fn push_command(&mut self, byte: u8) -> Result<(), Error> {
        let command = Command::classify(byte).ok_or(Error::UnsupportedCommand)?;

        match command.body_length() {
            BodyLength::Fixed(0) => {
                self.remaining = 0;
                self.state = State::Ready;
            }
            BodyLength::Fixed(len) => {
                self.remaining = len;
                self.state = State::CommandData;
            }
            BodyLength::Terminated => {
                self.remaining = 0;
                self.sysex = true;
                self.state = State::CommandData;
            }
        }

        debug!("valid cmd: {:#x}, remaining: {}", byte, self.remaining);
        self.append(byte)
    }

    fn push_data(&mut self, byte: u8) -> Result<(), Error> {
        if self.sysex && byte == END_SYSEX {
            self.append(byte)?;
            self.state = State::Ready;
            debug!("valid cmd: {:#x}", byte);
            return Ok(());
        }

        if is_command(byte) {
            return Err(Error::UnsupportedCommand);
        }

        self.append(byte)?;

        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.state = State::Ready;
            }
        }

        debug!("valid data: {:#x}, remaining: {}", byte, self.remaining);
        Ok(())
    }
}

impl<const N: usize> Default for FrameDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all<const N: usize>(decoder: &mut FrameDecoder<N>, bytes: &[u8]) -> Result<bool, Error> {
        let mut ready = false;
        for &byte in bytes {
            ready = decoder.push(byte)?;
        }
        Ok(ready)
    }

    #[test]
    fn classify_test() {
        assert_eq!(Command::classify(0xE3), Some(Command::AnalogIo(3)));
        assert_eq!(Command::classify(0x9F), Some(Command::DigitalIo(0x0F)));
        assert_eq!(Command::classify(0xC1), Some(Command::ReportAnalog(1)));
        assert_eq!(Command::classify(0xD2), Some(Command::ReportDigital(2)));
        assert_eq!(Command::classify(0xF4), Some(Command::SetPinMode));
        assert_eq!(Command::classify(0xF5), Some(Command::SetPinValue));
        assert_eq!(Command::classify(0xF9), Some(Command::ProtocolVersion));
        assert_eq!(Command::classify(0xFF), Some(Command::SystemReset));
        assert_eq!(Command::classify(0xF0), Some(Command::SysexStart));
        assert_eq!(Command::classify(0xF7), None);
        assert_eq!(Command::classify(0xA0), None);
        assert_eq!(Command::classify(0x7F), None);
    }

    #[test]
    fn body_length_test() {
        assert_eq!(Command::AnalogIo(0).body_length(), BodyLength::Fixed(2));
        assert_eq!(Command::ReportDigital(0).body_length(), BodyLength::Fixed(1));
        assert_eq!(Command::ProtocolVersion.body_length(), BodyLength::Fixed(0));
        assert_eq!(Command::SysexStart.body_length(), BodyLength::Terminated);
    }

    #[test]
    fn fixed_frame_test() {
        let mut decoder = FrameDecoder::<8>::new();
        assert_eq!(decoder.push(0xE3), Ok(false));
        assert_eq!(decoder.state(), State::CommandData);
        assert_eq!(decoder.remaining(), 2);
        assert_eq!(decoder.push(0x63), Ok(false));
        assert_eq!(decoder.remaining(), 1);
        assert_eq!(decoder.push(0x01), Ok(true));
        assert_eq!(decoder.state(), State::Ready);
        assert_eq!(decoder.frame(), &[0xE3, 0x63, 0x01]);
    }

    #[test]
    fn zero_body_frame_test() {
        let mut decoder = FrameDecoder::<8>::new();
        assert_eq!(decoder.push(0xF9), Ok(true));
        assert_eq!(decoder.frame(), &[0xF9]);
    }

    #[test]
    fn sysex_frame_test() {
        let mut decoder = FrameDecoder::<8>::new();
        assert_eq!(push_all(&mut decoder, &[0xF0, 0x71, 0x41, 0x00]), Ok(false));
        assert_eq!(decoder.state(), State::CommandData);
        assert_eq!(decoder.remaining(), 0);
        assert_eq!(decoder.push(0xF7), Ok(true));
        assert_eq!(decoder.frame(), &[0xF0, 0x71, 0x41, 0x00, 0xF7]);
    }

    #[test]
    fn terminator_is_data_error_outside_sysex_test() {
        let mut decoder = FrameDecoder::<8>::new();
        assert_eq!(decoder.push(0xE0), Ok(false));
        assert_eq!(decoder.push(0xF7), Err(Error::UnsupportedCommand));
        assert_eq!(decoder.state(), State::Command);
        assert_eq!(decoder.frame(), &[] as &[u8]);
    }

    #[test]
    fn data_byte_as_command_test() {
        let mut decoder = FrameDecoder::<8>::new();
        assert_eq!(decoder.push(0x42), Err(Error::UnsupportedCommand));
        assert_eq!(decoder.remaining(), 0);
        assert_eq!(decoder.frame().len(), 0);
        assert_eq!(decoder.push(0xF9), Ok(true));
    }

    #[test]
    fn overflow_test() {
        let mut decoder = FrameDecoder::<4>::new();
        assert_eq!(push_all(&mut decoder, &[0xF0, 0x71, 0x41, 0x00]), Ok(false));
        assert_eq!(decoder.push(0x42), Err(Error::BufferFull));
        assert_eq!(decoder.state(), State::Command);
        assert_eq!(decoder.frame().len(), 0);
    }

    #[test]
    fn overflow_on_terminator_test() {
        let mut decoder = FrameDecoder::<4>::new();
        assert_eq!(push_all(&mut decoder, &[0xF0, 0x71, 0x41, 0x00]), Ok(false));
        assert_eq!(decoder.push(0xF7), Err(Error::BufferFull));
        assert_eq!(decoder.state(), State::Command);
    }

    #[test]
    fn push_while_ready_test() {
        let mut decoder = FrameDecoder::<8>::new();
        assert_eq!(decoder.push(0xF9), Ok(true));
        assert_eq!(decoder.push(0xF9), Err(Error::UnsupportedCommand));
        assert_eq!(decoder.state(), State::Command);
    }
}
