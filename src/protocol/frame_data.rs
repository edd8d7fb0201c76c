use combine::{any, eof, token, Parser};

use super::constants::*;
use super::encoding::decode14;
use super::frame::Command;
use crate::error::Error;

/// The fields of one complete inbound frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    AnalogIo { command: u8, channel: u8, value: u16 },
    DigitalIo { command: u8, channel: u8, value: u16 },
    ReportAnalog { command: u8, channel: u8, enabled: u16 },
    ReportDigital { command: u8, channel: u8, enabled: u16 },
    SetPinMode { command: u8, pin: u8, mode: u16 },
    SetPinValue { command: u8, pin: u8, value: u16 },
    ProtocolVersion,
    AnalogMappingQuery { command: u8, id: u8 },
    CapabilityQuery { command: u8, id: u8 },
}

fn byte<'a>() -> impl Parser<&'a [u8], Output = u8> {
    any()
}

fn widened<'a>() -> impl Parser<&'a [u8], Output = u16> {
    any().map(u16::from)
}

// Sub-id and terminator, nothing in between.
fn query_tail<'a>() -> impl Parser<&'a [u8], Output = ()> {
    (any(), token(END_SYSEX)).map(|_| ())
}

// Runs `parser` over the whole of `body`, rejecting trailing bytes.
fn parse_all<'a, P>(parser: P, body: &'a [u8]) -> Result<P::Output, Error>
where
    P: Parser<&'a [u8]>,
{
    parser
        .skip(eof())
        .parse(body)
        .map(|(output, _)| output)
        .map_err(|_| Error::InvalidFrame)
}

impl Message {
    /// Interprets a frame as assembled by the decoder: command byte first,
    /// then its body.
    pub fn parse(frame: &[u8]) -> Result<Self, Error> {
        let (&command, body) = frame.split_first().ok_or(Error::InvalidFrame)?;

        match Command::classify(command) {
            Some(Command::AnalogIo(channel)) => {
                let value = decode14(frame, 1)?;
                Ok(Message::AnalogIo { command, channel, value })
            }
            Some(Command::DigitalIo(channel)) => {
                let value = decode14(frame, 1)?;
                Ok(Message::DigitalIo { command, channel, value })
            }
            Some(Command::ReportAnalog(channel)) => {
                let enabled = parse_all(widened(), body)?;
                Ok(Message::ReportAnalog { command, channel, enabled })
            }
            Some(Command::ReportDigital(channel)) => {
                let enabled = parse_all(widened(), body)?;
                Ok(Message::ReportDigital { command, channel, enabled })
            }
            Some(Command::SetPinMode) => {
                let (pin, mode) = parse_all((byte(), widened()), body)?;
                Ok(Message::SetPinMode { command, pin, mode })
            }
            Some(Command::SetPinValue) => {
                let (pin, value) = parse_all((byte(), widened()), body)?;
                Ok(Message::SetPinValue { command, pin, value })
            }
            Some(Command::ProtocolVersion) => Ok(Message::ProtocolVersion),
            Some(Command::SysexStart) => Self::parse_sysex(command, body),
            Some(Command::SystemReset) | None => Err(Error::UnsupportedCommand),
        }
    }

    // `body` is everything after START_SYSEX, terminator included.
    fn parse_sysex(command: u8, body: &[u8]) -> Result<Self, Error> {
        let id = *body.first().ok_or(Error::InvalidFrame)?;

        match id {
            ANALOG_MAPPING_QUERY => {
                parse_all(query_tail(), body)?;
                Ok(Message::AnalogMappingQuery { command, id })
            }
            CAPABILITY_QUERY => {
                parse_all(query_tail(), body)?;
                Ok(Message::CapabilityQuery { command, id })
            }
            _ => Err(Error::UnsupportedCommand),
        }
    }
}
