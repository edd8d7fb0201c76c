use super::constants::*;
use crate::error::Error;

const LSB_MASK: u16 = 0x7F;
const MSB_SHIFT: u16 = 7;

/// Largest value a 14-bit pair can carry.
pub const MAX_14BIT: u16 = 0x3FFF;

fn pair_in_bounds(len: usize, offset: usize) -> bool {
    match offset.checked_add(1) {
        Some(second) => second < len,
        None => false,
    }
}

/// Reads the 7-bit pair at `offset` as `(msb << 7) | lsb`.
pub fn decode14(buf: &[u8], offset: usize) -> Result<u16, Error> {
    if !pair_in_bounds(buf.len(), offset) {
        return Err(Error::OutOfBounds);
    }

    let lsb = buf[offset] as u16;
    let msb = buf[offset + 1] as u16;
    Ok((msb << MSB_SHIFT) | lsb)
}

/// Writes `value` as two 7-bit bytes, least significant first. Bits above
/// the 14th are masked off.
pub fn encode14(buf: &mut [u8], offset: usize, value: u16) -> Result<(), Error> {
    if !pair_in_bounds(buf.len(), offset) {
        return Err(Error::OutOfBounds);
    }

    buf[offset] = (value & LSB_MASK) as u8;
    buf[offset + 1] = ((value >> MSB_SHIFT) & LSB_MASK) as u8;
    Ok(())
}

pub trait Encodable {
    fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], Error>;
}

fn encode_status<'a>(command: u8, channel: u8, value: u16, into: &'a mut [u8]) -> Result<&'a [u8], Error> {
    if channel > CHANNEL_MASK || value > MAX_14BIT {
        return Err(Error::InvalidArgument);
    }
    if into.len() != 3 {
        return Err(Error::OutOfBounds);
    }

    into[0] = command | channel;
    encode14(into, 1, value)?;
    Ok(into)
}

/// Reports the value of one analog pin: `0xE0 | pin, lsb, msb`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AnalogMessage {
    pub pin: u8,
    pub value: u16,
}

impl Encodable for AnalogMessage {
    fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], Error> {
        encode_status(ANALOG_MESSAGE, self.pin, self.value, into)
    }
}

/// Reports the pin bitmask of one digital port: `0x90 | port, lsb, msb`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DigitalMessage {
    pub port: u8,
    pub value: u16,
}

impl Encodable for DigitalMessage {
    fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], Error> {
        encode_status(DIGITAL_MESSAGE, self.port, self.value, into)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ProtocolVersionReply;

impl Encodable for ProtocolVersionReply {
    fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], Error> {
        if into.len() != 3 {
            return Err(Error::OutOfBounds);
        }

        into[0] = PROTOCOL_VERSION;
        into[1] = PROTOCOL_MAJOR_VERSION;
        into[2] = PROTOCOL_MINOR_VERSION;
        Ok(into)
    }
}
