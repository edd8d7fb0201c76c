// Byte values of the Firmata wire protocol.
// See https://github.com/firmata/protocol for the full command set.

pub const PROTOCOL_MAJOR_VERSION: u8 = 2;
pub const PROTOCOL_MINOR_VERSION: u8 = 6;

// --- Commands ---
// Analog, digital and report commands carry a channel in the low nibble.
pub const ANALOG_MESSAGE: u8 = 0xE0;
pub const DIGITAL_MESSAGE: u8 = 0x90;
pub const REPORT_ANALOG: u8 = 0xC0;
pub const REPORT_DIGITAL: u8 = 0xD0;
pub const START_SYSEX: u8 = 0xF0;
pub const SET_PIN_MODE: u8 = 0xF4;
pub const SET_PIN_VALUE: u8 = 0xF5;
pub const END_SYSEX: u8 = 0xF7;
pub const PROTOCOL_VERSION: u8 = 0xF9;
pub const SYSTEM_RESET: u8 = 0xFF;

pub const COMMAND_MASK: u8 = 0x80;
pub const CHANNEL_MASK: u8 = 0x0F;
pub const HIGH_NIBBLE_MASK: u8 = 0xF0;

// --- Sysex ids ---
pub const EXTENDED_ID: u8 = 0x00;
pub const ANALOG_MAPPING_QUERY: u8 = 0x69;
pub const ANALOG_MAPPING_RESPONSE: u8 = 0x6A;
pub const CAPABILITY_QUERY: u8 = 0x6B;
pub const CAPABILITY_RESPONSE: u8 = 0x6C;
pub const PIN_STATE_QUERY: u8 = 0x6D;
pub const PIN_STATE_RESPONSE: u8 = 0x6E;
pub const EXTENDED_ANALOG: u8 = 0x6F;
pub const STRING_DATA: u8 = 0x71;
pub const REPORT_FIRMWARE: u8 = 0x79;
pub const SAMPLING_INTERVAL: u8 = 0x7A;
pub const SYSEX_NON_REALTIME: u8 = 0x7E;
pub const SYSEX_REALTIME: u8 = 0x7F;

/// Ends the mode list of one pin in a capability response.
pub const CAPABILITY_SEPARATOR: u8 = 0x7F;
/// Analog mapping entry for a pin with no analog channel.
pub const NOT_ANALOG: u8 = 0x7F;
/// Highest channel number an analog mapping entry may carry.
pub const MAX_ANALOG_CHANNEL: u8 = 0x0F;

pub const DISABLE_REPORT: u8 = 0x00;
pub const ENABLE_REPORT: u8 = 0x01;

// --- Resolutions of pins in serial mode ---
pub const PIN_RES_SERIAL_RX0: u8 = 0x00;
pub const PIN_RES_SERIAL_TX0: u8 = 0x01;
pub const PIN_RES_SERIAL_RX1: u8 = 0x02;
pub const PIN_RES_SERIAL_TX1: u8 = 0x03;
pub const PIN_RES_SERIAL_RX2: u8 = 0x04;
pub const PIN_RES_SERIAL_TX2: u8 = 0x05;
pub const PIN_RES_SERIAL_RX3: u8 = 0x06;
pub const PIN_RES_SERIAL_TX3: u8 = 0x07;

/// Command byte test: is bit 7 set.
pub fn is_command(byte: u8) -> bool {
    byte & COMMAND_MASK != 0
}

/// Matches the nibble-addressed commands against their base value.
pub fn high_nibble_eq(byte: u8, base: u8) -> bool {
    byte & HIGH_NIBBLE_MASK == base
}
