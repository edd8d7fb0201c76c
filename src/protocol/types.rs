#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Digital input
    Input   = 0x00,
    /// Digital output
    Output  = 0x01,
    /// Analog input
    Analog  = 0x02,
    Pwm     = 0x03,
    Servo   = 0x04,
    Shift   = 0x05,
    I2c     = 0x06,
    OneWire = 0x07,
    Stepper = 0x08,
    Encoder = 0x09,
    Serial  = 0x0a,
    Pullup  = 0x0b,
}

impl PinMode {
    pub fn encoded_as_byte(&self) -> u8 {
        *self as u8
    }
}

/// The byte is not a known pin mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UnknownPinMode(pub u8);

impl TryFrom<u8> for PinMode {
    type Error = UnknownPinMode;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x00 => Ok(PinMode::Input),
            0x01 => Ok(PinMode::Output),
            0x02 => Ok(PinMode::Analog),
            0x03 => Ok(PinMode::Pwm),
            0x04 => Ok(PinMode::Servo),
            0x05 => Ok(PinMode::Shift),
            0x06 => Ok(PinMode::I2c),
            0x07 => Ok(PinMode::OneWire),
            0x08 => Ok(PinMode::Stepper),
            0x09 => Ok(PinMode::Encoder),
            0x0a => Ok(PinMode::Serial),
            0x0b => Ok(PinMode::Pullup),
            other => Err(UnknownPinMode(other)),
        }
    }
}

/// One mode a pin supports.
///
/// A pin supporting several modes is described by consecutive records with
/// the same `pin`. `resolution` is the bit width of the mode (10 for a 10-bit
/// analog input, 1 for digital), or one of the `PIN_RES_SERIAL_*` constants
/// for [`PinMode::Serial`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinCapability {
    pub pin: u8,
    pub mode: PinMode,
    pub resolution: u8,
}

impl PinCapability {
    pub const fn new(pin: u8, mode: PinMode, resolution: u8) -> Self {
        PinCapability { pin, mode, resolution }
    }
}
