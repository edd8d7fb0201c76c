use crate::context::{CommandCallback, Context, IoCallback};
use crate::error::Error;
use crate::protocol::encoding::{Encodable, ProtocolVersionReply};
use crate::protocol::frame_data::Message;

impl<U, const IN: usize, const OUT: usize> Context<U, IN, OUT> {
    /// Hands the completed frame in the input buffer to its handler.
    pub(crate) fn dispatch(&mut self) -> Result<(), Error> {
        let message = Message::parse(self.decoder.frame())?;
        debug!("dispatch: {}", message);

        match message {
            Message::AnalogIo { command, channel, value } => {
                self.call_io(self.callbacks.analog_io, command, channel, value)
            }
            Message::DigitalIo { command, channel, value } => {
                self.call_io(self.callbacks.digital_io, command, channel, value)
            }
            Message::ReportAnalog { command, channel, enabled } => {
                self.call_io(self.callbacks.report_analog, command, channel, enabled)
            }
            Message::ReportDigital { command, channel, enabled } => {
                self.call_io(self.callbacks.report_digital, command, channel, enabled)
            }
            Message::SetPinMode { command, pin, mode } => {
                self.call_io(self.callbacks.set_pin_mode, command, pin, mode)
            }
            Message::SetPinValue { command, pin, value } => {
                self.call_io(self.callbacks.set_pin_value, command, pin, value)
            }
            Message::ProtocolVersion => {
                let mut reply = [0u8; 3];
                let reply = ProtocolVersionReply.encode(&mut reply)?;
                self.output(reply);
            }
            Message::AnalogMappingQuery { command, id } => {
                self.call_command(self.callbacks.analog_mapping_query, command, id)
            }
            Message::CapabilityQuery { command, id } => {
                self.call_command(self.callbacks.capability_query, command, id)
            }
        }

        Ok(())
    }

    fn call_io(&mut self, callback: Option<IoCallback<U, IN, OUT>>, command: u8, channel: u8, value: u16) {
        if let Some(callback) = callback {
            if callback(self, command, channel, value).is_err() {
                debug!("handler for {:#x} failed", command);
            }
        }
    }

    fn call_command(&mut self, callback: Option<CommandCallback<U, IN, OUT>>, command: u8, id: u8) {
        if let Some(callback) = callback {
            if callback(self, command, id).is_err() {
                debug!("handler for {:#x} {:#x} failed", command, id);
            }
        }
    }
}
