use crate::context::Context;
use crate::error::Error;

impl<U, const IN: usize, const OUT: usize> Context<U, IN, OUT> {
    /// Feeds one received byte. When the byte completes a frame, the frame is
    /// dispatched before this returns and the decoder starts over.
    ///
    /// Any error discards the frame in progress; the byte that caused it is
    /// not retried.
    pub fn feed(&mut self, byte: u8) -> Result<(), Error> {
        if !self.decoder.push(byte)? {
            return Ok(());
        }

        let result = self.dispatch();
        self.decoder.reset();

        if let Err(e) = result {
            error!("failed to process frame: {}", e);
        }
        result
    }

    /// Feeds `bytes` in order, stopping at the first error.
    pub fn feed_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        bytes.iter().try_for_each(|&byte| self.feed(byte))
    }
}
