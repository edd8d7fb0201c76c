//! Glue between a [`Context`] and an `embedded-hal` serial peripheral.
//!
//! The serial port lives in the context's user data, so the output callback
//! can reach it while the context is in the middle of an encode call.

use embedded_hal::serial;
use nb::block;

use crate::context::Context;
use crate::error::{CallbackError, CallbackResult, Error};

/// Implemented by user data that owns the serial port of the link.
pub trait SerialPort {
    type Port: serial::Read<u8> + serial::Write<u8>;

    fn port(&mut self) -> &mut Self::Port;
}

pub type ReadError<U> = <<U as SerialPort>::Port as serial::Read<u8>>::Error;

#[derive(Debug, Eq, PartialEq)]
pub enum LinkError<E> {
    Serial(E),
    Protocol(Error),
}

/// Writes every byte of `bytes`, blocking until the port accepts each one,
/// then flushes.
pub fn write_all<W>(tx: &mut W, bytes: &[u8]) -> Result<(), W::Error>
where
    W: serial::Write<u8>,
{
    for &byte in bytes {
        block!(tx.write(byte))?;
    }
    block!(tx.flush())
}

/// Output callback that sends each chunk over the user data's serial port.
pub fn serial_sink<U: SerialPort>(bytes: &[u8], user_data: &mut U) -> CallbackResult {
    write_all(user_data.port(), bytes).map_err(|_| CallbackError)
}

/// Reads at most one byte from the port and feeds it to `ctx`.
pub fn poll<U, const IN: usize, const OUT: usize>(
    ctx: &mut Context<U, IN, OUT>,
) -> nb::Result<(), LinkError<ReadError<U>>>
where
    U: SerialPort,
{
    let byte = match <U::Port as serial::Read<u8>>::read(ctx.user_data_mut().port()) {
        Ok(byte) => byte,
        Err(nb::Error::WouldBlock) => return Err(nb::Error::WouldBlock),
        Err(nb::Error::Other(e)) => return Err(nb::Error::Other(LinkError::Serial(e))),
    };

    ctx.feed(byte)
        .map_err(|e| nb::Error::Other(LinkError::Protocol(e)))
}

/// Feeds bytes until the port has nothing more to give. Returns the number of
/// bytes consumed.
pub fn pump<U, const IN: usize, const OUT: usize>(
    ctx: &mut Context<U, IN, OUT>,
) -> Result<usize, LinkError<ReadError<U>>>
where
    U: SerialPort,
{
    let mut count = 0;
    loop {
        match poll(ctx) {
            Ok(()) => count += 1,
            Err(nb::Error::WouldBlock) => return Ok(count),
            Err(nb::Error::Other(e)) => return Err(e),
        }
    }
}
