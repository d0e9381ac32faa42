//! The seam between the turn controller and whatever carries messages.
//!
//! A [`ProtocolClient`] owns the connection. All calls block until done and
//! none of them time out: turn deadlines are enforced by the server, which
//! kicks bots that answer too late.

use crate::error::BotError;
use crate::protocol::{ClientMessage, ServerMessage};
use std::io::{BufRead, Write};
use tracing::trace;

/// Blocking message exchange with the game server.
pub trait ProtocolClient {
    /// Open the connection
    fn connect(&mut self) -> Result<(), BotError>;

    /// Send one message
    fn send(&mut self, message: &ClientMessage) -> Result<(), BotError>;

    /// Wait for the next message
    fn recv(&mut self) -> Result<ServerMessage, BotError>;
}

impl<C: ProtocolClient + ?Sized> ProtocolClient for &mut C {
    fn connect(&mut self) -> Result<(), BotError> {
        (**self).connect()
    }

    fn send(&mut self, message: &ClientMessage) -> Result<(), BotError> {
        (**self).send(message)
    }

    fn recv(&mut self) -> Result<ServerMessage, BotError> {
        (**self).recv()
    }
}

/// Exchanges one JSON message per line over a reader/writer pair.
///
/// Useful to replay a recorded session from a file, or to sit behind a relay
/// that handles the socket and netorcai framing.
#[derive(Debug)]
pub struct JsonLinesClient<R, W> {
    reader: R,
    writer: W,
    line: String,
}

impl<R: BufRead, W: Write> JsonLinesClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
        }
    }

    /// Give back the writer, e.g. to inspect what was sent
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> ProtocolClient for JsonLinesClient<R, W> {
    fn connect(&mut self) -> Result<(), BotError> {
        // The stream is open as soon as we hold it
        Ok(())
    }

    fn send(&mut self, message: &ClientMessage) -> Result<(), BotError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn recv(&mut self) -> Result<ServerMessage, BotError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(BotError::Disconnected);
            }
            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            trace!(line = text, "received");
            return ServerMessage::from_json_str(text);
        }
    }
}
