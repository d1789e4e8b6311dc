//! Length-prefixed framing over the plugin's stdio.
//!
//! ```text
//! +----------------+------------------+
//! | length (4 BE)  |  JSON payload    |
//! +----------------+------------------+
//! ```

use std::io::{self, Read, Stdin, Stdout, Write};

use serde::{Serialize, de::DeserializeOwned};

use crate::MAX_MESSAGE_SIZE;
use crate::error::{ProtocolError, ProtocolResult};

/// Prefixes an already-serialized payload with its length.
pub fn encode_frame(payload: &[u8]) -> ProtocolResult<Vec<u8>> {
    let len = checked_len(payload.len())?;

    let mut buffer = Vec::with_capacity(4 + payload.len());
    buffer.extend_from_slice(&len.to_be_bytes());
    buffer.extend_from_slice(payload);
    Ok(buffer)
}

/// Serializes a message to JSON and frames it.
pub fn encode_message<T: Serialize>(message: &T) -> ProtocolResult<Vec<u8>> {
    encode_frame(&serde_json::to_vec(message)?)
}

/// Decodes one complete frame (length prefix + payload) into a message.
pub fn decode_message<T: DeserializeOwned>(data: &[u8]) -> ProtocolResult<T> {
    let Some((prefix, rest)) = data.split_first_chunk::<4>() else {
        return Err(ProtocolError::IncompleteMessage {
            expected: 4,
            received: data.len(),
        });
    };

    let len = u32::from_be_bytes(*prefix);
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: len.into(),
            max: MAX_MESSAGE_SIZE,
        });
    }

    if len == 0 {
        return Err(ProtocolError::EmptyMessage);
    }

    let len = len as usize;
    if rest.len() < len {
        return Err(ProtocolError::IncompleteMessage {
            expected: 4 + len,
            received: data.len(),
        });
    }

    Ok(serde_json::from_slice(&rest[..len])?)
}

fn checked_len(len: usize) -> ProtocolResult<u32> {
    match u32::try_from(len) {
        Ok(len) if len <= MAX_MESSAGE_SIZE => Ok(len),
        _ => Err(ProtocolError::MessageTooLarge {
            size: len as u64,
            max: MAX_MESSAGE_SIZE,
        }),
    }
}

/// The duplex channel between the plugin and its host.
///
/// Reads frames from the host side (`reader`) and writes frames back
/// (`writer`). Every write is flushed immediately, since the host blocks on
/// each reply.
pub struct HostChannel<R, W> {
    reader: R,
    writer: W,
}

impl HostChannel<Stdin, Stdout> {
    /// Opens the channel on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> HostChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads one raw frame payload.
    ///
    /// Returns `Ok(None)` if the host closed the stream before a length prefix.
    pub fn read_frame(&mut self) -> ProtocolResult<Option<Vec<u8>>> {
        let mut len_buf = [0u8; 4];
        match self.reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_be_bytes(len_buf);
        if len > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: len.into(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        if len == 0 {
            return Err(ProtocolError::EmptyMessage);
        }

        let mut payload = vec![0u8; len as usize];
        self.reader.read_exact(&mut payload)?;
        Ok(Some(payload))
    }

    /// Writes one raw frame payload and flushes.
    pub fn write_frame(&mut self, payload: &[u8]) -> ProtocolResult<()> {
        let len = checked_len(payload.len())?;
        self.writer.write_all(&len.to_be_bytes())?;
        self.writer.write_all(payload)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Serializes and writes one message.
    pub fn send<T: Serialize>(&mut self, message: &T) -> ProtocolResult<()> {
        self.write_frame(&serde_json::to_vec(message)?)
    }

    /// Unwraps the channel, returning the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
