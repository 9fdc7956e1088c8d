//! Readable byte streams carried by requests and responses.
//!
//! A [`BodyStream`] has exactly one owner. Consuming it (`into_bytes`,
//! `into_reader`) moves it, so a body can't be read twice; dropping it releases
//! the underlying file handle or buffer.

use bytes::Bytes;
use std::fmt;
use std::io::Cursor;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Boxed reader behind a [`BodyStream`].
pub type BoxReader = Pin<Box<dyn AsyncRead + Send>>;

/// A single-owner readable byte stream with an optional known length.
pub struct BodyStream {
    reader: BoxReader,
    len: Option<u64>,
}

impl BodyStream {
    /// Body backed by an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len() as u64;
        Self {
            reader: Box::pin(Cursor::new(bytes)),
            len: Some(len),
        }
    }

    /// Body backed by an open file whose size is already known.
    pub fn from_file(file: tokio::fs::File, len: u64) -> Self {
        Self {
            reader: Box::pin(file),
            len: Some(len),
        }
    }

    /// Body backed by an arbitrary reader.
    pub fn from_reader<R>(reader: R, len: Option<u64>) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self {
            reader: Box::pin(reader),
            len,
        }
    }

    /// Byte length, when it can be determined without reading.
    pub fn len(&self) -> Option<u64> {
        self.len
    }

    /// True only when the length is known to be zero.
    pub fn is_empty(&self) -> bool {
        self.len == Some(0)
    }

    /// Read the whole stream into memory.
    pub async fn into_bytes(mut self) -> std::io::Result<Bytes> {
        let mut buf = match self.len {
            Some(len) => Vec::with_capacity(len as usize),
            None => Vec::new(),
        };
        self.reader.read_to_end(&mut buf).await?;
        Ok(Bytes::from(buf))
    }

    /// Hand the raw reader to a hosting surface that streams it itself.
    pub fn into_reader(self) -> BoxReader {
        self.reader
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream").field("len", &self.len).finish_non_exhaustive()
    }
}

impl From<Bytes> for BodyStream {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for BodyStream {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&'static str> for BodyStream {
    fn from(text: &'static str) -> Self {
        Self::from_bytes(Bytes::from_static(text.as_bytes()))
    }
}

impl From<String> for BodyStream {
    fn from(text: String) -> Self {
        Self::from_bytes(text.into_bytes())
    }
}
