//! Trait abstraction for the incoming byte stream to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for reading raw chunks from the transport
///
/// Chunk boundaries are an artifact of the transport and carry no
/// meaning; callers must not assume any alignment with frames.
/// A return of `Ok(0)` means the stream closed.
#[async_trait]
pub trait ByteSource: Send {
    /// Read the next available chunk into `buf`, returning its length
    async fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// What a scripted source does once its chunks run out
    #[derive(Debug, Clone, Copy)]
    pub enum AfterChunks {
        /// Report end-of-stream (`Ok(0)`)
        Eof,
        /// Report a transport error
        Error(io::ErrorKind),
        /// Stay open without producing more bytes
        StayOpen,
    }

    /// Byte source that replays a fixed script of chunks
    pub struct ScriptedSource {
        chunks: VecDeque<Vec<u8>>,
        after: AfterChunks,
    }

    impl ScriptedSource {
        pub fn new(chunks: Vec<Vec<u8>>, after: AfterChunks) -> Self {
            Self {
                chunks: chunks.into(),
                after,
            }
        }
    }

    #[async_trait]
    impl ByteSource for ScriptedSource {
        async fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    assert!(
                        chunk.len() <= buf.len(),
                        "scripted chunk of {} bytes exceeds read buffer of {}",
                        chunk.len(),
                        buf.len()
                    );
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                None => match self.after {
                    AfterChunks::Eof => Ok(0),
                    AfterChunks::Error(kind) => Err(io::Error::new(kind, "scripted transport error")),
                    AfterChunks::StayOpen => std::future::pending().await,
                },
            }
        }
    }
}
