//! Framed JSON codec for the batch protocol.
//!
//! Every message travels as one frame:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ JSON payload (variable)  │
//! │ Big-endian u32   │                          │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! Frames larger than [`MAX_FRAME_LEN`] are refused in both directions.

use crate::error::{BatchError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};

/// Largest payload accepted or sent (1 MiB)
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Serialize `message` and write it as a single frame.
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    let payload = serde_json::to_vec(message)?;
    if payload.len() > MAX_FRAME_LEN {
        return Err(BatchError::FrameTooLarge {
            len: payload.len(),
            max: MAX_FRAME_LEN,
        });
    }

    writer.write_all(&(payload.len() as u32).to_be_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one frame and deserialize its payload.
///
/// `buffer` is reused between calls to avoid an allocation per message.
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R, buffer: &mut Vec<u8>) -> Result<T> {
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_be_bytes(len_bytes) as usize;
    if len > MAX_FRAME_LEN {
        return Err(BatchError::FrameTooLarge {
            len,
            max: MAX_FRAME_LEN,
        });
    }

    buffer.clear();
    buffer.resize(len, 0);
    reader.read_exact(buffer)?;
    Ok(serde_json::from_slice(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Request, Response};
    use std::io::Cursor;

    #[test]
    fn test_frame_layout() {
        let mut out = Vec::new();
        write_frame(&mut out, &Request::RunProcess).unwrap();

        let payload = br#"{"op":"run_process"}"#;
        assert_eq!(&out[..4], &(payload.len() as u32).to_be_bytes());
        assert_eq!(&out[4..], payload);
    }

    #[test]
    fn test_reads_consecutive_frames() {
        let mut out = Vec::new();
        write_frame(&mut out, &Response::Ok).unwrap();
        write_frame(&mut out, &Response::Ran { success: true }).unwrap();

        let mut reader = Cursor::new(out);
        let mut buffer = Vec::new();
        let first: Response = read_frame(&mut reader, &mut buffer).unwrap();
        let second: Response = read_frame(&mut reader, &mut buffer).unwrap();
        assert_eq!(first, Response::Ok);
        assert_eq!(second, Response::Ran { success: true });
    }

    #[test]
    fn test_oversized_length_rejected() {
        let mut bytes = ((MAX_FRAME_LEN + 1) as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(b"{}");

        let mut buffer = Vec::new();
        let result: Result<Response> = read_frame(&mut Cursor::new(bytes), &mut buffer);
        assert!(matches!(result, Err(BatchError::FrameTooLarge { .. })));
    }

    #[test]
    fn test_oversized_payload_not_written() {
        let request = Request::SetParams {
            path: "x".repeat(MAX_FRAME_LEN),
        };
        let mut out = Vec::new();
        let result = write_frame(&mut out, &request);
        assert!(matches!(result, Err(BatchError::FrameTooLarge { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_truncated_frame_is_eof() {
        let mut bytes = 10u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"{\"st");

        let mut buffer = Vec::new();
        let result: Result<Response> = read_frame(&mut Cursor::new(bytes), &mut buffer);
        match result {
            Err(BatchError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected EOF error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload() {
        let payload = b"not json";
        let mut bytes = (payload.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(payload);

        let mut buffer = Vec::new();
        let result: Result<Response> = read_frame(&mut Cursor::new(bytes), &mut buffer);
        assert!(matches!(result, Err(BatchError::Serialization(_))));
    }
}
