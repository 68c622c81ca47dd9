//! Length-prefixed framing shared by every transport
//!
//! ```text
//! +----------------------+---------------------------+
//! | length: u32 (LE)     | body: `length` bytes      |
//! +----------------------+---------------------------+
//! ```
//!
//! Frames carry no magic bytes and no checksum. A corrupted length prefix
//! leaves the stream desynchronized and there is no way to find the next
//! frame boundary; the only guard is `MAX_FRAME_SIZE`, which rejects absurd
//! lengths before allocating.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::{Error, Result};

/// Size of the length prefix in bytes
pub const HEADER_SIZE: usize = 4;

/// Largest body accepted on receive (100MB)
pub const MAX_FRAME_SIZE: usize = 100 * 1024 * 1024;

/// Build a complete frame (`length ‖ body`) in one buffer
pub fn encode_frame(body: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(body.len())
        .map_err(|_| Error::InvalidFrame(format!("Message too large: {} bytes", body.len())))?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + body.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(body);
    Ok(frame)
}

/// Write one frame and flush
///
/// The header and body go out in a single `write_all` so a frame is never
/// split across two writes by this side.
pub async fn write_frame<W>(writer: &mut W, body: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_frame(body)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read exactly one frame body
pub async fn read_frame<R>(reader: &mut R) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_u32_le().await.map_err(eof_as_closed)? as usize;

    if len > MAX_FRAME_SIZE {
        debug!(len, max = MAX_FRAME_SIZE, "rejecting oversized frame");
        return Err(Error::InvalidFrame(format!(
            "Message too large: {} bytes",
            len
        )));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await.map_err(eof_as_closed)?;
    Ok(buf)
}

fn eof_as_closed(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::ConnectionClosed
    } else {
        e.into()
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::duplex;
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn header_is_little_endian() {
        let frame = encode_frame(b"{}").unwrap();
        assert_eq!(frame, vec![2, 0, 0, 0, b'{', b'}']);

        let body = vec![b'x'; 0x0102];
        let frame = encode_frame(&body).unwrap();
        assert_eq!(&frame[..HEADER_SIZE], &[0x02, 0x01, 0x00, 0x00]);
        assert_eq!(frame.len(), HEADER_SIZE + 0x0102);
    }

    #[tokio::test]
    async fn reads_back_written_frames_in_order() {
        let (mut client, mut server) = duplex(64);

        tokio::spawn(async move {
            write_frame(&mut client, b"first").await.unwrap();
            write_frame(&mut client, b"").await.unwrap();
            write_frame(&mut client, b"third").await.unwrap();
        });

        assert_eq!(read_frame(&mut server).await.unwrap(), b"first");
        assert_eq!(read_frame(&mut server).await.unwrap(), b"");
        assert_eq!(read_frame(&mut server).await.unwrap(), b"third");
    }

    #[tokio::test]
    async fn short_body_is_connection_closed() {
        let (mut client, mut server) = duplex(64);

        client.write_all(&10u32.to_le_bytes()).await.unwrap();
        client.write_all(b"abc").await.unwrap();
        drop(client);

        assert!(matches!(
            read_frame(&mut server).await,
            Err(Error::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn short_header_is_connection_closed() {
        let (mut client, mut server) = duplex(64);

        client.write_all(&[1, 0]).await.unwrap();
        drop(client);

        assert!(matches!(
            read_frame(&mut server).await,
            Err(Error::ConnectionClosed)
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn oversized_length_is_rejected_before_reading() {
        let (mut client, mut server) = duplex(64);

        client
            .write_all(&((MAX_FRAME_SIZE as u32) + 1).to_le_bytes())
            .await
            .unwrap();

        match read_frame(&mut server).await {
            Err(Error::InvalidFrame(msg)) => assert!(msg.contains("too large")),
            other => panic!("Expected InvalidFrame, got {:?}", other),
        }
        assert!(logs_contain("rejecting oversized frame"));
    }
}
