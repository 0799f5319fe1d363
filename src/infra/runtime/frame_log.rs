//! Byte-stream pass-through that mirrors newline-delimited JSON-RPC frames
//! to the log (stderr) without altering what flows through.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Recv,
    Send,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Recv => "recv",
            Direction::Send => "send",
        })
    }
}

pub type FrameSink = Arc<dyn Fn(Direction, &str) + Send + Sync>;

fn trace_sink() -> FrameSink {
    Arc::new(|direction, frame| {
        tracing::info!(direction = %direction, frame = %frame, "mcp frame");
    })
}

pub struct FrameLog<T> {
    inner: T,
    direction: Direction,
    pending: Vec<u8>,
    sink: FrameSink,
}

impl<T> FrameLog<T> {
    pub fn new(inner: T, direction: Direction) -> Self {
        Self::with_sink(inner, direction, trace_sink())
    }

    pub fn with_sink(inner: T, direction: Direction, sink: FrameSink) -> Self {
        Self {
            inner,
            direction,
            pending: Vec::new(),
            sink,
        }
    }

    fn record(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line);
        }
    }

    fn flush_partial(&mut self) {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest);
        }
    }

    fn emit(&self, raw: &[u8]) {
        let frame = String::from_utf8_lossy(raw);
        let frame = frame.trim_end();
        if !frame.is_empty() {
            (self.sink)(self.direction, frame);
        }
    }
}

impl<T: AsyncRead + Unpin> AsyncRead for FrameLog<T> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                let read = &buf.filled()[before..];
                if read.is_empty() {
                    // EOF
                    this.flush_partial();
                } else {
                    this.record(read);
                }
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}

impl<T: AsyncWrite + Unpin> AsyncWrite for FrameLog<T> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_write(cx, buf) {
            Poll::Ready(Ok(n)) => {
                this.record(&buf[..n]);
                Poll::Ready(Ok(n))
            }
            other => other,
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        this.flush_partial();
        Pin::new(&mut this.inner).poll_shutdown(cx)
    }
}
