//! Transport seam: scan input and command output.
//!
//! The pub/sub layer that delivers scan frames and carries velocity commands
//! is an external collaborator. The controller only sees the [`CommandSink`]
//! capability, so tests run against a recording sink and the binary wires a
//! UDP JSON endpoint — same policy code either way.

use std::net::UdpSocket;
use std::time::Duration;

use crate::command::VelocityCommand;
use crate::error::{PariharaError, Result};
use crate::scan::ScanFrame;

/// Output capability for velocity commands.
///
/// One logical writer, append-only emission; implementations must deliver
/// commands in the order they are sent.
pub trait CommandSink {
    fn send(&mut self, command: VelocityCommand) -> Result<()>;
}

/// Sink backed by a crossbeam channel, for in-process wiring.
pub struct ChannelSink {
    tx: crossbeam_channel::Sender<VelocityCommand>,
}

impl ChannelSink {
    pub fn new(tx: crossbeam_channel::Sender<VelocityCommand>) -> Self {
        Self { tx }
    }
}

impl CommandSink for ChannelSink {
    fn send(&mut self, command: VelocityCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|e| PariharaError::Transport(format!("command channel closed: {}", e)))
    }
}

/// Sink that sends commands as JSON datagrams to a fixed target.
pub struct UdpCommandSink {
    socket: UdpSocket,
    target: String,
}

impl UdpCommandSink {
    /// Bind an ephemeral local port and remember the target address.
    pub fn new(target: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self {
            socket,
            target: target.to_string(),
        })
    }
}

impl CommandSink for UdpCommandSink {
    fn send(&mut self, command: VelocityCommand) -> Result<()> {
        let payload = serde_json::to_vec(&command)
            .map_err(|e| PariharaError::Transport(format!("command encode failed: {}", e)))?;
        self.socket.send_to(&payload, &self.target)?;
        Ok(())
    }
}

/// Receives scan frames as JSON datagrams.
///
/// Malformed datagrams are logged and discarded; the socket stays open.
pub struct UdpScanSource {
    socket: UdpSocket,
    buf: Vec<u8>,
}

/// Largest accepted scan datagram (a 360-reading frame is well under this)
const MAX_DATAGRAM: usize = 64 * 1024;

impl UdpScanSource {
    /// Bind the listen address with a read timeout so callers can poll.
    pub fn bind(addr: &str, timeout: Duration) -> Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(timeout))?;
        Ok(Self {
            socket,
            buf: vec![0u8; MAX_DATAGRAM],
        })
    }

    /// Receive the next frame. Returns `Ok(None)` on timeout or on a
    /// discarded malformed datagram.
    pub fn recv(&mut self) -> Result<Option<ScanFrame>> {
        let len = match self.socket.recv_from(&mut self.buf) {
            Ok((len, _addr)) => len,
            Err(e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<ScanFrame>(&self.buf[..len]) {
            Ok(frame) => Ok(Some(frame)),
            Err(e) => {
                tracing::warn!("Discarding undecodable scan datagram: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_preserves_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelSink::new(tx);

        sink.send(VelocityCommand::reverse(0.5)).unwrap();
        sink.send(VelocityCommand::forward(0.5)).unwrap();

        assert_eq!(rx.recv().unwrap(), VelocityCommand::reverse(0.5));
        assert_eq!(rx.recv().unwrap(), VelocityCommand::forward(0.5));
    }

    #[test]
    fn test_channel_sink_reports_closed_channel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelSink::new(tx);
        drop(rx);

        assert!(sink.send(VelocityCommand::stop()).is_err());
    }

    #[test]
    fn test_udp_roundtrip() {
        let mut source =
            UdpScanSource::bind("127.0.0.1:0", Duration::from_millis(500)).unwrap();
        let addr = source.socket.local_addr().unwrap().to_string();

        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        let frame = ScanFrame::new(vec![1.0, 2.0, 3.0]);
        let payload = serde_json::to_vec(&frame).unwrap();
        sender.send_to(&payload, &addr).unwrap();

        let received = source.recv().unwrap().expect("frame expected");
        assert_eq!(received, frame);
    }

    #[test]
    fn test_udp_discards_malformed_datagram() {
        let mut source =
            UdpScanSource::bind("127.0.0.1:0", Duration::from_millis(500)).unwrap();
        let addr = source.socket.local_addr().unwrap().to_string();

        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(b"not json", &addr).unwrap();

        assert!(source.recv().unwrap().is_none());
    }
}
