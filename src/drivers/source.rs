use std::io;
use std::net::{SocketAddr, UdpSocket};
use crate::drivers::SourceError;
/// Non-blocking, connectionless receive primitive.
pub trait DatagramSource {
    /// Copies the next pending datagram into `buf` and returns its length.
    /// `Ok(None)` means nothing is pending right now (would-block).
    fn poll_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, SourceError>;
    /// Hands every pending datagram to `visit`, borrowed from `scratch`, until the first
    /// would-block, and returns how many were visited. A transport fault ends the drain
    /// with the error; the next call starts a fresh one.
    fn drain_pending<F>(&mut self, scratch: &mut [u8], mut visit: F) -> Result<usize, SourceError>
    where
        Self: Sized,
        F: FnMut(&[u8]),
    {
        let mut visited = 0;
        while let Some(len) = self.poll_datagram(scratch)? {
            visit(&scratch[..len]);
            visited += 1;
        }
        Ok(visited)
    }
}
impl<S: DatagramSource + ?Sized> DatagramSource for Box<S> {
    fn poll_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, SourceError> {
        (**self).poll_datagram(buf)
    }
}
/// UDP listener in non-blocking mode.
pub struct UdpSource {
    socket: UdpSocket,
    local_addr: SocketAddr,
}
impl UdpSource {
    pub fn bind(addr: &str) -> Result<Self, SourceError> {
        let bind_err = |source: io::Error| SourceError::Bind {
            addr: addr.to_string(),
            source,
        };
        let socket = UdpSocket::bind(addr).map_err(bind_err)?;
        socket.set_nonblocking(true).map_err(bind_err)?;
        let local_addr = socket.local_addr().map_err(bind_err)?;
        log::info!("listening for telemetry datagrams on {local_addr}");
        Ok(Self { socket, local_addr })
    }
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}
impl DatagramSource for UdpSource {
    fn poll_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, SourceError> {
        match self.socket.recv_from(buf) {
            Ok((len, peer)) => {
                log::trace!("{len} byte datagram from {peer}");
                Ok(Some(len))
            }
            Err(err)
                if err.kind() == io::ErrorKind::WouldBlock
                    || err.kind() == io::ErrorKind::Interrupted =>
            {
                Ok(None)
            }
            Err(err) => Err(SourceError::Transport(err)),
        }
    }
}
#[cfg(test)]
pub use manual::ManualSource;
