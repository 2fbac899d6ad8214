//! The socket plus the bookkeeping (sequence id, read buffer, deadlines) needed to frame
//! packets on top of it.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use std::time::{Duration, Instant};

use crate::error::Error;
use crate::options::Host;
use crate::protocol;

enum Socket {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Socket {
    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            Socket::Tcp(s) => s.set_read_timeout(timeout),
            #[cfg(unix)]
            Socket::Unix(s) => s.set_read_timeout(timeout),
        }
    }

    fn shutdown(&self) -> io::Result<()> {
        match self {
            Socket::Tcp(s) => s.shutdown(Shutdown::Both),
            #[cfg(unix)]
            Socket::Unix(s) => s.shutdown(Shutdown::Both),
        }
    }
}

impl Read for Socket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Socket::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            Socket::Unix(s) => s.read(buf),
        }
    }
}

impl Write for Socket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Socket::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            Socket::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Socket::Tcp(s) => s.flush(),
            #[cfg(unix)]
            Socket::Unix(s) => s.flush(),
        }
    }
}

/// A connected socket, framed for MySQL packets.
///
/// Owns the sequence counter the protocol resets to zero at the start of every command: callers
/// must call [`reset_sequence`][Stream::reset_sequence] before sending a new command and must
/// not interleave commands.
pub struct Stream {
    socket: Socket,
    sequence_id: u8,
    read_buf: Vec<u8>,
}

impl Stream {
    pub fn connect(host: &Host, port: u16, connect_timeout: Option<Duration>) -> Result<Self, Error> {
        let socket = match host {
            Host::Tcp(host) => {
                let addr = resolve(host, port, connect_timeout)?;
                let stream = if let Some(timeout) = connect_timeout {
                    TcpStream::connect_timeout(&addr, timeout)?
                } else {
                    TcpStream::connect(addr)?
                };
                stream.set_nodelay(true)?;
                Socket::Tcp(stream)
            }

            #[cfg(unix)]
            Host::Unix(path) => Socket::Unix(UnixStream::connect(path)?),

            #[cfg(not(unix))]
            Host::Unix(_) => {
                return Err(protocol_err!("unix sockets are not supported on this platform"))
            }
        };

        Ok(Self {
            socket,
            sequence_id: 0,
            read_buf: Vec::with_capacity(4096),
        })
    }

    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<(), Error> {
        Ok(self.socket.set_read_timeout(timeout)?)
    }

    pub fn reset_sequence(&mut self) {
        self.sequence_id = 0;
    }

    /// Reads one logical (possibly reassembled) packet, enforcing `deadline` across however
    /// many physical reads that takes.
    pub fn read_packet(&mut self, deadline: Option<Instant>) -> Result<&[u8], Error> {
        apply_deadline(&self.socket, deadline)?;

        let seq = protocol::read_packet_buf(&mut self.socket, &mut self.read_buf).map_err(|err| {
            if deadline.is_some() && matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) {
                Error::Timeout
            } else {
                Error::Network(err)
            }
        })?;
        self.sequence_id = seq.wrapping_add(1);

        Ok(&self.read_buf)
    }

    pub fn write_packet(&mut self, payload: &[u8]) -> Result<(), Error> {
        self.sequence_id = protocol::write_packet(&mut self.socket, payload, self.sequence_id)?;
        self.socket.flush()?;

        Ok(())
    }

    /// Issues a best-effort `COM_QUIT` then tears down the socket. Errors sending the quit
    /// packet are swallowed: we're closing regardless.
    pub fn quit(mut self) {
        self.reset_sequence();
        let _ = self.write_packet(&[protocol::COM_QUIT]);
        let _ = self.socket.shutdown();
    }
}

fn apply_deadline(socket: &Socket, deadline: Option<Instant>) -> Result<(), Error> {
    let Some(deadline) = deadline else {
        return Ok(());
    };

    let remaining = deadline.saturating_duration_since(Instant::now());
    if remaining.is_zero() {
        return Err(Error::Timeout);
    }

    socket.set_read_timeout(Some(remaining))?;
    Ok(())
}

fn resolve(host: &str, port: u16, connect_timeout: Option<Duration>) -> Result<SocketAddr, Error> {
    let start = Instant::now();
    let mut addrs = (host, port).to_socket_addrs()?;

    if let Some(timeout) = connect_timeout {
        if start.elapsed() > timeout {
            return Err(Error::Timeout);
        }
    }

    addrs.next().ok_or_else(|| {
        Error::Network(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("could not resolve host {host:?}"),
        ))
    })
}

