
extern crate byteorder;

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use byteorder::{BigEndian, WriteBytesExt, ReadBytesExt};
use tracing::{debug, trace};

use crate::xdr;
use super::{xdr_pack, xdr_unpack, check_call_hdr, LAST_FRAGMENT, MAX_FRAGMENT, DEFAULT_MAX_RECORD};
use super::error::{Error, Result, TransportError};

pub struct TcpClient {
	stream: TcpStream,
	pub prog: u32,
	pub vers: u32,
	pub lastxid: u32,
	max_record: usize,
	pub packer: xdr::Packer,
	pub unpacker: xdr::Unpacker,
}

impl TcpClient {

	pub fn connect<A: ToSocketAddrs>(addr: A, prog: u32, vers: u32) -> Result<Self> {
		let stream = TcpStream::connect(addr).map_err(|e| TransportError::from_io("connect", &e))?;
		debug!(peer = ?stream.peer_addr().ok(), prog, vers, "connected");
		Ok(Self{ stream, prog, vers, lastxid: rand::random(), max_record: DEFAULT_MAX_RECORD, packer: xdr::Packer::new(), unpacker: xdr::Unpacker::new() })
	}

	pub fn set_read_timeout(&self, dur: Option<Duration>) -> Result<()> {
		self.stream.set_read_timeout(dur).map_err(|e| TransportError::from_io("set_read_timeout", &e).into())
	}

	// Upper bound on the total size of a reply record, summed over all of its fragments
	pub fn set_max_record(&mut self, n:usize) { self.max_record = n; }

	// Packs the call header for procedure `prc` and leaves the packer ready for the arguments
	pub fn start_call(&mut self, prc:u32) -> Result<()> {
		self.lastxid = self.lastxid.wrapping_add(1);
		self.packer.reset();
		xdr_pack::pack_callheader_no_auth(&mut self.packer, self.lastxid, self.prog, self.vers, prc).map_err(Error::Malformed)
	}

	// Sends whatever is in the packer and waits for the matching reply.  On `Ok`, the unpacker is positioned
	// at the start of the procedure's result; on `Err`, there is no result to decode.
	pub fn do_call(&mut self) -> Result<&mut xdr::Unpacker> {
		let call_len = self.packer.get_buf().len();
		if call_len > MAX_FRAGMENT as usize {
			return Err(Error::CallTooLarge(call_len));
		}

		let mut send_bytes:Vec<u8> = Vec::with_capacity(4 + call_len);
		send_bytes.write_u32::<BigEndian>(call_len as u32 | LAST_FRAGMENT).map_err(Error::Malformed)?;
		send_bytes.extend_from_slice(self.packer.get_buf());
		self.stream.write_all(&send_bytes).map_err(|e| TransportError::from_io("write", &e))?;
		trace!(xid = self.lastxid, bytes = call_len, "sent call");

		loop {
			let reply = self.read_record()?;

			// Load the response into the unpacker and make sure the xid matches
			self.unpacker.reset(&reply);
			let hdr = xdr_unpack::unpack_replyheader(&mut self.unpacker).map_err(Error::Malformed)?;

			if hdr.xid == self.lastxid {
				// Packet from the present
				check_call_hdr(&hdr)?;
				return Ok(&mut self.unpacker);
			} else if hdr.xid.wrapping_sub(self.lastxid) > u32::MAX / 2 {
				// Packet from the past, probably a reply to a call we gave up on
				debug!(xid = hdr.xid, expected = self.lastxid, "discarding stale reply");
				continue;
			} else {
				return Err(Error::XidMismatch{ expected: self.lastxid, got: hdr.xid });
			}
		}
	}

	// Convenience wrapper for a call whose arguments are already XDR encoded.
	pub fn call(&mut self, prc:u32, args:&[u8]) -> Result<&mut xdr::Unpacker> {
		self.start_call(prc)?;
		self.packer.buff.extend_from_slice(args);
		self.do_call()
	}

	fn read_record(&mut self) -> Result<Vec<u8>> {
		let mut reply:Vec<u8> = vec![];

		let mut last:bool = false;
		while !last {
			let x:u32 = self.stream.read_u32::<BigEndian>().map_err(|e| TransportError::from_io("read", &e))?;

			last = (x & LAST_FRAGMENT) != 0;
			let n = (x & MAX_FRAGMENT) as usize;

			let start = reply.len();
			if start + n > self.max_record {
				return Err(Error::Malformed(io::Error::new(io::ErrorKind::InvalidData,
					format!("Reply record of at least {} bytes exceeds the {} byte limit", start + n, self.max_record))));
			}

			// Only grow the buffer as bytes actually arrive
			(&mut self.stream).take(n as u64).read_to_end(&mut reply).map_err(|e| TransportError::from_io("read", &e))?;
			if reply.len() < start + n {
				let e = io::Error::new(io::ErrorKind::UnexpectedEof, "peer closed mid-fragment");
				return Err(TransportError::from_io("read", &e).into());
			}
			trace!(bytes = n, last, "read fragment");
		}

		Ok(reply)
	}

}
