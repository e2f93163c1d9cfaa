
extern crate byteorder;

use std::io::{self, Cursor, Error, ErrorKind, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

fn err(msg:&str) -> io::Error { Error::new(ErrorKind::InvalidData, msg) }

fn padding(n:usize) -> usize { (4 - n % 4) % 4 }

pub struct Packer {
	pub buff:Vec<u8>
}

// Reads from the front of a buffer.  Instead of shifting bytes out like a queue, we keep a read position so
// that whatever comes after the RPC header can be handed to the caller untouched.
pub struct Unpacker {
	buff:Vec<u8>,
	pos:usize,
}

impl Default for Packer {
	fn default() -> Self { Self::new() }
}

impl Default for Unpacker {
	fn default() -> Self { Self::new() }
}

impl Packer {

	pub fn new() -> Self { Packer{buff: Vec::new()} }

	pub fn reset(&mut self) { self.buff.clear(); }

	pub fn get_buf(&self) -> &[u8] { &self.buff }

	// Packing methods that can only add multiples of four bytes, so if we started off with the correct
	// padding, we'll end up with the correct padding
	pub fn pack_u32(&mut self, x:u32) -> io::Result<()> { self.buff.write_u32::<BigEndian>(x) }
	pub fn pack_i32(&mut self, x:i32) -> io::Result<()> { self.buff.write_i32::<BigEndian>(x) }

	pub fn pack_enum(&mut self, x:i32) -> io::Result<()> { self.pack_i32(x) }

	// Packing methods that require padding checks at the end
	pub fn pack_variable_len_opaque(&mut self, data:&[u8]) -> io::Result<()> {
		if data.len() > u32::MAX as usize { return Err(err("Opaque data too long for a u32 length prefix")) }
		self.pack_u32(data.len() as u32)?;
		self.buff.write_all(data)?;

		// Ensure alignment
		while self.buff.len() % 4 != 0 { self.buff.push(0); }
		Ok(())
	}

}

impl Unpacker {

	pub fn new() -> Self { Unpacker{buff: Vec::new(), pos: 0} }

	pub fn reset(&mut self, data:&[u8]) {
		self.buff.clear();
		self.buff.extend_from_slice(data);
		self.pos = 0;
	}

	pub fn remaining(&self) -> usize { self.buff.len() - self.pos }
	pub fn all_data_consumed(&self) -> bool { self.remaining() == 0 }

	pub fn get_remaining_bytes(&self) -> &[u8] { &self.buff[self.pos..] }

	pub fn unpack_u32(&mut self) -> io::Result<u32> {
		let ans:u32 = Cursor::new(self.get_remaining_bytes()).read_u32::<BigEndian>()?;
		self.pos += 4;
		Ok(ans)
	}
	pub fn unpack_i32(&mut self) -> io::Result<i32> {
		let ans:i32 = Cursor::new(self.get_remaining_bytes()).read_i32::<BigEndian>()?;
		self.pos += 4;
		Ok(ans)
	}

	// An enum is just an i32 with a restricted set of values.  We can't check that this value is in the restricted set at this
	// level because it depends on the application, so for our purposes here, an enum is the same as an i32
	pub fn unpack_enum(&mut self) -> io::Result<i32> { self.unpack_i32() }

	pub fn unpack_variable_len_opaque(&mut self) -> io::Result<Vec<u8>> {
		let n = self.unpack_u32()? as usize;
		if n + padding(n) > self.remaining() {
			return Err(Error::new(ErrorKind::UnexpectedEof, "Opaque length runs past the end of the buffer"));
		}
		let ans:Vec<u8> = self.buff[self.pos..self.pos + n].to_vec();

		// Skip the padding too so the next item starts aligned
		self.pos += n + padding(n);
		Ok(ans)
	}

}
