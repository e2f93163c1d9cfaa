
use std::io;

use crate::xdr::Packer;
use crate::rpc::{CALL, RPCVERSION, REPLY, MSG_ACCEPTED, MSG_DENIED, RPC_MISMATCH, AUTH_ERROR};
use super::reply::{OpaqueAuth, ReplyHeader, ReplyBody, RejectedReply, MismatchInfo};
use super::status::AcceptStatus;

pub fn pack_auth(packer:&mut Packer, auth:&OpaqueAuth) -> io::Result<()> {
	packer.pack_enum(auth.flavor)?;
	packer.pack_variable_len_opaque(&auth.body)
}

fn pack_mismatch(packer:&mut Packer, m:&MismatchInfo) -> io::Result<()> {
	packer.pack_u32(m.low)?;
	packer.pack_u32(m.high)
}

pub fn pack_callheader(packer:&mut Packer, xid:u32, prog:u32, vers:u32, prc:u32, cred:&OpaqueAuth, verf:&OpaqueAuth) -> io::Result<()> {
	packer.pack_u32(xid)?;
	packer.pack_enum(CALL)?;
	packer.pack_u32(RPCVERSION)?;
	packer.pack_u32(prog)?;
	packer.pack_u32(vers)?;
	packer.pack_u32(prc)?;
	pack_auth(packer, cred)?;
	pack_auth(packer, verf)
}

pub fn pack_callheader_no_auth(packer: &mut Packer, xid:u32, prog:u32, vers:u32, prc:u32) -> io::Result<()> {
	pack_callheader(packer, xid, prog, vers, prc, &OpaqueAuth::default(), &OpaqueAuth::default())
}

// Servers and test fixtures need this; a client never sends a reply
pub fn pack_replyheader(packer: &mut Packer, hdr:&ReplyHeader) -> io::Result<()> {
	packer.pack_u32(hdr.xid)?;
	packer.pack_enum(REPLY)?;

	match &hdr.body {
		ReplyBody::Accepted(a) => {
			packer.pack_enum(MSG_ACCEPTED)?;
			pack_auth(packer, &a.verf)?;
			packer.pack_enum(a.stat.value())?;
			match (a.stat, &a.mismatch) {
				(AcceptStatus::ProgMismatch, Some(m)) => pack_mismatch(packer, m),
				(AcceptStatus::ProgMismatch, None)    => Err(io::Error::new(io::ErrorKind::InvalidInput, "PROG_MISMATCH reply needs version bounds")),
				_ => Ok(()),
			}
		},
		ReplyBody::Denied(r) => {
			packer.pack_enum(MSG_DENIED)?;
			match r {
				RejectedReply::RpcMismatch(m) => {
					packer.pack_enum(RPC_MISMATCH)?;
					pack_mismatch(packer, m)
				},
				RejectedReply::AuthError(why) => {
					packer.pack_enum(AUTH_ERROR)?;
					packer.pack_enum(why.value())
				},
			}
		},
	}
}
