
use std::io::{self, Error, ErrorKind};

use crate::xdr::Unpacker;
use crate::rpc::{REPLY, MSG_DENIED, RPC_MISMATCH, AUTH_ERROR, MSG_ACCEPTED};
use super::reply::{OpaqueAuth, ReplyHeader, ReplyBody, AcceptedReply, RejectedReply, MismatchInfo};
use super::status::{AcceptStatus, AuthStatus};

fn err(msg:String) -> io::Error { Error::new(ErrorKind::InvalidData, msg) }

pub fn unpack_auth(unpacker:&mut Unpacker) -> io::Result<OpaqueAuth> {
	let flavor:i32   = unpacker.unpack_enum()?;
	let body:Vec<u8> = unpacker.unpack_variable_len_opaque()?;
	Ok(OpaqueAuth{ flavor, body })
}

fn unpack_mismatch(unpacker:&mut Unpacker) -> io::Result<MismatchInfo> {
	let low:u32  = unpacker.unpack_u32()?;
	let high:u32 = unpacker.unpack_u32()?;
	Ok(MismatchInfo{ low, high })
}

// Only decodes.  Whether the server actually ran the call is for check_call_hdr to decide; this fails only
// when the bytes can't be a reply header at all.
pub fn unpack_replyheader(unpacker:&mut Unpacker) -> io::Result<ReplyHeader> {
	let xid:u32 = unpacker.unpack_u32()?;

	let mtype:i32 = unpacker.unpack_enum()?;
	if mtype != REPLY { return Err(err(format!("Expected REPLY message type but got {}", mtype))); }

	let body = match unpacker.unpack_enum()? {
		MSG_DENIED => {
			let rejected = match unpacker.unpack_enum()? {
				RPC_MISMATCH => RejectedReply::RpcMismatch(unpack_mismatch(unpacker)?),
				AUTH_ERROR   => RejectedReply::AuthError(AuthStatus::from(unpacker.unpack_enum()?)),
				// Nothing tells us how long the rest of the body is, so there's no way to keep going
				x => return Err(err(format!("Unknown reject_stat {} in reply header", x))),
			};
			ReplyBody::Denied(rejected)
		},
		MSG_ACCEPTED => {
			let verf = unpack_auth(unpacker)?;
			let stat = AcceptStatus::from(unpacker.unpack_enum()?);
			let mismatch = match stat {
				AcceptStatus::ProgMismatch => Some(unpack_mismatch(unpacker)?),
				_ => None,
			};
			ReplyBody::Accepted(AcceptedReply{ verf, stat, mismatch })
		},
		x => return Err(err(format!("Neither MSG_DENIED nor MSG_ACCEPTED ({}) in reply header", x))),
	};

	Ok(ReplyHeader{ xid, body })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::xdr::Packer;
	use crate::rpc::xdr_pack::pack_replyheader;
	use crate::rpc::{check_call_hdr, CallStatus};
	use crate::rpc::status::RejectStatus;

	fn load(words:&[u32]) -> Unpacker {
		let bytes:Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes().to_vec()).collect();
		let mut unpacker = Unpacker::new();
		unpacker.reset(&bytes);
		unpacker
	}

	#[test]
	fn success_leaves_result_in_place() {
		// xid, REPLY, MSG_ACCEPTED, AUTH_NONE, 0 length, SUCCESS, result
		let mut unpacker = load(&[5, 1, 0, 0, 0, 0, 111]);
		let hdr = unpack_replyheader(&mut unpacker).unwrap();
		assert_eq!(hdr, ReplyHeader::success(5));
		assert!(check_call_hdr(&hdr).is_ok());
		assert_eq!(unpacker.unpack_u32().unwrap(), 111);
	}

	#[test]
	fn denied_rpc_mismatch() {
		let mut unpacker = load(&[5, 1, 1, 0, 2, 2]);
		let hdr = unpack_replyheader(&mut unpacker).unwrap();
		assert_eq!(hdr.body, ReplyBody::Denied(RejectedReply::RpcMismatch(MismatchInfo{ low: 2, high: 2 })));
		assert_eq!(check_call_hdr(&hdr).unwrap_err().status(), CallStatus::Reject(RejectStatus::RpcMismatch));
		assert!(unpacker.all_data_consumed());
	}

	#[test]
	fn unknown_accept_stat_is_decoded_not_rejected() {
		let mut unpacker = load(&[5, 1, 0, 0, 0, 9]);
		let hdr = unpack_replyheader(&mut unpacker).unwrap();
		assert_eq!(hdr.call_status(), CallStatus::Accept(AcceptStatus::Unknown(9)));
	}

	#[test]
	fn structural_errors() {
		// A CALL, not a REPLY
		assert!(unpack_replyheader(&mut load(&[5, 0, 0])).is_err());
		// reply_stat out of range
		assert!(unpack_replyheader(&mut load(&[5, 1, 2])).is_err());
		// reject_stat out of range
		assert!(unpack_replyheader(&mut load(&[5, 1, 1, 7])).is_err());
		// PROG_MISMATCH missing its bounds
		assert_eq!(unpack_replyheader(&mut load(&[5, 1, 0, 0, 0, 2, 1])).unwrap_err().kind(), ErrorKind::UnexpectedEof);
	}

	#[test]
	fn packed_headers_classify_the_same() {
		let headers = vec![
			ReplyHeader::success(1),
			ReplyHeader{ xid: 2, body: ReplyBody::Denied(RejectedReply::AuthError(AuthStatus::BadCred)) },
			ReplyHeader{ xid: 3, body: ReplyBody::Accepted(AcceptedReply{
				verf: OpaqueAuth{ flavor: 1, body: vec![1, 2, 3] },
				stat: AcceptStatus::ProgMismatch,
				mismatch: Some(MismatchInfo{ low: 1, high: 4 }),
			})},
		];
		for hdr in headers {
			let mut packer = Packer::new();
			pack_replyheader(&mut packer, &hdr).unwrap();
			let mut unpacker = Unpacker::new();
			unpacker.reset(packer.get_buf());
			let decoded = unpack_replyheader(&mut unpacker).unwrap();
			assert_eq!(decoded.call_status(), hdr.call_status());
			assert!(unpacker.all_data_consumed());
		}
	}
}
