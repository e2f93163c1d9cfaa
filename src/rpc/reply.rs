
use tracing::{debug, warn};

use super::error::{CallError, CallStatus};
use super::status::{AcceptStatus, AuthStatus, RejectStatus};
use super::AUTH_NONE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueAuth {
	pub flavor: i32,
	pub body: Vec<u8>,
}

impl Default for OpaqueAuth {
	fn default() -> Self { Self{ flavor: AUTH_NONE, body: vec![] } }
}

// Lowest and highest version the server supports, sent along with RPC_MISMATCH and PROG_MISMATCH
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MismatchInfo {
	pub low: u32,
	pub high: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedReply {
	pub verf: OpaqueAuth,
	pub stat: AcceptStatus,
	pub mismatch: Option<MismatchInfo>,	// Only present when stat is PROG_MISMATCH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedReply {
	RpcMismatch(MismatchInfo),
	AuthError(AuthStatus),
}

impl RejectedReply {
	pub fn stat(&self) -> RejectStatus { match self {
		RejectedReply::RpcMismatch(_) => RejectStatus::RpcMismatch,
		RejectedReply::AuthError(_)   => RejectStatus::AuthError,
	}}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
	Accepted(AcceptedReply),
	Denied(RejectedReply),
}

// The RPC message header that precedes a call's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyHeader {
	pub xid: u32,
	pub body: ReplyBody,
}

impl ReplyHeader {
	pub fn success(xid:u32) -> Self {
		Self{ xid, body: ReplyBody::Accepted(AcceptedReply{ verf: OpaqueAuth::default(), stat: AcceptStatus::Success, mismatch: None }) }
	}

	// Which of the three outcomes this header reports.  Authentication failures are reported with their
	// auth_stat rather than the less specific AUTH_ERROR.
	pub fn call_status(&self) -> CallStatus { match &self.body {
		ReplyBody::Denied(RejectedReply::AuthError(why)) => CallStatus::Auth(*why),
		ReplyBody::Denied(r)                             => CallStatus::Reject(r.stat()),
		ReplyBody::Accepted(a)                           => CallStatus::Accept(a.stat),
	}}
}

// Check that an RPC header precedes a result.  Nothing after the header may be decoded unless this
// returns `Ok`.
pub fn check_call_hdr(hdr:&ReplyHeader) -> Result<(), CallError> {
	let status = hdr.call_status();
	match status {
		CallStatus::Accept(AcceptStatus::Success) => {
			debug!(xid = hdr.xid, "call accepted");
			Ok(())
		},
		CallStatus::Accept(_) | CallStatus::Auth(_) | CallStatus::Reject(_) => {
			warn!(xid = hdr.xid, status = ?status, "server declined call: {}", status);
			Err(CallError::new(status))
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn accepted(stat:AcceptStatus) -> ReplyHeader {
		let mismatch = if stat == AcceptStatus::ProgMismatch { Some(MismatchInfo{ low: 1, high: 3 }) } else { None };
		ReplyHeader{ xid: 7, body: ReplyBody::Accepted(AcceptedReply{ verf: OpaqueAuth::default(), stat, mismatch }) }
	}

	fn denied(r:RejectedReply) -> ReplyHeader {
		ReplyHeader{ xid: 7, body: ReplyBody::Denied(r) }
	}

	#[test]
	fn accepted_success_proceeds() {
		assert!(check_call_hdr(&accepted(AcceptStatus::Success)).is_ok());
		assert!(check_call_hdr(&ReplyHeader::success(1)).is_ok());
	}

	#[test]
	fn rpc_mismatch_is_a_rejection() {
		let e = check_call_hdr(&denied(RejectedReply::RpcMismatch(MismatchInfo{ low: 2, high: 2 }))).unwrap_err();
		assert_eq!(e.status(), CallStatus::Reject(RejectStatus::RpcMismatch));
		assert_eq!(e.message(), RejectStatus::RpcMismatch.message());
	}

	#[test]
	fn proc_unavail_is_an_accept_failure() {
		let e = check_call_hdr(&accepted(AcceptStatus::ProcUnavail)).unwrap_err();
		assert_eq!(e.status(), CallStatus::Accept(AcceptStatus::ProcUnavail));
	}

	#[test]
	fn auth_error_reports_the_auth_reason() {
		let e = check_call_hdr(&denied(RejectedReply::AuthError(AuthStatus::TooWeak))).unwrap_err();
		assert_eq!(e.status(), CallStatus::Auth(AuthStatus::TooWeak));
		assert_eq!(e.message(), "rejected for security reasons");
	}

	#[test]
	fn every_non_success_accept_stat_fails() {
		let stats = [
			AcceptStatus::ProgUnavail, AcceptStatus::ProgMismatch, AcceptStatus::ProcUnavail,
			AcceptStatus::GarbageArgs, AcceptStatus::SystemErr, AcceptStatus::Unknown(42),
		];
		for stat in stats.iter() {
			let e = check_call_hdr(&accepted(*stat)).unwrap_err();
			assert_eq!(e.status(), CallStatus::Accept(*stat));
			assert!(!e.message().is_empty());
		}
	}

	#[test]
	fn auth_ok_in_a_denial_still_fails() {
		// A server that denies with AUTH_ERROR/AUTH_OK is confused, but it still didn't run the call
		assert!(check_call_hdr(&denied(RejectedReply::AuthError(AuthStatus::Ok))).is_err());
	}
}
