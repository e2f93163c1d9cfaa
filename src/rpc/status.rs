
// The three outcome enumerations from RFC5531.  A peer may send values from a later revision of the protocol,
// so each one keeps the raw wire value around instead of refusing to decode.

use std::fmt;

use super::{SUCCESS, PROG_UNAVAIL, PROG_MISMATCH, PROC_UNAVAIL, GARBAGE_ARGS, SYSTEM_ERR};
use super::{RPC_MISMATCH, AUTH_ERROR};

// Outcome of a call whose envelope the server accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptStatus {
	Success,
	ProgUnavail,
	ProgMismatch,
	ProcUnavail,
	GarbageArgs,
	SystemErr,
	Unknown(i32),
}

// Why the server refused the caller's credential or verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStatus {
	Ok,
	BadCred,
	RejectedCred,
	BadVerf,
	RejectedVerf,
	TooWeak,
	InvalidResp,
	Failed,
	KerbGeneric,
	TimeExpire,
	TktFile,
	Decode,
	NetAddr,
	GssCredProblem,
	GssCtxProblem,
	Unknown(i32),
}

// Why the server refused the call envelope before dispatching to any program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectStatus {
	RpcMismatch,
	AuthError,
	Unknown(i32),
}

impl AcceptStatus {
	pub fn value(self) -> i32 { match self {
		AcceptStatus::Success      => SUCCESS,
		AcceptStatus::ProgUnavail  => PROG_UNAVAIL,
		AcceptStatus::ProgMismatch => PROG_MISMATCH,
		AcceptStatus::ProcUnavail  => PROC_UNAVAIL,
		AcceptStatus::GarbageArgs  => GARBAGE_ARGS,
		AcceptStatus::SystemErr    => SYSTEM_ERR,
		AcceptStatus::Unknown(x)   => x,
	}}

	pub fn message(self) -> &'static str { match self {
		AcceptStatus::Success      => "RPC executed successfully",
		AcceptStatus::ProgUnavail  => "remote hasn't exported program",
		AcceptStatus::ProgMismatch => "remote can't support version #",
		AcceptStatus::ProcUnavail  => "program can't support procedure",
		AcceptStatus::GarbageArgs  => "procedure can't decode params",
		AcceptStatus::SystemErr    => "RPC system error",
		AcceptStatus::Unknown(_)   => "unknown accept_stat error",
	}}
}

impl From<i32> for AcceptStatus {
	fn from(x:i32) -> Self { match x {
		SUCCESS       => AcceptStatus::Success,
		PROG_UNAVAIL  => AcceptStatus::ProgUnavail,
		PROG_MISMATCH => AcceptStatus::ProgMismatch,
		PROC_UNAVAIL  => AcceptStatus::ProcUnavail,
		GARBAGE_ARGS  => AcceptStatus::GarbageArgs,
		SYSTEM_ERR    => AcceptStatus::SystemErr,
		_             => AcceptStatus::Unknown(x),
	}}
}

impl AuthStatus {
	pub fn value(self) -> i32 { match self {
		AuthStatus::Ok             => 0,
		AuthStatus::BadCred        => 1,
		AuthStatus::RejectedCred   => 2,
		AuthStatus::BadVerf        => 3,
		AuthStatus::RejectedVerf   => 4,
		AuthStatus::TooWeak        => 5,
		AuthStatus::InvalidResp    => 6,
		AuthStatus::Failed         => 7,
		AuthStatus::KerbGeneric    => 8,
		AuthStatus::TimeExpire     => 9,
		AuthStatus::TktFile        => 10,
		AuthStatus::Decode         => 11,
		AuthStatus::NetAddr        => 12,
		AuthStatus::GssCredProblem => 13,
		AuthStatus::GssCtxProblem  => 14,
		AuthStatus::Unknown(x)     => x,
	}}

	pub fn message(self) -> &'static str { match self {
		AuthStatus::Ok             => "success",
		AuthStatus::BadCred        => "bad credential (seal broken)",
		AuthStatus::RejectedCred   => "client must begin new session",
		AuthStatus::BadVerf        => "bad verifier (seal broken)",
		AuthStatus::RejectedVerf   => "verifier expired or replayed",
		AuthStatus::TooWeak        => "rejected for security reasons",
		AuthStatus::InvalidResp    => "bogus response verifier",
		AuthStatus::Failed         => "reason unknown",
		AuthStatus::KerbGeneric    => "kerberos generic error",
		AuthStatus::TimeExpire     => "time of credential expired",
		AuthStatus::TktFile        => "problem with ticket file",
		AuthStatus::Decode         => "can't decode authenticator",
		AuthStatus::NetAddr        => "wrong net address in ticket",
		AuthStatus::GssCredProblem => "no credentials for user",
		AuthStatus::GssCtxProblem  => "problem with context",
		AuthStatus::Unknown(_)     => "unknown auth_stat error",
	}}
}

impl From<i32> for AuthStatus {
	fn from(x:i32) -> Self { match x {
		0  => AuthStatus::Ok,
		1  => AuthStatus::BadCred,
		2  => AuthStatus::RejectedCred,
		3  => AuthStatus::BadVerf,
		4  => AuthStatus::RejectedVerf,
		5  => AuthStatus::TooWeak,
		6  => AuthStatus::InvalidResp,
		7  => AuthStatus::Failed,
		8  => AuthStatus::KerbGeneric,
		9  => AuthStatus::TimeExpire,
		10 => AuthStatus::TktFile,
		11 => AuthStatus::Decode,
		12 => AuthStatus::NetAddr,
		13 => AuthStatus::GssCredProblem,
		14 => AuthStatus::GssCtxProblem,
		_  => AuthStatus::Unknown(x),
	}}
}

impl RejectStatus {
	pub fn value(self) -> i32 { match self {
		RejectStatus::RpcMismatch => RPC_MISMATCH,
		RejectStatus::AuthError   => AUTH_ERROR,
		RejectStatus::Unknown(x)  => x,
	}}

	pub fn message(self) -> &'static str { match self {
		RejectStatus::RpcMismatch => "rpcvers field mismatch",
		RejectStatus::AuthError   => "remote can't authenticate caller",
		RejectStatus::Unknown(_)  => "unknown reject_stat error",
	}}
}

impl From<i32> for RejectStatus {
	fn from(x:i32) -> Self { match x {
		RPC_MISMATCH => RejectStatus::RpcMismatch,
		AUTH_ERROR   => RejectStatus::AuthError,
		_            => RejectStatus::Unknown(x),
	}}
}

impl fmt::Display for AcceptStatus {
	fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.message()) }
}

impl fmt::Display for AuthStatus {
	fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.message()) }
}

impl fmt::Display for RejectStatus {
	fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.message()) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	fn distinct(msgs:&[&str]) -> bool {
		msgs.iter().collect::<HashSet<_>>().len() == msgs.len()
	}

	#[test]
	fn every_known_value_has_its_own_message() {
		let accept:Vec<&str> = (0..=5).map(|x| AcceptStatus::from(x).message()).collect();
		let auth:Vec<&str>   = (0..=14).map(|x| AuthStatus::from(x).message()).collect();
		let reject:Vec<&str> = (0..=1).map(|x| RejectStatus::from(x).message()).collect();

		for msgs in &[&accept, &auth, &reject] {
			assert!(msgs.iter().all(|m| !m.is_empty()));
			assert!(distinct(msgs));
		}
	}

	#[test]
	fn unknown_values_fall_back() {
		assert_eq!(AcceptStatus::from(6).message(), "unknown accept_stat error");
		assert_eq!(AcceptStatus::from(-1).message(), "unknown accept_stat error");
		assert_eq!(AuthStatus::from(15).message(), "unknown auth_stat error");
		assert_eq!(RejectStatus::from(i32::MAX).message(), "unknown reject_stat error");

		// The fallback must not collide with a real enumerator's text
		assert!((0..=5).all(|x| AcceptStatus::from(x).message() != AcceptStatus::Unknown(99).message()));
	}

	#[test]
	fn wire_values_survive_conversion() {
		for x in -3..20 {
			assert_eq!(AcceptStatus::from(x).value(), x);
			assert_eq!(AuthStatus::from(x).value(), x);
			assert_eq!(RejectStatus::from(x).value(), x);
		}
		assert_eq!(AcceptStatus::from(PROC_UNAVAIL), AcceptStatus::ProcUnavail);
		assert_eq!(RejectStatus::from(RPC_MISMATCH), RejectStatus::RpcMismatch);
	}

	#[test]
	fn display_matches_message() {
		assert_eq!(RejectStatus::RpcMismatch.to_string(), "rpcvers field mismatch");
		assert_eq!(AuthStatus::TooWeak.to_string(), AuthStatus::TooWeak.message());
	}
}
