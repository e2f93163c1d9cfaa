
use std::fmt;
use std::io;

use thiserror::Error;

use super::status::{AcceptStatus, AuthStatus, RejectStatus};

// Every reason a server can give for declining to execute a call it received, plus the
// default "executed successfully".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStatus {
	Accept(AcceptStatus),
	Auth(AuthStatus),
	Reject(RejectStatus),
}

impl Default for CallStatus {
	fn default() -> Self { CallStatus::Accept(AcceptStatus::Success) }
}

impl CallStatus {
	pub fn message(&self) -> &'static str { match self {
		CallStatus::Accept(s) => s.message(),
		CallStatus::Auth(s)   => s.message(),
		CallStatus::Reject(s) => s.message(),
	}}

	pub fn is_success(&self) -> bool { *self == CallStatus::default() }
}

impl From<AcceptStatus> for CallStatus {
	fn from(s:AcceptStatus) -> Self { CallStatus::Accept(s) }
}

impl From<AuthStatus> for CallStatus {
	fn from(s:AuthStatus) -> Self { CallStatus::Auth(s) }
}

impl From<RejectStatus> for CallStatus {
	fn from(s:RejectStatus) -> Self { CallStatus::Reject(s) }
}

impl fmt::Display for CallStatus {
	fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.message()) }
}

// Translate any of the three RFC5531 outcome enumerations into text.
pub fn message<S:Into<CallStatus>>(s:S) -> &'static str { s.into().message() }

// The server was reached and answered, but refused to execute the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CallError {
	status: CallStatus,
	message: &'static str,
}

impl CallError {
	pub fn new(status:CallStatus) -> Self { Self{ message: status.message(), status } }

	pub fn status(&self) -> CallStatus { self.status }
	pub fn message(&self) -> &'static str { self.message }
}

impl From<CallStatus> for CallError {
	fn from(s:CallStatus) -> Self { CallError::new(s) }
}

// A local OS or network failure while sending a call or waiting for its reply.
//
// The OS error code has to be captured at the failure site.  Anything that runs in between (even logging)
// is allowed to clobber `errno`, so the code is always passed in or taken from the `io::Error` that the
// failing call returned.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
	code: Option<i32>,
	message: String,
}

impl TransportError {
	pub fn new(what:&str, code:i32) -> Self {
		let message = format!("{}: {}", what, io::Error::from_raw_os_error(code));
		Self{ code: Some(code), message }
	}

	// Reads the thread's last OS error immediately.  Call this directly after the failing syscall.
	pub fn last_os_error(what:&str) -> Self {
		let e = io::Error::last_os_error();
		Self::from_io(what, &e)
	}

	pub fn from_io(what:&str, e:&io::Error) -> Self {
		match e.raw_os_error() {
			Some(code) => Self::new(what, code),
			None       => Self{ code: None, message: format!("{}: {}", what, e) },
		}
	}

	pub fn code(&self) -> Option<i32> { self.code }
	pub fn message(&self) -> &str { &self.message }
}

// Everything a client call can fail with.  `io::Error` deliberately has no `From` impl: whether a given
// io failure is a transport problem or a malformed reply depends on where it happened.
#[derive(Debug, Error)]
pub enum Error {
	#[error("call declined by server: {0}")]
	Call(#[from] CallError),
	#[error(transparent)]
	Transport(#[from] TransportError),
	#[error("malformed reply: {0}")]
	Malformed(#[source] io::Error),
	#[error("call of {0} bytes does not fit in a single record fragment")]
	CallTooLarge(usize),
	#[error("reply xid {got} does not match any outstanding call (expected {expected})")]
	XidMismatch { expected:u32, got:u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
