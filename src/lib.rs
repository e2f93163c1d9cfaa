
// External data representation, a protocol for serializing data to be sent over the network
pub mod xdr;

// Remote procedure call (RFC5531), built on top of XDR.  The interesting part is deciding whether a reply
// actually carries a result before anyone tries to decode it.
pub mod rpc;

pub use rpc::{check_call_hdr, message, CallError, CallStatus, TransportError};
pub use rpc::status::{AcceptStatus, AuthStatus, RejectStatus};
