
pub const RPCVERSION:u32 = 2;

pub const CALL:i32  = 0;
pub const REPLY:i32 = 1;

pub const MSG_ACCEPTED:i32 = 0;
pub const MSG_DENIED:i32 = 1;

pub const RPC_MISMATCH:i32 = 0;       // RPC version number != 2
pub const AUTH_ERROR:i32 = 1;         // remote can't authenticate caller

pub const SUCCESS:i32 = 0;            // RPC executed successfully
pub const PROG_UNAVAIL:i32  = 1;      // remote hasn't exported program
pub const PROG_MISMATCH:i32 = 2;      // remote can't support version #
pub const PROC_UNAVAIL:i32  = 3;      // program can't support procedure
pub const GARBAGE_ARGS:i32  = 4;      // procedure can't decode params
pub const SYSTEM_ERR:i32    = 5;      // e.g. memory allocation failure

pub const AUTH_NONE:i32 = 0;

// Record marking (RFC5531 section 11)
pub const LAST_FRAGMENT:u32 = 0x80000000;
pub const MAX_FRAGMENT:u32  = 0x7fffffff;

// Largest reply record a client will buffer unless told otherwise
pub const DEFAULT_MAX_RECORD:usize = 1 << 20;

pub mod status;
pub mod error;
pub mod reply;

pub mod xdr_unpack;
pub mod xdr_pack;

pub mod tcp_clients;

pub use error::{message, CallError, CallStatus, Error, Result, TransportError};
pub use reply::{check_call_hdr, AcceptedReply, MismatchInfo, OpaqueAuth, RejectedReply, ReplyBody, ReplyHeader};
