//! # ferrod-proto
//!
//! Protocol types for the ferrod IRC server: owned message values with
//! IRCv3 tags, the numeric replies the server emits, CTCP framing, IRC
//! casemapping, and mask matching.
//!
//! ## Quick start
//!
//! ```
//! use ferrod_proto::{Message, Prefix};
//!
//! let msg = Message::privmsg("#rust", "Hello, world!")
//!     .with_prefix(Prefix::new("alice", "alice", "host.example.net"));
//! assert_eq!(msg.to_string(), ":alice!alice@host.example.net PRIVMSG #rust :Hello, world!\r\n");
//!
//! let parsed: Message = "@msgid=abc :bob!b@h NOTICE alice :hi".parse().unwrap();
//! assert_eq!(parsed.tag_value("msgid"), Some("abc"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod command;
pub mod ctcp;
pub mod error;
pub mod message;
pub mod prefix;
pub mod response;
pub mod util;

pub use self::casemap::CaseMapping;
pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::ctcp::Ctcp;
pub use self::error::MessageParseError;
pub use self::message::{Message, Tag};
pub use self::prefix::Prefix;
pub use self::response::Response;
pub use self::util::match_mask;
