//! # ferrod
//!
//! The message-routing core of the ferrod IRC server: everything between
//! a parsed `PRIVMSG`/`NOTICE` and the recipient write buffers.
//!
//! A dispatch moves through five cooperating pieces:
//!
//! 1. **Target resolution** ([`handlers::messaging::resolve_target`]) -
//!    classifies the raw target as a user, a channel (optionally
//!    status-prefixed), or a `$` server mask, and looks the referent up.
//! 2. **Permission gate** ([`handlers::messaging::check_channel_send`]) -
//!    for channel targets from local, sub-voice senders: `+n`, `+m`,
//!    and the tri-state ban policy.
//! 3. **Filter chain** ([`hooks`]) - registered modules may veto the
//!    message, rewrite its body, add outbound tags, or extend the
//!    exemption set, then observe the result.
//! 4. **Fan-out** ([`handlers::messaging::dispatch_message`]) - single
//!    user send, channel delivery with exemptions and status-rank
//!    filtering, or server-wide mass message.
//! 5. **Routing classification** - tells the caller whether the
//!    dispatch is done locally or still owes the server link a forward
//!    or broadcast.
//!
//! The core is single-threaded cooperative: one owner holds the
//! [`state::Network`] tables and every dispatch runs to completion
//! without suspension. The only async-adjacent seam is the unbounded
//! per-connection write buffer each local user owns; enqueueing never
//! blocks and delivery is fire-and-forget.

pub mod config;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod state;

pub use config::{BanPolicy, Config};
pub use error::{HandlerError, HandlerResult, RouteError};
pub use handlers::messaging::{
    dispatch_message, MessageDetails, MessageKind, MessageTarget, RouteDecision, SenderSnapshot,
};
pub use handlers::{Context, Handler, Registry};
pub use hooks::{HookRegistry, HookVerdict, MessageHook};
pub use state::{Network, UserId};
