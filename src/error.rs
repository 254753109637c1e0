//! Unified error handling for ferrod.
//!
//! Two layers: [`RouteError`] covers per-dispatch routing failures
//! (terminal for the current dispatch, never fatal for the process),
//! [`HandlerError`] covers command-layer failures before routing begins.
//! Both convert to IRC numeric replies where the protocol calls for one;
//! variants that must stay silent on the wire convert to `None`.

use ferrod_proto::{Message, Prefix, Response};
use thiserror::Error;

/// Why a single dispatch failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The target nickname did not resolve (unknown, unregistered, or on
    /// the wrong server for a `nick@server` target).
    #[error("no such nick: {0}")]
    NoSuchNick(String),

    /// The target channel does not exist.
    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    /// A channel-mode or ban check rejected the sender. `notify` is
    /// false when the ban policy silences the numeric.
    #[error("cannot send to {channel} ({reason})")]
    CannotSendToChannel {
        /// The channel's canonical name.
        channel: String,
        /// Short reason, e.g. `+m`.
        reason: &'static str,
        /// Whether a numeric is sent to the sender.
        notify: bool,
    },

    /// The message body was empty, either as sent or after a filter
    /// emptied it.
    #[error("no text to send")]
    NoTextToSend,

    /// A pre-message hook vetoed the dispatch. Silent on the wire; the
    /// filter itself is expected to notify if it wants to.
    #[error("denied by message filter")]
    FilterDenied,
}

impl RouteError {
    /// Static code for tracing and metrics labels.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::CannotSendToChannel { .. } => "cannot_send_to_chan",
            Self::NoTextToSend => "no_text_to_send",
            Self::FilterDenied => "filter_denied",
        }
    }

    /// Convert to the numeric reply owed to the sender, if any.
    pub fn to_numeric(&self, server_name: &str, nick: &str) -> Option<Message> {
        let mut msg = match self {
            Self::NoSuchNick(target) => Response::err_nosuchnick(nick, target),
            Self::NoSuchChannel(target) => Response::err_nosuchchannel(nick, target),
            Self::CannotSendToChannel {
                channel,
                reason,
                notify: true,
            } => Response::err_cannotsendtochan(
                nick,
                channel,
                &format!("Cannot send to channel ({reason})"),
            ),
            Self::NoTextToSend => Response::err_notexttosend(nick),

            // Silent failures.
            Self::CannotSendToChannel { notify: false, .. } => return None,
            Self::FilterDenied => return None,
        };
        msg.prefix = Some(Prefix::ServerName(server_name.to_owned()));
        Some(msg)
    }
}

/// Errors raised by the command layer before a dispatch starts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("not registered")]
    NotRegistered,

    #[error("internal error: sender missing from user table")]
    SenderMissing,
}

impl HandlerError {
    /// Static code for tracing and metrics labels.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NotRegistered => "not_registered",
            Self::SenderMissing => "sender_missing",
        }
    }

    /// Convert to the numeric reply owed to the sender, if any.
    pub fn to_numeric(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let mut msg = match self {
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::NotRegistered => Response::err_notregistered(nick),
            Self::SenderMissing => return None,
        };
        msg.prefix = Some(Prefix::ServerName(server_name.to_owned()));
        Some(msg)
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
