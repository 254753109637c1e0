//! IRC numeric replies.
//!
//! Only the numerics this server actually emits are modelled; unknown
//! codes parse into [`Command::Raw`](crate::Command::Raw) instead.

#![allow(non_camel_case_types)]

use std::fmt;

use crate::command::Command;
use crate::message::Message;

/// A numeric reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Response {
    /// `301` - target is away; params: client, nick, away reason.
    RPL_AWAY = 301,
    /// `305` - no longer marked away.
    RPL_UNAWAY = 305,
    /// `306` - now marked away.
    RPL_NOWAWAY = 306,
    /// `401` - no such nick/channel.
    ERR_NOSUCHNICK = 401,
    /// `403` - no such channel.
    ERR_NOSUCHCHANNEL = 403,
    /// `404` - cannot send to channel.
    ERR_CANNOTSENDTOCHAN = 404,
    /// `412` - no text to send.
    ERR_NOTEXTTOSEND = 412,
    /// `451` - you have not registered.
    ERR_NOTREGISTERED = 451,
    /// `461` - not enough parameters.
    ERR_NEEDMOREPARAMS = 461,
}

impl Response {
    /// The three-digit numeric code.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look a response up by code.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            301 => Some(Self::RPL_AWAY),
            305 => Some(Self::RPL_UNAWAY),
            306 => Some(Self::RPL_NOWAWAY),
            401 => Some(Self::ERR_NOSUCHNICK),
            403 => Some(Self::ERR_NOSUCHCHANNEL),
            404 => Some(Self::ERR_CANNOTSENDTOCHAN),
            412 => Some(Self::ERR_NOTEXTTOSEND),
            451 => Some(Self::ERR_NOTREGISTERED),
            461 => Some(Self::ERR_NEEDMOREPARAMS),
            _ => None,
        }
    }

    fn reply(self, args: Vec<String>) -> Message {
        Message {
            tags: None,
            prefix: None,
            command: Command::Response(self, args),
        }
    }

    /// `301 RPL_AWAY` - `<nick> :<away reason>`.
    pub fn rpl_away(client: &str, nick: &str, reason: &str) -> Message {
        Self::RPL_AWAY.reply(vec![client.to_owned(), nick.to_owned(), reason.to_owned()])
    }

    /// `305 RPL_UNAWAY` - `:You are no longer marked as being away`.
    pub fn rpl_unaway(client: &str) -> Message {
        Self::RPL_UNAWAY.reply(vec![
            client.to_owned(),
            "You are no longer marked as being away".to_owned(),
        ])
    }

    /// `306 RPL_NOWAWAY` - `:You have been marked as being away`.
    pub fn rpl_nowaway(client: &str) -> Message {
        Self::RPL_NOWAWAY.reply(vec![
            client.to_owned(),
            "You have been marked as being away".to_owned(),
        ])
    }

    /// `401 ERR_NOSUCHNICK` - `<target> :No such nick/channel`.
    pub fn err_nosuchnick(client: &str, target: &str) -> Message {
        Self::ERR_NOSUCHNICK.reply(vec![
            client.to_owned(),
            target.to_owned(),
            "No such nick/channel".to_owned(),
        ])
    }

    /// `403 ERR_NOSUCHCHANNEL` - `<channel> :No such channel`.
    pub fn err_nosuchchannel(client: &str, channel: &str) -> Message {
        Self::ERR_NOSUCHCHANNEL.reply(vec![
            client.to_owned(),
            channel.to_owned(),
            "No such channel".to_owned(),
        ])
    }

    /// `404 ERR_CANNOTSENDTOCHAN` - `<channel> :<reason>`.
    pub fn err_cannotsendtochan(client: &str, channel: &str, reason: &str) -> Message {
        Self::ERR_CANNOTSENDTOCHAN.reply(vec![
            client.to_owned(),
            channel.to_owned(),
            reason.to_owned(),
        ])
    }

    /// `412 ERR_NOTEXTTOSEND` - `:No text to send`.
    pub fn err_notexttosend(client: &str) -> Message {
        Self::ERR_NOTEXTTOSEND.reply(vec![client.to_owned(), "No text to send".to_owned()])
    }

    /// `451 ERR_NOTREGISTERED` - `:You have not registered`.
    pub fn err_notregistered(client: &str) -> Message {
        Self::ERR_NOTREGISTERED.reply(vec![client.to_owned(), "You have not registered".to_owned()])
    }

    /// `461 ERR_NEEDMOREPARAMS` - `<command> :Not enough parameters`.
    pub fn err_needmoreparams(client: &str, command: &str) -> Message {
        Self::ERR_NEEDMOREPARAMS.reply(vec![
            client.to_owned(),
            command.to_owned(),
            "Not enough parameters".to_owned(),
        ])
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
