//! Wire parsing.
//!
//! A single pass over the line: optional `@tags`, optional `:prefix`,
//! command token, then parameters with the usual trailing `:` rule.
//! Trailing CR/LF is stripped rather than required, so both framed lines
//! and bare strings parse.

use std::str::FromStr;

use super::tags::unescape_tag_value;
use super::{Message, Tag};
use crate::command::Command;
use crate::error::MessageParseError;
use crate::prefix::Prefix;

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim_end_matches(['\r', '\n']);
        if rest.is_empty() {
            return Err(MessageParseError::Empty);
        }

        let tags = if let Some(after) = rest.strip_prefix('@') {
            let (raw_tags, remainder) = after
                .split_once(' ')
                .ok_or(MessageParseError::MissingCommand)?;
            rest = remainder.trim_start_matches(' ');
            Some(parse_tags(raw_tags))
        } else {
            None
        };

        let prefix = if let Some(after) = rest.strip_prefix(':') {
            let (raw_prefix, remainder) = after
                .split_once(' ')
                .ok_or(MessageParseError::MissingCommand)?;
            rest = remainder.trim_start_matches(' ');
            Some(Prefix::parse(raw_prefix))
        } else {
            None
        };

        let (name, mut rest) = match rest.split_once(' ') {
            Some((name, remainder)) => (name, remainder.trim_start_matches(' ')),
            None => (rest, ""),
        };
        if name.is_empty() {
            return Err(MessageParseError::MissingCommand);
        }

        let mut params = Vec::new();
        while !rest.is_empty() {
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_owned());
                break;
            }
            match rest.split_once(' ') {
                Some((param, remainder)) => {
                    params.push(param.to_owned());
                    rest = remainder.trim_start_matches(' ');
                }
                None => {
                    params.push(rest.to_owned());
                    break;
                }
            }
        }

        Ok(Message {
            tags,
            prefix,
            command: Command::new(name, params),
        })
    }
}

fn parse_tags(raw: &str) -> Vec<Tag> {
    // An empty value ("key=") is equivalent to no value per the spec.
    raw.split(';')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| match chunk.split_once('=') {
            Some((name, value)) if !value.is_empty() => {
                Tag::new(name, Some(unescape_tag_value(value)))
            }
            Some((name, _)) => Tag::new(name, None),
            None => Tag::new(chunk, None),
        })
        .collect()
}
