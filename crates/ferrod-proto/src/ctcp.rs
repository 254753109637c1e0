//! CTCP framing.
//!
//! CTCP messages ride inside PRIVMSG/NOTICE bodies delimited by SOH
//! (`\x01`). Per draft-oakley-irc-ctcp-02 a CTCP must begin with SOH and
//! contain at least one octet that is not NUL, SOH, CR, LF, or space; the
//! protocol framer already excludes NUL/CR/LF, so only SOH and space are
//! checked here. The trailing SOH is an optional trim: clients that omit
//! it are accepted.

use std::fmt;

/// The CTCP delimiter octet.
pub const CTCP_DELIM: u8 = 0x01;

/// A decoded CTCP message, borrowing from the message body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ctcp<'a> {
    /// The CTCP command name, e.g. `ACTION` or `VERSION`.
    pub name: &'a str,
    /// The body following the name; empty when absent.
    pub body: &'a str,
}

impl<'a> Ctcp<'a> {
    /// Check whether a message body carries a CTCP.
    #[inline]
    pub fn is_ctcp(text: &str) -> bool {
        let b = text.as_bytes();
        b.len() >= 2 && b[0] == CTCP_DELIM && b[1] != CTCP_DELIM && b[1] != b' '
    }

    /// Decode a CTCP body into `(name, body)`.
    ///
    /// Returns `None` when the text is not a CTCP. Decoding is pure and
    /// deliberately lenient about framing: the trailing SOH may be
    /// missing, and runs of spaces between name and body are skipped.
    pub fn parse(text: &'a str) -> Option<Self> {
        if !Self::is_ctcp(text) {
            return None;
        }

        let bytes = text.as_bytes();
        let tail_trim = usize::from(bytes[bytes.len() - 1] == CTCP_DELIM);
        let end = bytes.len() - tail_trim;

        let Some(name_end) = bytes.iter().take(end).skip(2).position(|&b| b == b' ') else {
            // Name only.
            return Some(Ctcp {
                name: &text[1..end],
                body: "",
            });
        };
        let name_end = name_end + 2;

        let body_start = (name_end + 1..end).find(|&i| bytes[i] != b' ');
        Some(Ctcp {
            name: &text[1..name_end],
            body: match body_start {
                Some(start) => &text[start..end],
                None => "",
            },
        })
    }
}

impl fmt::Display for Ctcp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x01{}", self.name)?;
        if !self.body.is_empty() {
            write!(f, " {}", self.body)?;
        }
        write!(f, "\x01")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_with_body() {
        let ctcp = Ctcp::parse("\x01ACTION waves\x01").unwrap();
        assert_eq!(ctcp.name, "ACTION");
        assert_eq!(ctcp.body, "waves");
    }

    #[test]
    fn name_only() {
        let ctcp = Ctcp::parse("\x01VERSION\x01").unwrap();
        assert_eq!(ctcp.name, "VERSION");
        assert_eq!(ctcp.body, "");

        let ctcp = Ctcp::parse("\x01PING\x01").unwrap();
        assert_eq!(ctcp.name, "PING");
        assert_eq!(ctcp.body, "");
    }

    #[test]
    fn unterminated_is_accepted() {
        let ctcp = Ctcp::parse("\x01PING 12345").unwrap();
        assert_eq!(ctcp.name, "PING");
        assert_eq!(ctcp.body, "12345");

        let ctcp = Ctcp::parse("\x01VERSION").unwrap();
        assert_eq!(ctcp.name, "VERSION");
        assert_eq!(ctcp.body, "");
    }

    #[test]
    fn double_soh_is_not_ctcp() {
        assert!(!Ctcp::is_ctcp("\x01\x01"));
        assert!(Ctcp::parse("\x01\x01").is_none());
    }

    #[test]
    fn space_after_soh_is_not_ctcp() {
        assert!(!Ctcp::is_ctcp("\x01 ACTION\x01"));
        assert!(Ctcp::parse("\x01 ACTION\x01").is_none());
    }

    #[test]
    fn plain_text_is_not_ctcp() {
        assert!(!Ctcp::is_ctcp("hello world"));
        assert!(!Ctcp::is_ctcp(""));
        assert!(!Ctcp::is_ctcp("\x01"));
    }

    #[test]
    fn space_runs_before_body_are_skipped() {
        let ctcp = Ctcp::parse("\x01PING   12345\x01").unwrap();
        assert_eq!(ctcp.body, "12345");
    }

    #[test]
    fn trailing_spaces_leave_empty_body() {
        let ctcp = Ctcp::parse("\x01PING   \x01").unwrap();
        assert_eq!(ctcp.name, "PING");
        assert_eq!(ctcp.body, "");
    }

    #[test]
    fn display_reframes() {
        let ctcp = Ctcp {
            name: "ACTION",
            body: "dances",
        };
        assert_eq!(ctcp.to_string(), "\x01ACTION dances\x01");
    }
}
