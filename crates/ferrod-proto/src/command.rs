//! IRC commands.

use std::fmt;

use crate::response::Response;

/// An IRC command with its parameters.
///
/// Commands with dedicated routing semantics get typed variants; anything
/// else round-trips through [`Command::Raw`]. A typed command whose
/// parameter count is wrong on the wire is preserved as `Raw` so the
/// handler layer can reply `ERR_NEEDMOREPARAMS` rather than the parser
/// guessing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `PRIVMSG <targetlist> <text>`
    PRIVMSG(String, String),
    /// `NOTICE <targetlist> <text>`
    NOTICE(String, String),
    /// `AWAY [<reason>]` - absent reason clears away status.
    AWAY(Option<String>),
    /// A numeric reply with its parameters.
    Response(Response, Vec<String>),
    /// Any other command, verbatim (name uppercased).
    Raw(String, Vec<String>),
}

impl Command {
    /// Build a command from a wire token and parameters.
    pub fn new(name: &str, mut args: Vec<String>) -> Command {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            "PRIVMSG" if args.len() == 2 => {
                let text = args.pop().unwrap_or_default();
                let target = args.pop().unwrap_or_default();
                Command::PRIVMSG(target, text)
            }
            "NOTICE" if args.len() == 2 => {
                let text = args.pop().unwrap_or_default();
                let target = args.pop().unwrap_or_default();
                Command::NOTICE(target, text)
            }
            "AWAY" if args.len() <= 1 => Command::AWAY(args.pop()),
            _ => {
                if let Ok(code) = upper.parse::<u16>() {
                    if let Some(resp) = Response::from_code(code) {
                        return Command::Response(resp, args);
                    }
                }
                Command::Raw(upper, args)
            }
        }
    }

    /// The command token, used for handler registry lookup.
    pub fn name(&self) -> &str {
        match self {
            Command::PRIVMSG(..) => "PRIVMSG",
            Command::NOTICE(..) => "NOTICE",
            Command::AWAY(_) => "AWAY",
            Command::Response(..) => "",
            Command::Raw(name, _) => name,
        }
    }
}

/// Write parameters in wire form: the final parameter is sent as a
/// trailing (`:`-prefixed) argument when it needs one.
fn write_params(f: &mut fmt::Formatter<'_>, args: &[String]) -> fmt::Result {
    if let Some((last, middle)) = args.split_last() {
        for arg in middle {
            write!(f, " {arg}")?;
        }
        if last.is_empty() || last.contains(' ') || last.starts_with(':') {
            write!(f, " :{last}")?;
        } else {
            write!(f, " {last}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PRIVMSG(target, text) => write!(f, "PRIVMSG {target} :{text}"),
            Command::NOTICE(target, text) => write!(f, "NOTICE {target} :{text}"),
            Command::AWAY(None) => f.write_str("AWAY"),
            Command::AWAY(Some(reason)) => write!(f, "AWAY :{reason}"),
            Command::Response(resp, args) => {
                write!(f, "{resp}")?;
                write_params(f, args)
            }
            Command::Raw(name, args) => {
                f.write_str(name)?;
                write_params(f, args)
            }
        }
    }
}
