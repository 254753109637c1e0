//! Wire serialisation.

use std::fmt::{self, Display, Formatter};

use super::tags::escape_tag_value;
use super::Message;

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref tags) = self.tags {
            f.write_str("@")?;
            for (i, tag) in tags.iter().enumerate() {
                if i > 0 {
                    f.write_str(";")?;
                }
                f.write_str(&tag.name)?;
                if let Some(ref value) = tag.value {
                    write!(f, "={}", escape_tag_value(value))?;
                }
            }
            f.write_str(" ")?;
        }

        if let Some(ref prefix) = self.prefix {
            write!(f, ":{prefix} ")?;
        }

        write!(f, "{}\r\n", self.command)
    }
}
