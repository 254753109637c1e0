//! Outbound message stamping.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use super::{HookVerdict, MessageHook};
use crate::handlers::messaging::{MessageDetails, MessageTarget, SenderSnapshot};

/// Stamps every outbound message with a `time` tag (RFC 3339,
/// millisecond precision) and a unique `msgid` tag.
#[derive(Default)]
pub struct MessageStamp;

impl MessageHook for MessageStamp {
    fn name(&self) -> &'static str {
        "stamp"
    }

    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        details: &mut MessageDetails,
    ) -> HookVerdict {
        details.tags_out.insert(
            "time".to_owned(),
            Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        details
            .tags_out
            .insert("msgid".to_owned(), Some(Uuid::new_v4().to_string()));
        HookVerdict::Continue
    }
}
