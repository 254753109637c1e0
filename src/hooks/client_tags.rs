//! Client-only tag relay.

use super::{HookVerdict, MessageHook};
use crate::handlers::messaging::{MessageDetails, MessageTarget, SenderSnapshot};

/// Copies client-originated `+`-prefixed tags from the received message
/// onto the outbound one, so recipients see tags like `+draft/reply`.
/// Server tags never pass through.
#[derive(Default)]
pub struct ClientTagRelay;

impl MessageHook for ClientTagRelay {
    fn name(&self) -> &'static str {
        "client-tags"
    }

    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        details: &mut MessageDetails,
    ) -> HookVerdict {
        for (name, value) in &details.tags_in {
            if name.starts_with('+') {
                details.tags_out.insert(name.clone(), value.clone());
            }
        }
        HookVerdict::Continue
    }
}
