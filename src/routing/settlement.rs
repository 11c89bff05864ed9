//! Request settlement state machine.
//!
//! # States
//! - Unsettled: declarations are still attempted
//! - Settled: a result is committed; later declarations are skipped
//! - PendingCancel: `back()` revoked the current scope; the next `end`
//!   discards its result and returns to Unsettled
//!
//! # State Transitions
//! ```text
//! Unsettled     --end(reply)-->  Settled { reply, scope }
//! Settled       --end(_)------>  Settled (unchanged)
//! PendingCancel --end(_)------>  Unsettled
//! Unsettled     --back-------->  PendingCancel
//! Settled       --back-------->  PendingCancel   (only from the settling scope or an enclosing one)
//! ```

use crate::routing::handler::Reply;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Settlement {
    #[default]
    Unsettled,
    Settled {
        reply: Option<Reply>,
        /// Nesting depth of the scope the commit happened in.
        scope: usize,
    },
    PendingCancel,
}

impl Settlement {
    /// Whether route declarations may still be attempted.
    pub fn is_open(&self) -> bool {
        matches!(self, Settlement::Unsettled)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Settlement::Settled { .. })
    }

    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Settlement::Settled { reply, .. } => reply.as_ref(),
            _ => None,
        }
    }

    /// Commit `reply` at nesting depth `scope`.
    ///
    /// Returns true if the reply was applied.
    pub fn end(&mut self, reply: Option<Reply>, scope: usize) -> bool {
        match self {
            Settlement::Unsettled => {
                *self = Settlement::Settled { reply, scope };
                true
            }
            Settlement::Settled { .. } => false,
            Settlement::PendingCancel => {
                *self = Settlement::Unsettled;
                false
            }
        }
    }

    /// Revoke from inside the scope at nesting depth `scope`.
    ///
    /// Fails if a scope outside `scope` already settled, or a cancel is
    /// already pending.
    pub fn cancel(&mut self, scope: usize) -> bool {
        match self {
            Settlement::Unsettled => {}
            Settlement::Settled { scope: settled_in, .. } if *settled_in >= scope => {}
            _ => return false,
        }
        *self = Settlement::PendingCancel;
        true
    }
}
