//! Instance identifier allocation.

use crate::model::InstanceId;

/// Allocates strictly increasing [`InstanceId`] values for one desktop session.
///
/// Ids are never reused, so a closed instance's id cannot alias a later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIdGenerator {
    next: u64,
}

impl Default for InstanceIdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl InstanceIdGenerator {
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
