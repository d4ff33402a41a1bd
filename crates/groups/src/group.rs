use serde::{Deserialize, Serialize};

use splitledger_core::{GroupId, MemberId};

/// A named circle of members sharing expenses.
///
/// The creator is always a member. The roster is append-only: members can be
/// added (by the creator, via the registry) but never removed. `active` is
/// reserved for soft-deactivation; no core operation flips it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    creator: MemberId,
    members: Vec<MemberId>,
    active: bool,
}

impl Group {
    pub(crate) fn new(id: GroupId, creator: MemberId, members: Vec<MemberId>) -> Self {
        Self {
            id,
            creator,
            members,
            active: true,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn creator(&self) -> MemberId {
        self.creator
    }

    /// Members in insertion order, creator first.
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_member(&self, who: MemberId) -> bool {
        self.members.contains(&who)
    }

    pub(crate) fn push_member(&mut self, member: MemberId) {
        self.members.push(member);
    }
}
