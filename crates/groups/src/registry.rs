//! Group registry: exclusive owner of all [`Group`] records.

use splitledger_core::{GroupId, LedgerError, LedgerResult, MemberId};

use crate::group::Group;

/// Owns group records and enforces creator authorization.
///
/// Ids are a monotonic counter starting at 0: the registry is an explicitly
/// owned store, so independent registries (one per engine instance, one per
/// test) never collide.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Creates a group and returns its id.
    ///
    /// The creator is always included as a member, whether or not it appears
    /// in `initial_members`; duplicates in the input are collapsed (exact
    /// match, no normalization). Null identities are rejected.
    pub fn create_group(
        &mut self,
        creator: MemberId,
        initial_members: &[MemberId],
    ) -> LedgerResult<GroupId> {
        if creator.is_zero() {
            return Err(LedgerError::invalid_member("creator is the null identity"));
        }

        let mut members = vec![creator];
        for &candidate in initial_members {
            if candidate.is_zero() {
                return Err(LedgerError::invalid_member("null identity in member list"));
            }
            if !members.contains(&candidate) {
                members.push(candidate);
            }
        }

        let id = GroupId::new(self.groups.len() as u64);
        self.groups.push(Group::new(id, creator, members));
        Ok(id)
    }

    /// Appends a member; only the group's creator may call this.
    pub fn add_member(
        &mut self,
        group_id: GroupId,
        caller: MemberId,
        new_member: MemberId,
    ) -> LedgerResult<()> {
        let group = self.group_mut(group_id)?;
        if caller != group.creator() {
            return Err(LedgerError::Unauthorized);
        }
        if new_member.is_zero() {
            return Err(LedgerError::invalid_member("null identity"));
        }
        if group.is_member(new_member) {
            return Err(LedgerError::AlreadyMember);
        }
        group.push_member(new_member);
        Ok(())
    }

    pub fn group(&self, group_id: GroupId) -> LedgerResult<&Group> {
        self.groups
            .get(group_id.as_u64() as usize)
            .ok_or(LedgerError::NotFound)
    }

    pub fn members(&self, group_id: GroupId) -> LedgerResult<&[MemberId]> {
        Ok(self.group(group_id)?.members())
    }

    pub fn is_member(&self, group_id: GroupId, who: MemberId) -> LedgerResult<bool> {
        Ok(self.group(group_id)?.is_member(who))
    }

    pub fn group_count(&self) -> u64 {
        self.groups.len() as u64
    }

    fn group_mut(&mut self, group_id: GroupId) -> LedgerResult<&mut Group> {
        self.groups
            .get_mut(group_id.as_u64() as usize)
            .ok_or(LedgerError::NotFound)
    }
}
