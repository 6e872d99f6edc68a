//! Game instance access policy.
//!
//! Access is evaluated relative to the owner's social links rather than a
//! per-instance ACL: one block lookup and one friendship lookup answer every
//! check. The functions here are pure; `skirmish_db::access` gathers the
//! inputs and delegates the decision.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Per-instance visibility policy controlling who may discover or join
/// without explicit membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "instance_access_type", rename_all = "snake_case")]
pub enum InstanceAccessType {
    Public,
    FriendsAndInviteOnly,
    /// No invitation operation is modeled; the owner adds members
    /// out-of-band, and non-owners/non-members are denied unconditionally.
    InviteOnly,
}

/// Resolved social/membership facts for one `(user, instance)` pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessContext {
    pub is_owner: bool,
    /// A player-data row exists for (instance, user).
    pub is_member: bool,
    /// A block exists between the user and the instance owner, in either
    /// direction.
    pub blocked: bool,
    /// An accepted friendship exists between the user and the owner.
    pub friends_with_owner: bool,
}

/// Whether the user may see the instance and read its shared data.
///
/// A block between the user and the owner zeroes out visibility regardless
/// of membership or friendship state.
pub fn can_view(access_type: InstanceAccessType, ctx: &AccessContext) -> bool {
    if ctx.blocked {
        return false;
    }
    if ctx.is_owner || ctx.is_member {
        return true;
    }
    match access_type {
        InstanceAccessType::Public => true,
        InstanceAccessType::FriendsAndInviteOnly => ctx.friends_with_owner,
        InstanceAccessType::InviteOnly => false,
    }
}

/// Whether the user may rename the instance, change its capacity or access
/// type, delete it, write world-view data, or read all members' data.
pub fn can_manage(user_id: DbId, owner_id: DbId) -> bool {
    user_id == owner_id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(is_owner: bool, is_member: bool, blocked: bool, friends: bool) -> AccessContext {
        AccessContext {
            is_owner,
            is_member,
            blocked,
            friends_with_owner: friends,
        }
    }

    #[test]
    fn owner_always_views() {
        for access_type in [
            InstanceAccessType::Public,
            InstanceAccessType::FriendsAndInviteOnly,
            InstanceAccessType::InviteOnly,
        ] {
            assert!(can_view(access_type, &ctx(true, false, false, false)));
        }
    }

    #[test]
    fn member_views_invite_only() {
        assert!(can_view(
            InstanceAccessType::InviteOnly,
            &ctx(false, true, false, false)
        ));
    }

    #[test]
    fn stranger_views_public_only() {
        let stranger = ctx(false, false, false, false);
        assert!(can_view(InstanceAccessType::Public, &stranger));
        assert!(!can_view(InstanceAccessType::FriendsAndInviteOnly, &stranger));
        assert!(!can_view(InstanceAccessType::InviteOnly, &stranger));
    }

    #[test]
    fn friend_views_friends_and_invite_only() {
        let friend = ctx(false, false, false, true);
        assert!(can_view(InstanceAccessType::FriendsAndInviteOnly, &friend));
        assert!(!can_view(InstanceAccessType::InviteOnly, &friend));
    }

    #[test]
    fn block_overrides_everything() {
        // Even an owner-side friendship or existing membership does not
        // survive a block: visibility must independently zero out.
        for access_type in [
            InstanceAccessType::Public,
            InstanceAccessType::FriendsAndInviteOnly,
            InstanceAccessType::InviteOnly,
        ] {
            assert!(!can_view(access_type, &ctx(false, true, true, true)));
            assert!(!can_view(access_type, &ctx(false, false, true, true)));
        }
    }

    #[test]
    fn manage_is_owner_only() {
        assert!(can_manage(7, 7));
        assert!(!can_manage(7, 8));
    }
}
