//! Composed access resolution for game instances.
//!
//! The pure policy lives in [`skirmish_core::access`]; this module gathers
//! the facts it needs (block state, membership, friendship) from the
//! database and feeds them in. Friendship is only looked up when the
//! instance's access type can actually be satisfied by it.

use sqlx::PgPool;
use skirmish_core::access::{can_view as policy_can_view, AccessContext, InstanceAccessType};
use skirmish_core::types::DbId;

use crate::models::game_instance::GameInstance;
use crate::repositories::{FriendshipRepo, PlayerGameDataRepo, UserBlockRepo};

/// Resolve whether `user_id` may view `instance` and its nested resources.
pub async fn can_view(
    pool: &PgPool,
    user_id: DbId,
    instance: &GameInstance,
) -> Result<bool, sqlx::Error> {
    let is_owner = instance.owner_id == user_id;

    let blocked = if is_owner {
        false
    } else {
        UserBlockRepo::exists_between(pool, user_id, instance.owner_id).await?
    };
    if blocked {
        return Ok(false);
    }

    let is_member = if is_owner {
        false
    } else {
        PlayerGameDataRepo::exists(pool, instance.id, user_id).await?
    };

    let friends_with_owner = if !is_owner
        && !is_member
        && instance.access_type == InstanceAccessType::FriendsAndInviteOnly
    {
        FriendshipRepo::accepted_exists_between(pool, user_id, instance.owner_id).await?
    } else {
        false
    };

    Ok(policy_can_view(
        instance.access_type,
        &AccessContext {
            is_owner,
            is_member,
            blocked,
            friends_with_owner,
        },
    ))
}

/// Whether `user_id` owns the instance or has joined it as a member.
/// Gates resources reserved for participants, such as alliances.
pub async fn is_participant(
    pool: &PgPool,
    user_id: DbId,
    instance: &GameInstance,
) -> Result<bool, sqlx::Error> {
    if instance.owner_id == user_id {
        return Ok(true);
    }
    PlayerGameDataRepo::exists(pool, instance.id, user_id).await
}
