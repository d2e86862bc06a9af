//! Shared helpers for use cases.
//!
//! Authorization and channel selection are identical for starting,
//! stopping and knocking out, so they live here.

use crate::ports::platform::{MemberProfile, ModerationPlatform};
use tracing::warn;
use tribunal_domain::{ChannelId, CommunityId, CommunitySettings};

/// Whether a member may start or stop accusations
///
/// Administrators always may; otherwise the member needs the configured
/// moderator role.
pub(crate) fn can_moderate(member: &MemberProfile, settings: &CommunitySettings) -> bool {
    member.is_administrator
        || settings
            .moderator_role
            .is_some_and(|role| member.has_role(role))
}

/// Channel for public announcements
///
/// The configured announcement channel when it still exists, otherwise the
/// channel the command was run in.
pub(crate) async fn announcement_channel<P: ModerationPlatform + ?Sized>(
    platform: &P,
    community: CommunityId,
    settings: &CommunitySettings,
    origin: ChannelId,
) -> ChannelId {
    let Some(configured) = settings.announcement_channel else {
        return origin;
    };

    match platform.channel_exists(community, configured).await {
        Ok(true) => configured,
        Ok(false) => {
            warn!(
                "Configured announcement channel {} for community {} not found, falling back to {}",
                configured, community, origin
            );
            origin
        }
        Err(e) => {
            warn!(
                "Could not check announcement channel {} for community {}: {}",
                configured, community, e
            );
            origin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_domain::{MemberId, RoleId};

    fn settings_with_role(role: Option<RoleId>) -> CommunitySettings {
        CommunitySettings {
            moderator_role: role,
            ..Default::default()
        }
    }

    #[test]
    fn test_admin_can_moderate_without_role() {
        let mut admin = MemberProfile::new(MemberId::new(1), "admin");
        admin.is_administrator = true;
        assert!(can_moderate(&admin, &settings_with_role(None)));
    }

    #[test]
    fn test_moderator_role_grants_capability() {
        let mut member = MemberProfile::new(MemberId::new(1), "mod");
        member.roles.push(RoleId::new(5));
        assert!(can_moderate(&member, &settings_with_role(Some(RoleId::new(5)))));
        assert!(!can_moderate(&member, &settings_with_role(Some(RoleId::new(6)))));
    }

    #[test]
    fn test_plain_member_cannot_moderate_without_configured_role() {
        let member = MemberProfile::new(MemberId::new(1), "member");
        assert!(!can_moderate(&member, &settings_with_role(None)));
    }
}
