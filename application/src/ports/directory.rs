//! Member directory port
//!
//! Name resolution for interactive front ends: a human types `@bea` or
//! `#vote-log`, the use cases need ids.

use super::platform::MemberProfile;
use tribunal_domain::{ChannelId, CommunityId, MemberId, RoleId};

/// Lookup of members, channels and roles by what a human would type
///
/// Queries accept a plain name, a numeric id or a mention (`<@id>`,
/// `<#id>`, `<@&id>`).
pub trait MemberDirectory: Send + Sync {
    /// The community this directory describes
    fn community(&self) -> CommunityId;

    /// Channel commands are issued from by default
    fn default_channel(&self) -> ChannelId;

    /// Current members, sorted by id
    fn members(&self) -> Vec<MemberProfile>;

    fn find_member(&self, query: &str) -> Option<MemberProfile>;

    fn find_channel(&self, query: &str) -> Option<ChannelId>;

    fn find_role(&self, query: &str) -> Option<RoleId>;

    /// Display names, falling back to the raw id
    fn member_name(&self, member: MemberId) -> String;

    fn channel_name(&self, channel: ChannelId) -> String;

    fn role_name(&self, role: RoleId) -> String;
}
