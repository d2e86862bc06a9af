//! In-memory community driven from the console.

use crate::config::FileSimulationConfig;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};
use tribunal_application::{
    ActivityObserver, MemberDirectory, MemberProfile, ModerationPlatform, NoActivityObserver,
    PlatformActivity, PlatformError,
};
use tribunal_domain::{
    ChannelId, CommunityId, MemberId, MessageId, MessageRef, OutgoingMessage, RoleId,
};

#[derive(Debug, Clone)]
struct StoredMessage {
    channel: ChannelId,
}

#[derive(Default)]
struct CommunityState {
    members: HashMap<MemberId, MemberProfile>,
    banned: HashSet<MemberId>,
    // Names of kicked and banned members, for messages that still mention them
    departed: HashMap<MemberId, String>,
    messages: HashMap<MessageId, StoredMessage>,
}

/// A single simulated community
pub struct SimulatedPlatform {
    community: CommunityId,
    community_name: String,
    bot_id: MemberId,
    default_channel: ChannelId,
    channels: Vec<(ChannelId, String)>,
    roles: Vec<(RoleId, String)>,
    state: Mutex<CommunityState>,
    next_message: AtomicU64,
    observer: Arc<dyn ActivityObserver>,
}

impl SimulatedPlatform {
    /// Build the community described by the `[simulation]` config section
    pub fn from_config(config: &FileSimulationConfig) -> Self {
        let roles: Vec<(RoleId, String)> = config
            .roles
            .iter()
            .map(|r| (r.id, r.name.clone()))
            .collect();

        let mut members = HashMap::new();
        let mut bot = MemberProfile::new(config.bot_id, config.bot_name.clone());
        bot.is_bot = true;
        members.insert(config.bot_id, bot);

        for member in &config.members {
            let mut profile = MemberProfile::new(member.id, member.name.trim());
            profile.is_bot = member.bot;
            profile.is_administrator = member.administrator;
            profile.roles = member
                .roles
                .iter()
                .filter_map(|name| roles.iter().find(|(_, n)| n == name).map(|(id, _)| *id))
                .collect();
            members.insert(member.id, profile);
        }

        let channels: Vec<(ChannelId, String)> = config
            .channels
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        let default_channel = channels
            .iter()
            .find(|(_, name)| *name == config.default_channel)
            .or_else(|| channels.first())
            .map(|(id, _)| *id)
            .unwrap_or(ChannelId::new(0));

        Self {
            community: config.community_id,
            community_name: config.community_name.clone(),
            bot_id: config.bot_id,
            default_channel,
            channels,
            roles,
            state: Mutex::new(CommunityState {
                members,
                ..Default::default()
            }),
            next_message: AtomicU64::new(1),
            observer: Arc::new(NoActivityObserver),
        }
    }

    /// Report every platform action to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn ActivityObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn name(&self) -> &str {
        &self.community_name
    }

    pub fn is_banned(&self, member: MemberId) -> bool {
        self.lock().banned.contains(&member)
    }

    fn lock(&self) -> MutexGuard<'_, CommunityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, activity: PlatformActivity) {
        self.observer.on_activity(&activity);
    }

    fn check_community(&self, community: CommunityId) -> Result<(), PlatformError> {
        if community == self.community {
            Ok(())
        } else {
            Err(PlatformError::RequestFailed(format!(
                "unknown community {}",
                community
            )))
        }
    }

    fn require_member(
        state: &CommunityState,
        member: MemberId,
    ) -> Result<&MemberProfile, PlatformError> {
        state
            .members
            .get(&member)
            .ok_or(PlatformError::MemberNotFound(member))
    }

    /// Administrators cannot be moderated; neither can this bot itself
    fn require_moderatable(&self, profile: &MemberProfile) -> Result<(), PlatformError> {
        if profile.is_administrator || profile.id == self.bot_id {
            return Err(PlatformError::Forbidden(format!(
                "cannot moderate {}",
                profile.display_name
            )));
        }
        Ok(())
    }
}

fn parse_mention(query: &str, prefix: &str, suffix: &str) -> Option<u64> {
    let query = query.trim();
    let inner = query
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .unwrap_or(query);
    // A bare name like "ada" is not an id
    inner.parse().ok()
}

impl MemberDirectory for SimulatedPlatform {
    fn community(&self) -> CommunityId {
        self.community
    }

    fn default_channel(&self) -> ChannelId {
        self.default_channel
    }

    fn members(&self) -> Vec<MemberProfile> {
        let mut members: Vec<_> = self.lock().members.values().cloned().collect();
        members.sort_by_key(|m| m.id);
        members
    }

    fn find_member(&self, query: &str) -> Option<MemberProfile> {
        let state = self.lock();
        if let Some(id) = parse_mention(query, "<@", ">") {
            return state.members.get(&MemberId::new(id)).cloned();
        }
        let name = query.trim().trim_start_matches('@');
        state
            .members
            .values()
            .find(|m| m.display_name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn find_channel(&self, query: &str) -> Option<ChannelId> {
        if let Some(id) = parse_mention(query, "<#", ">") {
            let id = ChannelId::new(id);
            return self.channels.iter().any(|(c, _)| *c == id).then_some(id);
        }
        let name = query.trim().trim_start_matches('#');
        self.channels
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    fn find_role(&self, query: &str) -> Option<RoleId> {
        if let Some(id) = parse_mention(query, "<@&", ">") {
            let id = RoleId::new(id);
            return self.roles.iter().any(|(r, _)| *r == id).then_some(id);
        }
        let name = query.trim().trim_start_matches('@');
        self.roles
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    fn member_name(&self, member: MemberId) -> String {
        let state = self.lock();
        state
            .members
            .get(&member)
            .map(|m| m.display_name.clone())
            .or_else(|| state.departed.get(&member).cloned())
            .unwrap_or_else(|| member.to_string())
    }

    fn channel_name(&self, channel: ChannelId) -> String {
        self.channels
            .iter()
            .find(|(id, _)| *id == channel)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| channel.to_string())
    }

    fn role_name(&self, role: RoleId) -> String {
        self.roles
            .iter()
            .find(|(id, _)| *id == role)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| role.to_string())
    }
}

#[async_trait]
impl ModerationPlatform for SimulatedPlatform {
    fn self_id(&self) -> MemberId {
        self.bot_id
    }

    async fn community_name(&self, community: CommunityId) -> Result<String, PlatformError> {
        self.check_community(community)?;
        Ok(self.community_name.clone())
    }

    async fn fetch_member(
        &self,
        community: CommunityId,
        member: MemberId,
    ) -> Result<MemberProfile, PlatformError> {
        self.check_community(community)?;
        let state = self.lock();
        Self::require_member(&state, member).cloned()
    }

    async fn channel_exists(
        &self,
        community: CommunityId,
        channel: ChannelId,
    ) -> Result<bool, PlatformError> {
        self.check_community(community)?;
        Ok(self.channels.iter().any(|(id, _)| *id == channel))
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<MessageRef, PlatformError> {
        if !self.channels.iter().any(|(id, _)| *id == channel) {
            return Err(PlatformError::ChannelNotFound(channel));
        }
        let id = MessageId::new(self.next_message.fetch_add(1, Ordering::SeqCst));
        self.lock()
            .messages
            .insert(id, StoredMessage { channel });

        let reference = MessageRef::new(channel, id);
        debug!("Sent message {} to #{}", id, self.channel_name(channel));
        self.emit(PlatformActivity::MessageSent {
            channel: self.channel_name(channel),
            message: reference,
            content: message.clone(),
        });
        Ok(reference)
    }

    async fn edit_message(
        &self,
        message: MessageRef,
        content: &OutgoingMessage,
    ) -> Result<(), PlatformError> {
        let channel = self
            .lock()
            .messages
            .get(&message.message)
            .map(|m| m.channel)
            .ok_or(PlatformError::MessageNotFound(message.message))?;

        self.emit(PlatformActivity::MessageEdited {
            channel: self.channel_name(channel),
            message,
            content: content.clone(),
        });
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), PlatformError> {
        let stored = self
            .lock()
            .messages
            .remove(&message.message)
            .ok_or(PlatformError::MessageNotFound(message.message))?;

        self.emit(PlatformActivity::MessageDeleted {
            channel: self.channel_name(stored.channel),
            message,
        });
        Ok(())
    }

    async fn timeout_member(
        &self,
        community: CommunityId,
        member: MemberId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.check_community(community)?;
        let until = Utc::now()
            + chrono::Duration::from_std(duration)
                .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        let name = {
            let mut state = self.lock();
            let profile = Self::require_member(&state, member)?;
            self.require_moderatable(profile)?;
            let name = profile.display_name.clone();
            if let Some(profile) = state.members.get_mut(&member) {
                profile.timed_out_until = Some(until);
            }
            name
        };

        info!("{} timed out until {}", name, until);
        self.emit(PlatformActivity::TimedOut {
            member: name,
            until,
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn clear_timeout(
        &self,
        community: CommunityId,
        member: MemberId,
    ) -> Result<(), PlatformError> {
        self.check_community(community)?;
        let name = {
            let mut state = self.lock();
            let profile = state
                .members
                .get_mut(&member)
                .ok_or(PlatformError::MemberNotFound(member))?;
            profile.timed_out_until = None;
            profile.display_name.clone()
        };

        self.emit(PlatformActivity::TimeoutCleared { member: name });
        Ok(())
    }

    async fn kick_member(
        &self,
        community: CommunityId,
        member: MemberId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.check_community(community)?;
        let name = {
            let mut state = self.lock();
            let profile = Self::require_member(&state, member)?;
            self.require_moderatable(profile)?;
            let name = profile.display_name.clone();
            state.members.remove(&member);
            state.departed.insert(member, name.clone());
            name
        };

        info!("{} kicked: {}", name, reason);
        self.emit(PlatformActivity::Kicked {
            member: name,
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn ban_member(
        &self,
        community: CommunityId,
        member: MemberId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.check_community(community)?;
        let name = {
            let mut state = self.lock();
            let profile = Self::require_member(&state, member)?;
            self.require_moderatable(profile)?;
            let name = profile.display_name.clone();
            state.members.remove(&member);
            state.banned.insert(member);
            state.departed.insert(member, name.clone());
            name
        };

        info!("{} banned: {}", name, reason);
        self.emit(PlatformActivity::Banned {
            member: name,
            reason: reason.to_string(),
        });
        Ok(())
    }
}
