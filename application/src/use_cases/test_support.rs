//! Recording platform double shared by the use case tests.

use crate::ports::platform::{MemberProfile, ModerationPlatform, PlatformError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tribunal_domain::{
    ChannelId, CommunityId, CommunitySettings, MemberId, MessageId, MessageRef, OutgoingMessage,
    RoleId,
};

pub const COMMUNITY: CommunityId = CommunityId::new(1);
pub const ORIGIN: ChannelId = ChannelId::new(10);
pub const ANNOUNCEMENTS: ChannelId = ChannelId::new(11);
pub const TALLY: ChannelId = ChannelId::new(12);
pub const MOD_ROLE: RoleId = RoleId::new(50);

pub const BOT: MemberId = MemberId::new(999);
pub const ADMIN: MemberId = MemberId::new(1);
pub const MODERATOR: MemberId = MemberId::new(2);
pub const TARGET: MemberId = MemberId::new(3);
pub const VOTER_A: MemberId = MemberId::new(4);
pub const VOTER_B: MemberId = MemberId::new(5);
pub const VOTER_C: MemberId = MemberId::new(6);
pub const OTHER_BOT: MemberId = MemberId::new(7);
pub const ADMIN_TARGET: MemberId = MemberId::new(8);

/// A moderation primitive the platform was asked to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Timeout(MemberId, Duration, String),
    ClearTimeout(MemberId),
    Kick(MemberId, String),
    Ban(MemberId, String),
}

/// Holds one `send_message` call until the test releases it
#[derive(Default)]
pub struct SendGate {
    entered: Notify,
    release: Notify,
    finished: Notify,
}

impl SendGate {
    /// Wait until the held send has started
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    /// Wait until the held send has recorded its message
    pub async fn finished(&self) {
        self.finished.notified().await;
    }
}

/// In-memory platform that records every call
pub struct RecordingPlatform {
    members: Mutex<HashMap<MemberId, MemberProfile>>,
    channels: Mutex<HashSet<ChannelId>>,
    next_message: AtomicU64,
    pub sent: Mutex<Vec<(MessageRef, OutgoingMessage)>>,
    pub edits: Mutex<Vec<(MessageRef, OutgoingMessage)>>,
    pub deleted: Mutex<Vec<MessageRef>>,
    pub actions: Mutex<Vec<Action>>,
    pub fail_enforcement: AtomicBool,
    pub fail_send: AtomicBool,
    gate: Mutex<Option<Arc<SendGate>>>,
}

impl RecordingPlatform {
    /// A community with an admin, a moderator, a target, three voters,
    /// another bot and an administrator target
    pub fn new() -> Self {
        let mut members = HashMap::new();

        let mut admin = MemberProfile::new(ADMIN, "admin");
        admin.is_administrator = true;
        members.insert(ADMIN, admin);

        let mut moderator = MemberProfile::new(MODERATOR, "moderator");
        moderator.roles.push(MOD_ROLE);
        members.insert(MODERATOR, moderator);

        for (id, name) in [
            (TARGET, "target"),
            (VOTER_A, "alice"),
            (VOTER_B, "bob"),
            (VOTER_C, "carol"),
        ] {
            members.insert(id, MemberProfile::new(id, name));
        }

        let mut other_bot = MemberProfile::new(OTHER_BOT, "music bot");
        other_bot.is_bot = true;
        members.insert(OTHER_BOT, other_bot);

        let mut bot = MemberProfile::new(BOT, "tribunal");
        bot.is_bot = true;
        members.insert(BOT, bot);

        let mut admin_target = MemberProfile::new(ADMIN_TARGET, "owner");
        admin_target.is_administrator = true;
        members.insert(ADMIN_TARGET, admin_target);

        Self {
            members: Mutex::new(members),
            channels: Mutex::new([ORIGIN, ANNOUNCEMENTS, TALLY].into_iter().collect()),
            next_message: AtomicU64::new(1000),
            sent: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            actions: Mutex::new(Vec::new()),
            fail_enforcement: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
            gate: Mutex::new(None),
        }
    }

    /// Hold the next `send_message` call at its start
    pub fn hold_next_send(&self) -> Arc<SendGate> {
        let gate = Arc::new(SendGate::default());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn remove_channel(&self, channel: ChannelId) {
        self.channels.lock().unwrap().remove(&channel);
    }

    pub fn member(&self, id: MemberId) -> MemberProfile {
        self.members.lock().unwrap().get(&id).cloned().unwrap()
    }

    pub fn sent_to(&self, channel: ChannelId) -> Vec<(MessageRef, OutgoingMessage)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _)| r.channel == channel)
            .cloned()
            .collect()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(MessageRef, OutgoingMessage)> {
        self.edits.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<MessageRef> {
        self.deleted.lock().unwrap().clone()
    }

    fn enforcement(&self, action: Action) -> Result<(), PlatformError> {
        if self.fail_enforcement.load(Ordering::SeqCst) {
            return Err(PlatformError::Forbidden("missing permissions".into()));
        }
        self.actions.lock().unwrap().push(action);
        Ok(())
    }
}

/// Settings with every optional value configured
pub fn full_settings() -> CommunitySettings {
    CommunitySettings {
        announcement_channel: Some(ANNOUNCEMENTS),
        tally_channel: Some(TALLY),
        moderator_role: Some(MOD_ROLE),
    }
}

#[async_trait]
impl ModerationPlatform for RecordingPlatform {
    fn self_id(&self) -> MemberId {
        BOT
    }

    async fn community_name(&self, _community: CommunityId) -> Result<String, PlatformError> {
        Ok("Test Community".to_string())
    }

    async fn fetch_member(
        &self,
        _community: CommunityId,
        member: MemberId,
    ) -> Result<MemberProfile, PlatformError> {
        self.members
            .lock()
            .unwrap()
            .get(&member)
            .cloned()
            .ok_or(PlatformError::MemberNotFound(member))
    }

    async fn channel_exists(
        &self,
        _community: CommunityId,
        channel: ChannelId,
    ) -> Result<bool, PlatformError> {
        Ok(self.channels.lock().unwrap().contains(&channel))
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<MessageRef, PlatformError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = &gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(PlatformError::RequestFailed("send failed".into()));
        }
        let id = MessageId::new(self.next_message.fetch_add(1, Ordering::SeqCst));
        let reference = MessageRef::new(channel, id);
        self.sent.lock().unwrap().push((reference, message.clone()));
        if let Some(gate) = gate {
            gate.finished.notify_one();
        }
        Ok(reference)
    }

    async fn edit_message(
        &self,
        message: MessageRef,
        content: &OutgoingMessage,
    ) -> Result<(), PlatformError> {
        self.edits.lock().unwrap().push((message, content.clone()));
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), PlatformError> {
        self.deleted.lock().unwrap().push(message);
        Ok(())
    }

    async fn timeout_member(
        &self,
        _community: CommunityId,
        member: MemberId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.enforcement(Action::Timeout(member, duration, reason.to_string()))?;
        if let Some(profile) = self.members.lock().unwrap().get_mut(&member) {
            profile.timed_out_until =
                Some(Utc::now() + chrono::Duration::from_std(duration).unwrap());
        }
        Ok(())
    }

    async fn clear_timeout(
        &self,
        _community: CommunityId,
        member: MemberId,
    ) -> Result<(), PlatformError> {
        self.actions.lock().unwrap().push(Action::ClearTimeout(member));
        if let Some(profile) = self.members.lock().unwrap().get_mut(&member) {
            profile.timed_out_until = None;
        }
        Ok(())
    }

    async fn kick_member(
        &self,
        _community: CommunityId,
        member: MemberId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.enforcement(Action::Kick(member, reason.to_string()))
    }

    async fn ban_member(
        &self,
        _community: CommunityId,
        member: MemberId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.enforcement(Action::Ban(member, reason.to_string()))
    }
}

/// Audit logger that keeps every event in memory
#[derive(Default)]
pub struct RecordingAudit {
    pub events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingAudit {
    pub fn types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

impl crate::ports::audit_logger::AuditLogger for RecordingAudit {
    fn log(&self, event: crate::ports::audit_logger::AuditEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type.to_string(), event.payload));
    }
}
