//! Platform identifiers
//!
//! Chat platforms hand out opaque 64-bit snowflakes for every object. The
//! newtypes below keep a member id from being passed where a channel id is
//! expected.

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

snowflake!(
    /// A community (guild / server)
    CommunityId
);
snowflake!(
    /// A user or member of a community
    MemberId
);
snowflake!(
    /// A text channel inside a community
    ChannelId
);
snowflake!(
    /// A role that can be granted to members
    RoleId
);
snowflake!(
    /// A message inside a channel
    MessageId
);

impl MemberId {
    /// Platform mention markup, e.g. `<@42>`
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

impl ChannelId {
    /// Platform mention markup, e.g. `<#42>`
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}

impl RoleId {
    /// Platform mention markup, e.g. `<@&42>`
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

/// Reference to a published message.
///
/// Editing or deleting a message needs both the channel and the message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub channel: ChannelId,
    pub message: MessageId,
}

impl MessageRef {
    pub fn new(channel: ChannelId, message: MessageId) -> Self {
        Self { channel, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions() {
        assert_eq!(MemberId::new(7).mention(), "<@7>");
        assert_eq!(ChannelId::new(8).mention(), "<#8>");
        assert_eq!(RoleId::new(9).mention(), "<@&9>");
    }

    #[test]
    fn test_parse_snowflake() {
        let id: MemberId = " 123456789012345678 ".parse().unwrap();
        assert_eq!(id.get(), 123456789012345678);
        assert!("abc".parse::<CommunityId>().is_err());
    }

    #[test]
    fn test_serialize_transparent() {
        let json = serde_json::to_string(&ChannelId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
