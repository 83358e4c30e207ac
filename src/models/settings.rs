//! Per-group protection settings

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One boolean toggle gating a moderation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionFlag {
    KickProtect,
    InviteProtect,
    NameImageProtect,
    InviteLinkProtect,
    NoteProtect,
    AlbumProtect,
    MentionProtect,
    StickerProtect,
}

impl ProtectionFlag {
    /// All flags in display order
    pub const ALL: [ProtectionFlag; 8] = [
        ProtectionFlag::KickProtect,
        ProtectionFlag::InviteProtect,
        ProtectionFlag::NameImageProtect,
        ProtectionFlag::InviteLinkProtect,
        ProtectionFlag::NoteProtect,
        ProtectionFlag::AlbumProtect,
        ProtectionFlag::MentionProtect,
        ProtectionFlag::StickerProtect,
    ];

    /// Column / field name used by every storage backend
    pub fn key(self) -> &'static str {
        match self {
            ProtectionFlag::KickProtect => "kick_protect",
            ProtectionFlag::InviteProtect => "invite_protect",
            ProtectionFlag::NameImageProtect => "name_image_protect",
            ProtectionFlag::InviteLinkProtect => "invite_link_protect",
            ProtectionFlag::NoteProtect => "note_protect",
            ProtectionFlag::AlbumProtect => "album_protect",
            ProtectionFlag::MentionProtect => "mention_protect",
            ProtectionFlag::StickerProtect => "sticker_protect",
        }
    }

    /// Name shown in status listings
    pub fn display_name(self) -> &'static str {
        match self {
            ProtectionFlag::KickProtect => "踢人保護",
            ProtectionFlag::InviteProtect => "邀請保護",
            ProtectionFlag::NameImageProtect => "群名/群圖保護",
            ProtectionFlag::InviteLinkProtect => "邀請網址保護",
            ProtectionFlag::NoteProtect => "記事本保護",
            ProtectionFlag::AlbumProtect => "相簿保護",
            ProtectionFlag::MentionProtect => "全體標記保護",
            ProtectionFlag::StickerProtect => "貼圖洗版保護",
        }
    }
}

impl std::fmt::Display for ProtectionFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Protection settings for a single group.
///
/// Created with every flag off on first contact and only changed by
/// admin toggle commands afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GroupSettings {
    pub group_id: String,
    pub kick_protect: bool,
    pub invite_protect: bool,
    pub name_image_protect: bool,
    pub invite_link_protect: bool,
    pub note_protect: bool,
    pub album_protect: bool,
    pub mention_protect: bool,
    pub sticker_protect: bool,
}

impl GroupSettings {
    /// Defaults for a previously unseen group
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            kick_protect: false,
            invite_protect: false,
            name_image_protect: false,
            invite_link_protect: false,
            note_protect: false,
            album_protect: false,
            mention_protect: false,
            sticker_protect: false,
        }
    }

    pub fn is_enabled(&self, flag: ProtectionFlag) -> bool {
        match flag {
            ProtectionFlag::KickProtect => self.kick_protect,
            ProtectionFlag::InviteProtect => self.invite_protect,
            ProtectionFlag::NameImageProtect => self.name_image_protect,
            ProtectionFlag::InviteLinkProtect => self.invite_link_protect,
            ProtectionFlag::NoteProtect => self.note_protect,
            ProtectionFlag::AlbumProtect => self.album_protect,
            ProtectionFlag::MentionProtect => self.mention_protect,
            ProtectionFlag::StickerProtect => self.sticker_protect,
        }
    }

    pub fn set(&mut self, flag: ProtectionFlag, value: bool) {
        let slot = match flag {
            ProtectionFlag::KickProtect => &mut self.kick_protect,
            ProtectionFlag::InviteProtect => &mut self.invite_protect,
            ProtectionFlag::NameImageProtect => &mut self.name_image_protect,
            ProtectionFlag::InviteLinkProtect => &mut self.invite_link_protect,
            ProtectionFlag::NoteProtect => &mut self.note_protect,
            ProtectionFlag::AlbumProtect => &mut self.album_protect,
            ProtectionFlag::MentionProtect => &mut self.mention_protect,
            ProtectionFlag::StickerProtect => &mut self.sticker_protect,
        };
        *slot = value;
    }

    /// Builder-style variant of [`GroupSettings::set`], handy for fixtures
    pub fn with(mut self, flag: ProtectionFlag, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    /// Flags paired with their current state, in display order
    pub fn flags(&self) -> impl Iterator<Item = (ProtectionFlag, bool)> + '_ {
        ProtectionFlag::ALL.into_iter().map(move |flag| (flag, self.is_enabled(flag)))
    }
}
