//! Command parser
//!
//! Classifies an admin-authored text message into one of the bot commands.
//! Matching is exact after trimming surrounding whitespace.

use crate::models::ProtectionFlag;

/// Display names accepted in toggle commands; two of them alias the same flag
pub const TOGGLE_NAMES: [(&str, ProtectionFlag); 9] = [
    ("踢人保護", ProtectionFlag::KickProtect),
    ("邀請保護", ProtectionFlag::InviteProtect),
    ("群名保護", ProtectionFlag::NameImageProtect),
    ("群圖保護", ProtectionFlag::NameImageProtect),
    ("邀請網址保護", ProtectionFlag::InviteLinkProtect),
    ("記事本保護", ProtectionFlag::NoteProtect),
    ("相簿保護", ProtectionFlag::AlbumProtect),
    ("全體標記保護", ProtectionFlag::MentionProtect),
    ("貼圖洗版保護", ProtectionFlag::StickerProtect),
];

const ON_SUFFIX: &str = " 開";
const OFF_SUFFIX: &str = " 關";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowUserId,
    ShowHelp,
    ShowStatus,
    ToggleFlag {
        flag: ProtectionFlag,
        enabled: bool,
        /// The name the admin typed, echoed back in the confirmation
        display_name: &'static str,
    },
    /// `/踢我`: a member asks to be removed
    KickSelf,
    NoCommand,
}

pub fn parse(text: &str) -> Command {
    let text = text.trim();

    match text {
        "/id" => return Command::ShowUserId,
        "/help" => return Command::ShowHelp,
        "/狀態" => return Command::ShowStatus,
        "/踢我" => return Command::KickSelf,
        _ => {}
    }

    for (display_name, flag) in TOGGLE_NAMES {
        if let Some(rest) = text.strip_prefix(display_name) {
            let enabled = match rest {
                ON_SUFFIX => true,
                OFF_SUFFIX => false,
                _ => continue,
            };
            return Command::ToggleFlag { flag, enabled, display_name };
        }
    }

    Command::NoCommand
}
