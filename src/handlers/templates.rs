//! User-facing message texts

use crate::models::GroupSettings;

pub const HELP_TEXT: &str = "🔐 保護功能指令清單（限管理員）：
✅ 使用方式：
  群內輸入「功能名稱 開」或「功能名稱 關」
🧾 範例：
  踢人保護 開
  貼圖洗版保護 關
📊 查看目前狀態：
  /狀態
🆔 查看自己的 User ID：
  /id

🔧 支援的功能：
- 踢人保護
- 邀請保護
- 群名保護 / 群圖保護
- 邀請網址保護
- 記事本保護
- 相簿保護
- 全體標記保護
- 貼圖洗版保護";

pub const SELF_KICK_FAREWELL: &str = "🥾 你請求被踢，我就踢！掰～";

pub const ADMIN_SELF_KICK_REFUSAL: &str = "你是管理員，不能自踢啦 😎";

/// Warning shown to the offender
pub fn violation_warning(user_name: &str, reason: &str) -> String {
    format!("⚠️ {} 觸犯了群組規則：{}，請注意行為。", user_name, reason)
}

/// Notice pushed to every administrator
pub fn admin_violation_notice(user_name: &str, group_name: &str, reason: &str) -> String {
    format!("👮 管理通知：使用者 {} 在群組 {} 觸犯了「{}」", user_name, group_name, reason)
}

/// One line per flag, in display order
pub fn status_report(settings: &GroupSettings) -> String {
    settings
        .flags()
        .map(|(flag, enabled)| {
            let marker = if enabled { "✅" } else { "❌" };
            format!("{} {}", marker, flag.display_name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn toggle_confirmation(display_name: &str, enabled: bool) -> String {
    if enabled {
        format!("✅ {} 已開啟", display_name)
    } else {
        format!("❌ {} 已關閉", display_name)
    }
}

pub fn welcome(template: &str, display_name: &str) -> String {
    template.replace("{name}", display_name)
}

pub fn remove_failed(group_name: &str, user_id: &str, error: &str) -> String {
    format!("❌ 無法踢出 {}（群組 {}），原因：{}", user_id, group_name, error)
}

pub fn reply_failed(group_name: &str, error: &str) -> String {
    format!("❌ 群組 {} 的回覆訊息發送失敗，原因：{}", group_name, error)
}

pub fn persist_failed(group_name: &str, flag_name: &str, error: &str) -> String {
    format!("❌ 群組 {} 的「{}」設定儲存失敗，原因：{}", group_name, flag_name, error)
}
