//! End-to-end webhook tests
//!
//! These tests drive the real router with signed deliveries and verify what
//! the bot sends to a mocked LINE Messaging API.

mod helpers;

use axum::http::StatusCode;
use GroupGuard::config::StorageBackend;
use GroupGuard::models::{GroupSettings, ProtectionFlag};
use helpers::*;

#[tokio::test]
async fn test_toggle_then_invite_link_violation() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    ctx.line_mock.mock_profile(GROUP_ID, MEMBER_ID, "Bob").await;

    let status = ctx.deliver(&payload(vec![text_event(GROUP_ID, ADMIN_ID, "邀請網址保護 開")])).await;
    assert_eq!(status, StatusCode::OK);

    let status = ctx
        .deliver(&payload(vec![text_event(GROUP_ID, MEMBER_ID, "快來 https://line.me/R/ti/g/abcd")]))
        .await;
    assert_eq!(status, StatusCode::OK);

    let replies = ctx.line_mock.replies().await;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], vec!["✅ 邀請網址保護 已開啟".to_string()]);
    assert_eq!(
        replies[1],
        vec!["⚠️ Bob 觸犯了群組規則：未經授權張貼 群組邀請網址，請注意行為。".to_string()]
    );

    let pushes = ctx.line_mock.pushes().await;
    assert_eq!(pushes, vec![(
        ADMIN_ID.to_string(),
        format!("👮 管理通知：使用者 Bob 在群組 {} 觸犯了「未經授權張貼 群組邀請網址」", GROUP_ID),
    )]);

    assert!(ctx.line_mock.kickouts().await.is_empty());
}

#[tokio::test]
async fn test_mass_mention_removes_member() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    ctx.line_mock.mock_kickout(200).await;
    ctx.store.init(GROUP_ID).await.unwrap();
    ctx.store.set(GROUP_ID, ProtectionFlag::MentionProtect, true).await.unwrap();

    let status = ctx.deliver(&payload(vec![text_event(GROUP_ID, MEMBER_ID, "@All 集合")])).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(ctx.line_mock.replies().await.len(), 1);
    assert_eq!(ctx.line_mock.pushes().await.len(), 1);
    assert_eq!(
        ctx.line_mock.kickouts().await,
        vec![format!("/v2/bot/group/{}/member/{}/kickout", GROUP_ID, MEMBER_ID)]
    );
}

#[tokio::test]
async fn test_mention_spans_count_as_mass_mention() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    ctx.line_mock.mock_kickout(200).await;
    ctx.store.init(GROUP_ID).await.unwrap();
    ctx.store.set(GROUP_ID, ProtectionFlag::MentionProtect, true).await.unwrap();

    // four mentions stay under the threshold
    ctx.deliver(&payload(vec![mention_event(GROUP_ID, MEMBER_ID, &["U1", "U2", "U3", "U4"])])).await;
    assert_eq!(ctx.line_mock.outbound_messages().await, 0);

    ctx.deliver(&payload(vec![mention_event(GROUP_ID, MEMBER_ID, &["U1", "U2", "U3", "U4", "U5"])])).await;
    assert_eq!(ctx.line_mock.kickouts().await.len(), 1);
}

#[tokio::test]
async fn test_failed_removal_is_reported_to_admins() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    ctx.line_mock.mock_kickout(403).await;
    ctx.store.init(GROUP_ID).await.unwrap();
    ctx.store.set(GROUP_ID, ProtectionFlag::MentionProtect, true).await.unwrap();

    let status = ctx.deliver(&payload(vec![text_event(GROUP_ID, MEMBER_ID, "@所有人 看這裡")])).await;
    assert_eq!(status, StatusCode::OK);

    let pushes = ctx.line_mock.pushes().await;
    assert_eq!(pushes.len(), 2);
    assert!(pushes[1].1.contains(MEMBER_ID));
    assert!(pushes[1].1.contains("403"));
}

#[tokio::test]
async fn test_sticker_flood_warns_without_removal() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    ctx.store.init(GROUP_ID).await.unwrap();
    ctx.store.set(GROUP_ID, ProtectionFlag::StickerProtect, true).await.unwrap();

    ctx.deliver(&payload(vec![sticker_event(GROUP_ID, MEMBER_ID)])).await;

    let replies = ctx.line_mock.replies().await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0][0].contains("貼圖洗版"));
    assert_eq!(ctx.line_mock.pushes().await.len(), 1);
    assert!(ctx.line_mock.kickouts().await.is_empty());
}

#[tokio::test]
async fn test_disabled_protection_stays_silent() {
    let ctx = TestContext::new().await.expect("Failed to create test context");

    let status = ctx.deliver(&payload(vec![text_event(GROUP_ID, MEMBER_ID, "記事本")])).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(ctx.line_mock.outbound_messages().await, 0);
    assert_eq!(ctx.store.get(GROUP_ID).await.unwrap(), GroupSettings::new(GROUP_ID));
}

#[tokio::test]
async fn test_member_commands_are_ignored() {
    let ctx = TestContext::new().await.expect("Failed to create test context");

    ctx.deliver(&payload(vec![
        text_event(GROUP_ID, MEMBER_ID, "/狀態"),
        text_event(GROUP_ID, MEMBER_ID, "踢人保護 開"),
        text_event(GROUP_ID, MEMBER_ID, "/踢我"),
    ]))
    .await;

    assert_eq!(ctx.line_mock.outbound_messages().await, 0);
    assert!(!ctx.store.get(GROUP_ID).await.unwrap().kick_protect);
}

#[tokio::test]
async fn test_status_after_toggle() {
    let ctx = TestContext::new().await.expect("Failed to create test context");

    ctx.deliver(&payload(vec![
        text_event(GROUP_ID, ADMIN_ID, "貼圖洗版保護 開"),
        text_event(GROUP_ID, ADMIN_ID, "/狀態"),
    ]))
    .await;

    let replies = ctx.line_mock.replies().await;
    assert_eq!(replies.len(), 2);

    let lines: Vec<&str> = replies[1][0].lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines.iter().filter(|line| line.starts_with("✅")).count(), 1);
    assert_eq!(lines.iter().filter(|line| line.starts_with("❌")).count(), 7);
    assert_eq!(lines[7], "✅ 貼圖洗版保護");
}

#[tokio::test]
async fn test_alias_toggles_share_a_flag() {
    let ctx = TestContext::new().await.expect("Failed to create test context");

    ctx.deliver(&payload(vec![text_event(GROUP_ID, ADMIN_ID, "群名保護 開")])).await;
    assert!(ctx.store.get(GROUP_ID).await.unwrap().name_image_protect);

    ctx.deliver(&payload(vec![text_event(GROUP_ID, ADMIN_ID, "群圖保護 關")])).await;
    assert!(!ctx.store.get(GROUP_ID).await.unwrap().name_image_protect);
}

#[tokio::test]
async fn test_welcome_falls_back_to_placeholder() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    ctx.line_mock.mock_profile(GROUP_ID, "Unew0001", "Amy").await;

    let status = ctx.deliver(&payload(vec![member_joined_event(GROUP_ID, &["Unew0001", "Unew0002"])])).await;
    assert_eq!(status, StatusCode::OK);

    let replies = ctx.line_mock.replies().await;
    assert_eq!(replies, vec![vec![
        "Amy 歡迎加入群組🥳\n請先看看記事本的群規喔🎉".to_string(),
        "使用者 歡迎加入群組🥳\n請先看看記事本的群規喔🎉".to_string(),
    ]]);
}

#[tokio::test]
async fn test_direct_messages_are_ignored() {
    let ctx = TestContext::new().await.expect("Failed to create test context");

    let status = ctx.deliver(&payload(vec![direct_text_event(ADMIN_ID, "/help")])).await;
    assert_eq!(status, StatusCode::OK);

    assert!(ctx.line_mock.requests().await.is_empty());
    assert!(ctx.store.get(ADMIN_ID).await.is_err());
}

#[tokio::test]
async fn test_unsigned_delivery_rejected() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    let body = payload(vec![text_event(GROUP_ID, ADMIN_ID, "/help")]).to_string();

    assert_eq!(ctx.post_raw(body.clone(), None).await, StatusCode::BAD_REQUEST);
    assert_eq!(
        ctx.post_raw(body, Some("c2lnbmF0dXJl".to_string())).await,
        StatusCode::BAD_REQUEST
    );
    assert!(ctx.line_mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_self_kick_when_enabled() {
    let config = TestConfig { self_kick: true, ..TestConfig::default() };
    let ctx = TestContext::new_with_config(config).await.expect("Failed to create test context");
    ctx.line_mock.mock_kickout(200).await;

    ctx.deliver(&payload(vec![text_event(GROUP_ID, MEMBER_ID, "/踢我")])).await;

    assert_eq!(ctx.line_mock.replies().await, vec![vec!["🥾 你請求被踢，我就踢！掰～".to_string()]]);
    assert_eq!(ctx.line_mock.kickouts().await.len(), 1);
}

#[tokio::test]
async fn test_sqlite_backend_persists_toggles() {
    let config = TestConfig { backend: StorageBackend::Sqlite, ..TestConfig::default() };
    let ctx = TestContext::new_with_config(config).await.expect("Failed to create test context");

    ctx.deliver(&payload(vec![text_event(GROUP_ID, ADMIN_ID, "相簿保護 開")])).await;
    ctx.deliver(&payload(vec![text_event(GROUP_ID, MEMBER_ID, "看相簿")])).await;

    assert!(ctx.store.get(GROUP_ID).await.unwrap().album_protect);
    assert!(ctx.temp_dir.path().join("settings.db").exists());
    assert_eq!(ctx.line_mock.replies().await.len(), 2);
    assert_eq!(ctx.line_mock.pushes().await.len(), 1);
}
