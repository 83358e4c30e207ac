//! Webhook payload builders

use serde_json::{json, Value};

pub const GROUP_ID: &str = "Cdance0001";
pub const ADMIN_ID: &str = "Uadmin0001";
pub const MEMBER_ID: &str = "Umember0001";

pub fn payload(events: Vec<Value>) -> Value {
    json!({ "destination": "Ubot", "events": events })
}

pub fn text_event(group_id: &str, user_id: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "active",
        "timestamp": 1700000000000u64,
        "replyToken": format!("rt-{}", user_id),
        "source": { "type": "group", "groupId": group_id, "userId": user_id },
        "message": { "type": "text", "id": "100001", "text": text }
    })
}

pub fn mention_event(group_id: &str, user_id: &str, mentioned: &[&str]) -> Value {
    let mentionees: Vec<Value> = mentioned
        .iter()
        .enumerate()
        .map(|(i, id)| json!({ "index": i * 3, "length": 2, "userId": id, "type": "user" }))
        .collect();

    json!({
        "type": "message",
        "replyToken": format!("rt-{}", user_id),
        "source": { "type": "group", "groupId": group_id, "userId": user_id },
        "message": {
            "type": "text",
            "id": "100002",
            "text": "hello everyone",
            "mention": { "mentionees": mentionees }
        }
    })
}

pub fn sticker_event(group_id: &str, user_id: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": format!("rt-{}", user_id),
        "source": { "type": "group", "groupId": group_id, "userId": user_id },
        "message": { "type": "sticker", "id": "100003", "packageId": "446", "stickerId": "1988" }
    })
}

pub fn member_joined_event(group_id: &str, user_ids: &[&str]) -> Value {
    let members: Vec<Value> = user_ids
        .iter()
        .map(|id| json!({ "type": "user", "userId": id }))
        .collect();

    json!({
        "type": "memberJoined",
        "replyToken": "rt-joined",
        "source": { "type": "group", "groupId": group_id },
        "joined": { "members": members }
    })
}

pub fn direct_text_event(user_id: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": "rt-direct",
        "source": { "type": "user", "userId": user_id },
        "message": { "type": "text", "id": "100004", "text": text }
    })
}
