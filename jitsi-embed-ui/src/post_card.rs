/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! View model of the chat post announcing a meeting.

use jitsi_embed_types::MeetingDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCardModel {
    pub pre_text: String,
    pub title: String,
    pub subtitle_label: &'static str,
    pub meeting_id: String,
    pub join_link: String,
    /// Expiry of the link's JWT, in seconds since the epoch.
    pub valid_until: Option<i64>,
}

impl PostCardModel {
    pub fn new(creator_name: &str, meeting: &MeetingDescriptor, enriched_jwt: Option<&str>) -> Self {
        let subtitle_label = if meeting.meeting_personal {
            "Personal Meeting ID (PMI): "
        } else {
            "Meeting ID: "
        };
        Self {
            pre_text: format!("{creator_name} has started a meeting"),
            title: meeting.subject().to_string(),
            subtitle_label,
            meeting_id: meeting.meeting_id.clone(),
            join_link: meeting.join_link(enriched_jwt),
            valid_until: meeting
                .jwt_meeting
                .then_some(meeting.jwt_meeting_valid_until)
                .flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_meeting() -> MeetingDescriptor {
        MeetingDescriptor {
            meeting_personal: true,
            jwt_meeting: true,
            meeting_jwt: Some("post-jwt".to_string()),
            jwt_meeting_valid_until: Some(1_700_000_000),
            ..MeetingDescriptor::new("alice", "https://meet.jit.si/alice")
        }
    }

    #[test]
    fn plain_meeting_card() {
        let meeting = MeetingDescriptor::new("AbleBaker", "https://meet.jit.si/AbleBaker");
        let card = PostCardModel::new("bob", &meeting, None);
        assert_eq!(card.pre_text, "bob has started a meeting");
        assert_eq!(card.title, "Jitsi Meeting");
        assert_eq!(card.subtitle_label, "Meeting ID: ");
        assert_eq!(card.join_link, "https://meet.jit.si/AbleBaker");
        assert_eq!(card.valid_until, None);
    }

    #[test]
    fn jwt_meeting_prefers_enriched_token() {
        let meeting = jwt_meeting().with_topic("1:1");
        let card = PostCardModel::new("alice", &meeting, Some("enriched"));
        assert_eq!(card.title, "1:1");
        assert_eq!(card.subtitle_label, "Personal Meeting ID (PMI): ");
        assert_eq!(card.join_link, "https://meet.jit.si/alice?jwt=enriched");
        assert_eq!(card.valid_until, Some(1_700_000_000));

        let card = PostCardModel::new("alice", &meeting, None);
        assert_eq!(card.join_link, "https://meet.jit.si/alice?jwt=post-jwt");
    }
}
