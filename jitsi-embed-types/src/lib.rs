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

//! Data types shared by the embedded meeting controller, the plugin REST
//! client and the UI.

pub mod api;
pub mod meeting;

pub use api::{
    EnrichMeetingJwtRequest, EnrichMeetingJwtResponse, JaasSettings, JaasSettingsRequest,
    NamingScheme, StartMeetingRequest, StartMeetingResponse, UserConfig, UserStatus,
    UserStatusRequest, JAAS_DOMAIN,
};
pub use meeting::{MeetingDescriptor, MeetingLinkError, OpenMeeting, DEFAULT_MEETING_TITLE};
