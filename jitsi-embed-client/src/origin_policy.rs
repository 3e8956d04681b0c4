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

//! Routing of cross-origin `postMessage` traffic.
//!
//! The widget iframe talks to its external API over `window.postMessage`.
//! Those messages must not reach the chat host's own message handlers. The
//! decision is made purely on the sender's origin against an explicit
//! allow-list of widget origins; message contents are never inspected.

use log::warn;
use url::Url;

/// Who a `message` event is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDisposition {
    /// Sent by the conferencing widget; only the widget API may see it.
    Widget,
    /// Anything else; deliver to the host as usual.
    Host,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOriginPolicy {
    widget_origins: Vec<String>,
}

fn normalize(origin: &str) -> Option<String> {
    let url = Url::parse(origin.trim()).ok()?;
    url.host_str()?;
    Some(url.origin().ascii_serialization())
}

impl MessageOriginPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self::default();
        for origin in origins {
            policy.allow(origin.as_ref());
        }
        policy
    }

    /// Add a widget origin. Entries that do not parse as an absolute URL
    /// with a host are ignored.
    pub fn allow(&mut self, origin: &str) {
        match normalize(origin) {
            Some(origin) => {
                if !self.widget_origins.contains(&origin) {
                    self.widget_origins.push(origin);
                }
            }
            None => warn!("message policy: ignoring invalid origin {origin:?}"),
        }
    }

    pub fn classify(&self, origin: &str) -> MessageDisposition {
        match normalize(origin) {
            Some(origin) if self.widget_origins.contains(&origin) => MessageDisposition::Widget,
            _ => MessageDisposition::Host,
        }
    }

    pub fn origins(&self) -> &[String] {
        &self.widget_origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_origin_is_matched_exactly() {
        let policy = MessageOriginPolicy::new(["https://meet.jit.si/some/room"]);
        assert_eq!(policy.origins(), ["https://meet.jit.si"]);
        assert_eq!(policy.classify("https://meet.jit.si"), MessageDisposition::Widget);
        assert_eq!(policy.classify("https://MEET.jit.si/"), MessageDisposition::Widget);
        assert_eq!(policy.classify("http://meet.jit.si"), MessageDisposition::Host);
        assert_eq!(policy.classify("https://meet.jit.si:8443"), MessageDisposition::Host);
        assert_eq!(policy.classify("https://evil.example"), MessageDisposition::Host);
    }

    #[test]
    fn opaque_and_invalid_origins_go_to_host() {
        let mut policy = MessageOriginPolicy::default();
        policy.allow("null");
        policy.allow("not a url");
        assert!(policy.origins().is_empty());
        assert_eq!(policy.classify("null"), MessageDisposition::Host);
    }

    #[test]
    fn duplicate_origins_are_collapsed() {
        let policy = MessageOriginPolicy::new(["https://8x8.vc", "https://8x8.vc/room"]);
        assert_eq!(policy.origins().len(), 1);
    }
}
