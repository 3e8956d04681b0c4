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

//! Ordering of open and close requests from the host page.

/// Hands out a ticket per open request. Any later open or close makes
/// earlier tickets stale, so a launch that finishes late (for example after
/// a slow JWT enrichment) can tell it was superseded.
#[derive(Debug, Default)]
pub struct OpenRequests {
    current: u64,
}

impl OpenRequests {
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn cancel(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_open_supersedes_pending_one() {
        let mut requests = OpenRequests::default();
        let slow = requests.begin();
        let fast = requests.begin();
        assert!(requests.is_current(fast));
        assert!(!requests.is_current(slow));
    }

    #[test]
    fn close_supersedes_pending_open() {
        let mut requests = OpenRequests::default();
        let pending = requests.begin();
        requests.cancel();
        assert!(!requests.is_current(pending));

        let next = requests.begin();
        assert!(requests.is_current(next));
    }
}
