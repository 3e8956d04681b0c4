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

//! Native platform primitives, built on `tokio`.
//!
//! The controller is single-threaded and its callbacks are `!Send`, so both
//! primitives use `spawn_local` and must run inside a `tokio::task::LocalSet`.

use std::future::Future;
use std::time::Duration;

/// A one-shot timer. The backing task is aborted when the handle is dropped.
pub struct TimeoutHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl TimeoutHandle {
    pub fn new<F: FnOnce() + 'static>(delay: Duration, callback: F) -> Self {
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self { handle }
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a local task on the current `LocalSet`.
pub fn spawn<F: Future<Output = ()> + 'static>(future: F) {
    tokio::task::spawn_local(future);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_once_after_delay() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let fired = Rc::new(Cell::new(0));
                let counter = fired.clone();
                let _handle = TimeoutHandle::new(Duration::from_millis(200), move || {
                    counter.set(counter.get() + 1);
                });

                tokio::time::sleep(Duration::from_millis(199)).await;
                assert_eq!(fired.get(), 0);
                tokio::time::sleep(Duration::from_millis(2)).await;
                assert_eq!(fired.get(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_timeout_never_fires() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let flag = fired.clone();
                let handle = TimeoutHandle::new(Duration::from_millis(50), move || flag.set(true));
                drop(handle);

                tokio::time::sleep(Duration::from_millis(100)).await;
                assert!(!fired.get());
            })
            .await;
    }

    #[tokio::test]
    async fn spawn_runs_local_future() {
        let local = tokio::task::LocalSet::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        local
            .run_until(async move {
                spawn(async move { flag.set(true) });
            })
            .await;
        local.await;
        assert!(ran.get());
    }
}
