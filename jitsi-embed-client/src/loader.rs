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

//! Loads the conferencing widget's script exactly once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use log::{debug, error, info};

use crate::error::LoadError;

/// Outcome of one script injection.
pub type ScriptLoad = LocalBoxFuture<'static, Result<(), LoadError>>;

/// The document the script is injected into.
pub trait ScriptHost {
    /// Whether the widget constructor is already defined (for example because
    /// the host page ships the script itself).
    fn widget_available(&self) -> bool;

    /// Append one `<script src=url>` element. The returned future resolves
    /// when the element fires `load` or `error`.
    fn inject(&self, url: &str) -> Result<ScriptLoad, LoadError>;
}

struct InFlight {
    id: u64,
    load: Shared<ScriptLoad>,
}

/// Idempotent loader: concurrent callers share one injection and observe the
/// same outcome. A failed load is forgotten so a later open can retry.
pub struct WidgetLoader {
    host: Rc<dyn ScriptHost>,
    in_flight: RefCell<Option<InFlight>>,
    next_id: Cell<u64>,
    loaded: Cell<bool>,
}

impl WidgetLoader {
    pub fn new(host: Rc<dyn ScriptHost>) -> Self {
        Self {
            host,
            in_flight: RefCell::new(None),
            next_id: Cell::new(0),
            loaded: Cell::new(false),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get() || self.host.widget_available()
    }

    pub async fn ensure_loaded(&self, url: &str) -> Result<(), LoadError> {
        if self.is_loaded() {
            return Ok(());
        }

        let (id, load) = self.join_or_inject(url)?;
        let result = load.await;

        {
            let mut in_flight = self.in_flight.borrow_mut();
            if in_flight.as_ref().is_some_and(|f| f.id == id) {
                *in_flight = None;
            }
        }

        match &result {
            Ok(()) => {
                self.loaded.set(true);
                info!("loader: widget script {url} loaded");
            }
            Err(e) => error!("loader: {e}"),
        }
        result
    }

    fn join_or_inject(&self, url: &str) -> Result<(u64, Shared<ScriptLoad>), LoadError> {
        let mut in_flight = self.in_flight.borrow_mut();
        if let Some(pending) = in_flight.as_ref() {
            debug!("loader: joining in-flight load of {url}");
            return Ok((pending.id, pending.load.clone()));
        }

        debug!("loader: injecting {url}");
        let load = self.host.inject(url)?.shared();
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        *in_flight = Some(InFlight {
            id,
            load: load.clone(),
        });
        Ok((id, load))
    }
}
