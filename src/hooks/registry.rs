//! In-process hook registry.

use std::fmt;

use rustc_hash::FxHashMap;

use super::{HookDispatcher, HookEvent};
use crate::debug;
use crate::resource::Resource;

pub type HookHandler = Box<dyn Fn(&mut Resource)>;

/// Handlers per event, run in registration order.
#[derive(Default)]
pub struct HookRegistry {
    handlers: FxHashMap<HookEvent, Vec<HookHandler>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, event: HookEvent, handler: F) -> &mut Self
    where
        F: Fn(&mut Resource) + 'static,
    {
        self.handlers.entry(event).or_default().push(Box::new(handler));
        self
    }

    pub fn handler_count(&self, event: HookEvent) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }
}

impl HookDispatcher for HookRegistry {
    fn trigger(&self, event: HookEvent, resource: &mut Resource) {
        let handlers = self.handlers.get(&event).map_or(&[][..], Vec::as_slice);
        debug!("hook"; "{} {} ({})", event, resource.relative_path().display(), handlers.len());
        for handler in handlers {
            handler(resource);
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<_> = HookEvent::ALL
            .into_iter()
            .map(|event| (event.name(), self.handler_count(event)))
            .filter(|(_, count)| *count > 0)
            .collect();
        f.debug_struct("HookRegistry")
            .field("handlers", &counts)
            .finish()
    }
}
