//! Resource lifecycle hooks.
//!
//! Resources only emit events; what runs is up to the [`HookDispatcher`].
//!
//! | Phase       | Events                            |
//! |-------------|-----------------------------------|
//! | `init`      | `post_init`                       |
//! | `read`      | `pre_read`, `post_read`           |
//! | `transform` | `pre_transform`, `post_transform` |
//! | `write`     | `pre_write`, `post_write`         |

mod registry;

pub use registry::{HookHandler, HookRegistry};

use std::fmt;

use crate::resource::Resource;

/// Lifecycle phase an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Init,
    Read,
    Transform,
    Write,
}

/// A named lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    PostInit,
    PreRead,
    PostRead,
    PreTransform,
    PostTransform,
    PreWrite,
    PostWrite,
}

impl HookEvent {
    /// Every event, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::PostInit,
        Self::PreRead,
        Self::PostRead,
        Self::PreTransform,
        Self::PostTransform,
        Self::PreWrite,
        Self::PostWrite,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::PostInit => "post_init",
            Self::PreRead => "pre_read",
            Self::PostRead => "post_read",
            Self::PreTransform => "pre_transform",
            Self::PostTransform => "post_transform",
            Self::PreWrite => "pre_write",
            Self::PostWrite => "post_write",
        }
    }

    pub const fn phase(self) -> HookPhase {
        match self {
            Self::PostInit => HookPhase::Init,
            Self::PreRead | Self::PostRead => HookPhase::Read,
            Self::PreTransform | Self::PostTransform => HookPhase::Transform,
            Self::PreWrite | Self::PostWrite => HookPhase::Write,
        }
    }

    /// Look up an event by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the handlers subscribed to an event, synchronously.
pub trait HookDispatcher {
    fn trigger(&self, event: HookEvent, resource: &mut Resource);
}
