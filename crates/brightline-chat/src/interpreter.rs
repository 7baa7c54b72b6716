//! Client-side handling of the UI action attached to a chat reply.
//!
//! The interpreter turns an action into an explicit [`UiPlan`] for the
//! router and parks any form pre-fill in a [`PrefillSlot`]. The contact
//! form takes the pending pre-fill when it mounts, so delivery does not
//! depend on how long the route transition takes.

use std::sync::{Arc, Mutex};

use brightline_core::types::{FillContactData, UiAction};

/// Route of the contact page.
pub const CONTACT_ROUTE: &str = "/contact";

/// What the client should do after rendering the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiPlan {
    /// Transition to `path`.
    Navigate { path: String },
    /// Show the contact form, transitioning to it first when `navigate`.
    OpenContactForm { navigate: bool },
}

/// Single pending contact-form pre-fill.
#[derive(Debug, Default)]
pub struct PrefillSlot {
    pending: Mutex<Option<FillContactData>>,
}

impl PrefillSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a pre-fill, returning the untaken one it replaces.
    pub fn put(&self, data: FillContactData) -> Option<FillContactData> {
        match self.pending.lock() {
            Ok(mut guard) => guard.replace(data),
            Err(poisoned) => poisoned.into_inner().replace(data),
        }
    }

    /// Remove and return the pending pre-fill. Called by the form on mount.
    pub fn take(&self) -> Option<FillContactData> {
        match self.pending.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    pub fn is_pending(&self) -> bool {
        match self.pending.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}

/// Maps reply actions to plans.
#[derive(Debug, Clone, Default)]
pub struct ActionInterpreter {
    slot: Arc<PrefillSlot>,
}

impl ActionInterpreter {
    pub fn new(slot: Arc<PrefillSlot>) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &Arc<PrefillSlot> {
        &self.slot
    }

    /// Plan for `action` given the route the visitor is currently on.
    pub fn interpret(&self, current_route: &str, action: &UiAction) -> UiPlan {
        match action {
            UiAction::Navigate(data) => UiPlan::Navigate {
                path: data.path.clone(),
            },
            UiAction::FillContact(data) => {
                if self.slot.put(data.clone()).is_some() {
                    tracing::debug!("Replaced untaken contact pre-fill");
                }
                UiPlan::OpenContactForm {
                    navigate: !is_contact_route(current_route),
                }
            }
        }
    }
}

/// Whether `route` is the contact page, ignoring query, fragment and a
/// trailing slash.
pub fn is_contact_route(route: &str) -> bool {
    let path = route.split(['?', '#']).next().unwrap_or_default();
    let path = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };
    path == CONTACT_ROUTE
}
