//! Document boundary: element lookup and container content replacement.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tracing::{debug, warn};

use super::node::{render_nodes, Node};

/// An element whose children can be replaced wholesale.
pub trait Container: Send + Sync {
    /// Element id.
    fn id(&self) -> &str;

    /// Replace all children. No diffing against the previous content.
    fn replace_children(&self, nodes: Vec<Node>);

    /// Current children.
    fn children(&self) -> Vec<Node>;

    /// Serialized children.
    fn inner_html(&self) -> String {
        render_nodes(&self.children())
    }
}

/// Element lookup by id.
pub trait Document: Send + Sync {
    /// Find a container by its id.
    fn get_element_by_id(&self, id: &str) -> Option<Arc<dyn Container>>;
}

/// In-memory container.
#[derive(Debug)]
pub struct Slot {
    id: String,
    children: RwLock<Vec<Node>>,
}

impl Slot {
    /// Create an empty slot.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: RwLock::new(Vec::new()),
        }
    }
}

impl Container for Slot {
    fn id(&self) -> &str {
        &self.id
    }

    fn replace_children(&self, nodes: Vec<Node>) {
        let mut children = self
            .children
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *children = nodes;
    }

    fn children(&self) -> Vec<Node> {
        self.children
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// In-memory document made of named slots.
///
/// Slots can be attached after the pipeline has started looking for them,
/// which is how a late-mounted container is modelled.
#[derive(Debug, Default)]
pub struct SlotDocument {
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl SlotDocument {
    /// Create a document without slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach (or return the existing) slot with the given id.
    pub fn attach(&self, id: &str) -> Arc<Slot> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(
            slots
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Slot::new(id))),
        )
    }

    /// Slot by id, with its concrete type.
    pub fn slot(&self, id: &str) -> Option<Arc<Slot>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }
}

impl Document for SlotDocument {
    fn get_element_by_id(&self, id: &str) -> Option<Arc<dyn Container>> {
        self.slot(id).map(|slot| slot as Arc<dyn Container>)
    }
}

/// Bounded retry policy for container lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of lookups, including the first.
    pub attempts: u32,
    /// Delay between lookups.
    pub delay: Duration,
}

/// Look a container up, retrying with a delay while it is missing.
///
/// Gives up after `policy.attempts` lookups.
pub async fn locate_container(
    document: &dyn Document,
    id: &str,
    policy: RetryPolicy,
) -> Option<Arc<dyn Container>> {
    let attempts = policy.attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(container) = document.get_element_by_id(id) {
            debug!("Container #{} found on attempt {}", id, attempt);
            return Some(container);
        }
        if attempt < attempts {
            debug!(
                "Container #{} not found (attempt {}/{}), retrying",
                id, attempt, attempts
            );
            tokio::time::sleep(policy.delay).await;
        }
    }

    warn!("Container #{} not found after {} attempt(s)", id, attempts);
    None
}
