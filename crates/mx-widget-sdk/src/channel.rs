// Copyright 2026 The MX Widget SDK Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The process-wide inbound message bus.
//!
//! Every widget instance registers one listener on the bus for its whole
//! lifetime, `navigate_back` registers a short-lived one per call. Listeners
//! are independent of each other: none of them can consume or hide a message
//! from the others, and the bus makes no claim of exclusivity over the
//! messages it carries.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
};

use serde_json::Value as JsonValue;
use tracing::trace;

use crate::{AsyncTraitDeps, SendOutsideWasm, SyncOutsideWasm};

/// A message received on the bus, the equivalent of a DOM `MessageEvent`.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageEvent {
    /// The posted data.
    pub data: JsonValue,
    /// The origin of the sender, empty if unknown.
    pub origin: String,
}

impl MessageEvent {
    /// Create an event carrying `data` from an unknown origin.
    pub fn new(data: JsonValue) -> Self {
        Self { data, origin: String::new() }
    }

    /// Set the origin of the sender.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}

/// A function called for every message on the bus.
#[cfg(not(target_family = "wasm"))]
pub type MessageListener = Arc<dyn Fn(&MessageEvent) + Send + Sync>;
/// A function called for every message on the bus.
#[cfg(target_family = "wasm")]
pub type MessageListener = Arc<dyn Fn(&MessageEvent)>;

/// Wrap a closure into a [`MessageListener`].
pub fn listener<F>(f: F) -> MessageListener
where
    F: Fn(&MessageEvent) + SendOutsideWasm + SyncOutsideWasm + 'static,
{
    Arc::new(f)
}

/// Handle to remove a listener by passing it to
/// [`MessageChannel::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    /// Create a handle from a raw id, for [`MessageChannel`] implementors.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id of this handle.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// A bus widgets subscribe to for inbound messages.
///
/// Listeners may subscribe or unsubscribe (themselves or others) while a
/// message is being dispatched; a change only takes effect for the next
/// message.
pub trait MessageChannel: AsyncTraitDeps {
    /// Register `listener` for every future message.
    fn subscribe(&self, listener: MessageListener) -> SubscriptionHandle;

    /// Remove a listener. Unknown or already removed handles are ignored.
    fn unsubscribe(&self, handle: SubscriptionHandle);
}

/// In-process [`MessageChannel`].
///
/// Cloning is cheap, clones share the same listeners. Hosts feed it with
/// [`MessageBus::dispatch`], e.g. from a webview's message callback.
#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Arc<BusInner>,
}

#[derive(Default)]
struct BusInner {
    listeners: RwLock<BTreeMap<SubscriptionHandle, MessageListener>>,
    counter: AtomicU64,
}

impl MessageBus {
    /// Create a bus without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener registered at the time of the call,
    /// in registration order.
    pub fn dispatch(&self, event: MessageEvent) {
        // Clone the listeners so none of them runs with the lock held.
        let listeners: Vec<_> = self.inner.listeners.read().unwrap().values().cloned().collect();
        trace!(listeners = listeners.len(), "Dispatching a message");

        for listener in listeners {
            listener(&event);
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().unwrap().len()
    }
}

impl MessageChannel for MessageBus {
    fn subscribe(&self, listener: MessageListener) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.inner.counter.fetch_add(1, Ordering::SeqCst));
        self.inner.listeners.write().unwrap().insert(handle, listener);
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.inner.listeners.write().unwrap().remove(&handle);
    }
}

impl fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBus").field("listeners", &self.listener_count()).finish()
    }
}
