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

//! Post messages exchanged between the host page and the widgets.
//!
//! Every message is wrapped in an [`Envelope`]:
//!
//! ```json
//! { "mx": true, "type": "mx/ping", "metadata": { "user_guid": "USR-123" } }
//! ```
//!
//! The `type` tag selects a typed metadata record from one of the event
//! catalogues ([`WidgetEvent`], [`ConnectEvent`], [`PulseEvent`]), which is
//! then handed to the matching user callback.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use tracing::trace;

use crate::channel::MessageEvent;

macro_rules! post_message_events {
    (
        $(#[$meta:meta])*
        pub enum $event:ident => $callbacks:ident {
            $(
                $(#[$variant_meta:meta])*
                $tag:literal => $variant:ident($payload:ident) as $setter:ident,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(tag = "type", content = "metadata")]
        pub enum $event {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $tag)]
                $variant($payload),
            )*
        }

        impl $event {
            /// The wire tag of this event.
            pub fn event_type(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => $tag, )*
                }
            }
        }

        $(
            impl $crate::messages::PostMessageEvent for $payload {
                const TYPE: &'static str = $tag;
            }
        )*

        #[doc = concat!("User callbacks for [`", stringify!($event), "`]s, at most one per type.")]
        #[derive(Clone, Default)]
        pub struct $callbacks {
            $( $setter: Option<$crate::messages::Callback<$payload>>, )*
        }

        impl $callbacks {
            $(
                #[doc = concat!("Set the callback for `", $tag, "` messages.")]
                pub fn $setter<F>(mut self, callback: F) -> Self
                where
                    F: Fn(&$payload) + $crate::SendOutsideWasm + $crate::SyncOutsideWasm + 'static,
                {
                    let callback: $crate::messages::Callback<$payload> =
                        std::sync::Arc::new(callback);
                    self.$setter = Some(callback);
                    self
                }
            )*

            /// Invoke the callback registered for `event`.
            ///
            /// Returns `false` if there was none.
            pub(crate) fn call(&self, event: &$event) -> bool {
                match event {
                    $(
                        $event::$variant(payload) => match &self.$setter {
                            Some(callback) => {
                                callback(payload);
                                true
                            }
                            None => false,
                        },
                    )*
                }
            }
        }

        impl std::fmt::Debug for $callbacks {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut set = f.debug_set();
                $(
                    if self.$setter.is_some() {
                        set.entry(&stringify!($setter));
                    }
                )*
                set.finish()
            }
        }
    };
}

mod connect;
mod pulse;
mod widget;

pub use self::{connect::*, pulse::*, widget::*};

/// A JSON object.
pub type JsonObject = Map<String, JsonValue>;

/// A user callback receiving a typed message.
#[cfg(not(target_family = "wasm"))]
pub type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;
/// A user callback receiving a typed message.
#[cfg(target_family = "wasm")]
pub type Callback<T> = Arc<dyn Fn(&T)>;

/// A typed message record with a fixed wire tag.
pub trait PostMessageEvent {
    /// The `type` of the envelopes carrying this record.
    const TYPE: &'static str;
}

/// The tag of the navigation request and of its answer.
pub const NAVIGATION_EVENT_TYPE: &str = "mx/navigation";

/// The wire shape of every post message, in both directions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Marker of MX messages, always `true` for accepted envelopes.
    pub mx: bool,
    /// Namespaced event tag, e.g. `mx/load`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Data describing the event, sent by widgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
    /// Data for the receiver to act on, sent by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonObject>,
}

impl Envelope {
    /// Create an MX envelope of the given type, without data.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self { mx: true, event_type: event_type.into(), metadata: None, payload: None }
    }

    /// Attach a payload to the envelope.
    pub fn with_payload(mut self, payload: JsonObject) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach metadata to the envelope.
    pub fn with_metadata(mut self, metadata: JsonObject) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The envelope the host posts to ask a widget to go back.
    pub fn navigate_back() -> Self {
        let mut payload = JsonObject::new();
        payload.insert("action".to_owned(), "back".into());

        Self::new(NAVIGATION_EVENT_TYPE).with_payload(payload)
    }

    /// Extract the envelope of an inbound message.
    ///
    /// Returns `None` for anything that isn't meant for us: data that isn't
    /// an object, or lacks the `mx: true` marker or a `type`. Strings are
    /// never parsed, even when they hold a serialized envelope.
    pub fn from_event(event: &MessageEvent) -> Option<Self> {
        let data = &event.data;

        if data.get("mx") != Some(&JsonValue::Bool(true)) {
            trace!("Ignoring a message without the mx marker");
            return None;
        }

        match Self::deserialize(data) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                trace!("Ignoring a malformed mx message: {e}");
                None
            }
        }
    }

    /// Read the envelope as one of the event catalogues.
    ///
    /// Missing metadata is treated as an empty object. Returns `None` if the
    /// type isn't part of the catalogue or the metadata doesn't fit it.
    pub fn parse<T: DeserializeOwned>(&self) -> Option<T> {
        let metadata = self.metadata.clone().unwrap_or_default();
        serde_json::from_value(json!({ "type": self.event_type, "metadata": metadata })).ok()
    }
}
