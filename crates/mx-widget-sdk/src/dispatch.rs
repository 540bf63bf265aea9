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

//! Dispatch of accepted envelopes to user callbacks.

use tracing::trace;

use crate::messages::{
    ConnectCallbacks, ConnectEvent, Envelope, PulseCallbacks, PulseEvent, WidgetCallbacks,
    WidgetEvent,
};

/// All the callbacks a widget may be configured with.
///
/// Which of them can ever fire depends on the [`Dispatcher`] of the widget
/// kind: the Connect callbacks are only consulted for Connect widgets, the
/// Pulse callbacks only for Pulse widgets.
#[derive(Clone, Debug, Default)]
pub struct Callbacks {
    pub(crate) widget: WidgetCallbacks,
    pub(crate) connect: ConnectCallbacks,
    pub(crate) pulse: PulseCallbacks,
}

/// Strategy turning an envelope into a callback invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatcher {
    /// Knows the messages every widget sends.
    Widget,
    /// Knows the Connect messages on top of the generic ones.
    Connect,
    /// Knows the Pulse messages on top of the generic ones.
    Pulse,
}

impl Dispatcher {
    /// Dispatch `envelope` to the matching callback.
    ///
    /// Returns whether a callback was invoked. Unknown types, metadata that
    /// doesn't fit the type and types without a registered callback are all
    /// silently dropped.
    pub(crate) fn dispatch(&self, envelope: &Envelope, callbacks: &Callbacks) -> bool {
        let specialised = match self {
            Self::Widget => None,
            Self::Connect => {
                envelope.parse::<ConnectEvent>().map(|event| callbacks.connect.call(&event))
            }
            Self::Pulse => envelope.parse::<PulseEvent>().map(|event| callbacks.pulse.call(&event)),
        };

        let called = match specialised {
            Some(called) => called,
            None => envelope
                .parse::<WidgetEvent>()
                .map(|event| callbacks.widget.call(&event))
                .unwrap_or(false),
        };

        if !called {
            trace!(event_type = %envelope.event_type, "Dropping a message without a callback");
        }

        called
    }
}
