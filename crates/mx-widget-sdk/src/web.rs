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

//! Browser implementations of [`Dom`] and [`MessageChannel`] on top of
//! `web-sys`.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
};

use serde_json::Value as JsonValue;
use tracing::{trace, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlIFrameElement, Node, Window};

use crate::{
    channel::{MessageChannel, MessageEvent, MessageListener, SubscriptionHandle},
    dom::Dom,
    DomError,
};

/// The document of the current page.
#[derive(Clone, Debug)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Use the document of the global `window`.
    pub fn new() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DomError::new("no global document"))?;

        Ok(Self { document })
    }

    /// Use the given document.
    pub fn with_document(document: Document) -> Self {
        Self { document }
    }
}

impl Dom for WebDom {
    type Element = Element;
    type Frame = HtmlIFrameElement;
    type Window = Window;

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, DomError> {
        self.document.query_selector(selector).map_err(DomError::from_debug)
    }

    fn create_frame(&self) -> Result<HtmlIFrameElement, DomError> {
        self.document
            .create_element("iframe")
            .map_err(DomError::from_debug)?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(DomError::from_debug)
    }

    fn set_attribute(&self, frame: &HtmlIFrameElement, name: &str, value: &str) {
        if let Err(e) = frame.set_attribute(name, value) {
            warn!(name, "Couldn't set a frame attribute: {e:?}");
        }
    }

    fn set_style_property(&self, frame: &HtmlIFrameElement, property: &str, value: &str) {
        if let Err(e) = frame.style().set_property(property, value) {
            warn!(property, "Couldn't set a frame style property: {e:?}");
        }
    }

    fn append_child(&self, container: &Element, frame: &HtmlIFrameElement) -> Result<(), DomError> {
        container.append_child(frame).map(drop).map_err(DomError::from_debug)
    }

    fn contains(&self, container: &Element, frame: &HtmlIFrameElement) -> bool {
        let frame: &Node = frame;
        container.contains(Some(frame))
    }

    fn remove_child(&self, container: &Element, frame: &HtmlIFrameElement) -> Result<(), DomError> {
        container.remove_child(frame).map(drop).map_err(DomError::from_debug)
    }

    fn content_window(&self, frame: &HtmlIFrameElement) -> Option<Window> {
        frame.content_window()
    }

    fn post_message(
        &self,
        window: &Window,
        message: &str,
        target_origin: &str,
    ) -> Result<(), DomError> {
        window
            .post_message(&JsValue::from_str(message), target_origin)
            .map_err(DomError::from_debug)
    }
}

type MessageClosure = Closure<dyn FnMut(web_sys::MessageEvent)>;

/// The `message` events of a window.
pub struct WindowMessageChannel {
    window: Window,
    listeners: RefCell<BTreeMap<SubscriptionHandle, MessageClosure>>,
    counter: Cell<u64>,
}

impl WindowMessageChannel {
    /// Listen to the `message` events of the global `window`.
    pub fn new() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or_else(|| DomError::new("no global window"))?;
        Ok(Self::with_window(window))
    }

    /// Listen to the `message` events of the given window.
    pub fn with_window(window: Window) -> Self {
        Self { window, listeners: Default::default(), counter: Cell::new(0) }
    }
}

impl MessageChannel for WindowMessageChannel {
    fn subscribe(&self, listener: MessageListener) -> SubscriptionHandle {
        let handle = SubscriptionHandle::from_raw(self.counter.get());
        self.counter.set(handle.as_raw() + 1);

        let closure = MessageClosure::new(move |event: web_sys::MessageEvent| {
            match serde_wasm_bindgen::from_value::<JsonValue>(event.data()) {
                Ok(data) => listener(&MessageEvent::new(data).with_origin(event.origin())),
                Err(e) => trace!("Ignoring a message that isn't JSON: {e}"),
            }
        });

        if let Err(e) = self
            .window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            warn!("Couldn't listen to window messages: {e:?}");
        }

        self.listeners.borrow_mut().insert(handle, closure);
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        let Some(closure) = self.listeners.borrow_mut().remove(&handle) else { return };

        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            warn!("Couldn't stop listening to window messages: {e:?}");
        }

        // A listener may be removing itself, so it can't be freed while running.
        wasm_bindgen_futures::spawn_local(async move { drop(closure) });
    }
}

impl fmt::Debug for WindowMessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowMessageChannel")
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
