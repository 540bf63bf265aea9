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

//! The iframe owned by a widget.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use eyeball::{SharedObservable, Subscriber};
use tracing::debug;

use crate::{config::Style, dom::Dom, DomError};

const TEST_ID: &str = "mx-widget-iframe";
pub(crate) const DEFAULT_TITLE: &str = "Widget Iframe";

/// The lifecycle of a widget's iframe.
///
/// ```text
/// Uninitialized -> PendingUrl -> Mounted
///       \              \           \
///        +--------------+-----------+--> Unmounted
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// The frame exists but has no `src` yet.
    Uninitialized,
    /// The widget URL is being resolved.
    PendingUrl,
    /// The frame has its `src` and is attached to the container.
    Mounted,
    /// The widget was unmounted, the frame is detached for good.
    Unmounted,
}

/// Owns the frame element and drives it through [`FrameState`]s.
///
/// Transitions are serialized, so a mount racing with an unmount either
/// happens entirely before it or not at all.
pub(crate) struct FrameLifecycle<D: Dom> {
    dom: Arc<D>,
    container: D::Element,
    frame: D::Frame,
    current: Mutex<FrameState>,
    state: SharedObservable<FrameState>,
}

impl<D: Dom> FrameLifecycle<D> {
    /// Create the frame element, without attaching it.
    pub(crate) fn new(dom: Arc<D>, container: D::Element) -> Result<Self, DomError> {
        let frame = dom.create_frame()?;
        debug!("Created the widget frame");

        Ok(Self {
            dom,
            container,
            frame,
            current: Mutex::new(FrameState::Uninitialized),
            state: SharedObservable::new(FrameState::Uninitialized),
        })
    }

    pub(crate) fn state(&self) -> FrameState {
        *self.current.lock().unwrap()
    }

    pub(crate) fn subscribe(&self) -> Subscriber<FrameState> {
        self.state.subscribe()
    }

    fn set_state(&self, current: &mut FrameState, state: FrameState) {
        *current = state;
        self.state.set(state);
    }

    /// Record that the widget URL is being resolved.
    pub(crate) fn begin_resolution(&self) {
        let mut current = self.current.lock().unwrap();
        if *current == FrameState::Uninitialized {
            self.set_state(&mut current, FrameState::PendingUrl);
        }
    }

    /// Point the frame at `url` and attach it.
    ///
    /// Returns `Ok(false)` without touching the document if the frame was
    /// unmounted in the meantime or the URL is empty.
    pub(crate) fn mount(&self, url: &str, title: &str, style: &Style) -> Result<bool, DomError> {
        let mut current = self.current.lock().unwrap();

        match *current {
            FrameState::Unmounted => {
                debug!("The widget was unmounted before its URL was resolved");
                return Ok(false);
            }
            FrameState::Mounted => return Ok(false),
            FrameState::Uninitialized | FrameState::PendingUrl => {}
        }

        if url.is_empty() {
            debug!("Not mounting the frame, the resolved URL is empty");
            return Ok(false);
        }

        self.dom.set_attribute(&self.frame, "data-test-id", TEST_ID);
        self.dom.set_attribute(&self.frame, "title", title);
        self.dom.set_attribute(&self.frame, "src", url);

        for (property, value) in style.iter() {
            self.dom.set_style_property(&self.frame, property, value);
        }

        self.dom.append_child(&self.container, &self.frame)?;
        self.set_state(&mut current, FrameState::Mounted);
        debug!("Mounted the widget frame");

        Ok(true)
    }

    /// Detach the frame for good. Calling this more than once is fine.
    pub(crate) fn unmount(&self) -> Result<(), DomError> {
        let mut current = self.current.lock().unwrap();
        if *current == FrameState::Unmounted {
            return Ok(());
        }

        self.set_state(&mut current, FrameState::Unmounted);

        if self.dom.contains(&self.container, &self.frame) {
            self.dom.remove_child(&self.container, &self.frame)?;
            debug!("Removed the widget frame");
        }

        Ok(())
    }

    pub(crate) fn content_window(&self) -> Option<D::Window> {
        self.dom.content_window(&self.frame)
    }

    pub(crate) fn dom(&self) -> &D {
        &self.dom
    }
}

impl<D: Dom> fmt::Debug for FrameLifecycle<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLifecycle")
            .field("container", &self.container)
            .field("frame", &self.frame)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
