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

//! The document the widget is mounted into.

use tracing::debug;

use crate::{AsyncTraitDeps, DomError, Error, Result};

/// Driver for the host document.
///
/// All node handles are opaque to the widget: it only ever owns the frame it
/// created, never the container or anything else beneath it. The browser
/// implementation lives in [`crate::web`], an in-memory one in
/// [`crate::memory`].
pub trait Dom: AsyncTraitDeps + 'static {
    /// Handle to an element that can hold the widget frame.
    type Element: Clone + AsyncTraitDeps + 'static;
    /// Handle to an iframe element.
    type Frame: Clone + AsyncTraitDeps + 'static;
    /// Handle to the browsing context living inside a frame.
    type Window: AsyncTraitDeps + 'static;

    /// Find the first element matching `selector`.
    ///
    /// Returns an error if the selector itself is malformed.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, DomError>;

    /// Create a new, detached iframe element without a `src`.
    fn create_frame(&self) -> Result<Self::Frame, DomError>;

    /// Set an attribute on the frame.
    fn set_attribute(&self, frame: &Self::Frame, name: &str, value: &str);

    /// Set an inline style property on the frame.
    fn set_style_property(&self, frame: &Self::Frame, property: &str, value: &str);

    /// Append the frame as the last child of `container`.
    fn append_child(&self, container: &Self::Element, frame: &Self::Frame) -> Result<(), DomError>;

    /// Whether `frame` currently is a descendant of `container`.
    fn contains(&self, container: &Self::Element, frame: &Self::Frame) -> bool;

    /// Detach `frame` from `container`.
    fn remove_child(&self, container: &Self::Element, frame: &Self::Frame) -> Result<(), DomError>;

    /// The frame's content window, if it has one (i.e. it is attached).
    fn content_window(&self, frame: &Self::Frame) -> Option<Self::Window>;

    /// Post a serialized message to `window`, restricted to `target_origin`.
    fn post_message(
        &self,
        window: &Self::Window,
        message: &str,
        target_origin: &str,
    ) -> Result<(), DomError>;
}

/// Where the widget should be mounted.
#[derive(Clone, Debug)]
pub enum Container<E> {
    /// A selector, looked up once when the widget is constructed.
    Selector(String),
    /// An element handle, used as is.
    Element(E),
}

impl<E> From<&str> for Container<E> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl<E> From<String> for Container<E> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl<E> Container<E> {
    /// Resolve the container into an attachable element.
    ///
    /// The document is queried exactly once; there is no retry.
    pub(crate) fn locate<D>(&self, dom: &D) -> Result<E>
    where
        D: Dom<Element = E>,
        E: Clone,
    {
        match self {
            Self::Element(element) => Ok(element.clone()),
            Self::Selector(selector) => {
                if selector.trim().is_empty() {
                    return Err(Error::InvalidContainer("the selector is empty".to_owned()));
                }

                let element = dom
                    .query_selector(selector)
                    .map_err(|e| Error::InvalidContainer(e.to_string()))?;

                match element {
                    Some(element) => {
                        debug!(%selector, "Found the widget container");
                        Ok(element)
                    }
                    None => Err(Error::ContainerNotFound(selector.clone())),
                }
            }
        }
    }
}
