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

//! An in-memory [`Dom`], for hosts without a browser document and for tests.
//!
//! Only the subset of the DOM a widget needs is modelled: elements with
//! attributes, inline style and children, and iframes whose content window
//! records every message posted to it. Selectors are limited to a single
//! simple selector: `#id`, `.class` or a tag name.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, Weak},
};

use crate::{dom::Dom, DomError};

/// An in-memory document.
#[derive(Debug)]
pub struct MemoryDom {
    body: MemoryElement,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self { body: MemoryElement::new("body") }
    }
}

impl MemoryDom {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root element of the document.
    pub fn body(&self) -> &MemoryElement {
        &self.body
    }

    /// Create a detached element.
    pub fn create_element(&self, tag_name: &str) -> MemoryElement {
        MemoryElement::new(tag_name)
    }
}

#[derive(Default)]
struct Node {
    tag_name: String,
    attributes: BTreeMap<String, String>,
    style: Vec<(String, String)>,
    children: Vec<MemoryElement>,
    parent: Option<Weak<Mutex<Node>>>,
    window: MemoryWindow,
}

/// Handle to an element of a [`MemoryDom`].
///
/// Clones are handles to the same element.
#[derive(Clone)]
pub struct MemoryElement(Arc<Mutex<Node>>);

impl MemoryElement {
    fn new(tag_name: &str) -> Self {
        Self(Arc::new(Mutex::new(Node {
            tag_name: tag_name.to_ascii_lowercase(),
            ..Default::default()
        })))
    }

    /// Whether both handles point to the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.0.lock().unwrap().tag_name.clone()
    }

    /// Set the `id` attribute.
    pub fn set_id(&self, id: &str) {
        self.set_attribute("id", id);
    }

    /// Set an attribute, replacing its previous value.
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0.lock().unwrap().attributes.insert(name.to_owned(), value.to_owned());
    }

    /// The value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.lock().unwrap().attributes.get(name).cloned()
    }

    /// Set an inline style property, replacing its previous value.
    pub fn set_style_property(&self, property: &str, value: &str) {
        let mut node = self.0.lock().unwrap();
        match node.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_owned(),
            None => node.style.push((property.to_owned(), value.to_owned())),
        }
    }

    /// The value of an inline style property.
    pub fn style_property(&self, property: &str) -> Option<String> {
        let node = self.0.lock().unwrap();
        node.style.iter().find(|(p, _)| p == property).map(|(_, v)| v.clone())
    }

    /// Every inline style property, in the order they were first set.
    pub fn style(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().style.clone()
    }

    /// The children of the element.
    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.lock().unwrap().children.clone()
    }

    /// The parent of the element, if it is attached to one.
    pub fn parent(&self) -> Option<MemoryElement> {
        let node = self.0.lock().unwrap();
        node.parent.as_ref().and_then(Weak::upgrade).map(MemoryElement)
    }

    /// Append `child` as the last child, moving it out of its current parent.
    pub fn append(&self, child: &MemoryElement) {
        if let Some(parent) = child.parent() {
            parent.remove(child);
        }

        child.0.lock().unwrap().parent = Some(Arc::downgrade(&self.0));
        self.0.lock().unwrap().children.push(child.clone());
    }

    /// Remove `child`. Returns `false` if it wasn't a child of this element.
    pub fn remove(&self, child: &MemoryElement) -> bool {
        let removed = {
            let mut node = self.0.lock().unwrap();
            let len = node.children.len();
            node.children.retain(|c| !c.ptr_eq(child));
            node.children.len() != len
        };

        if removed {
            child.0.lock().unwrap().parent = None;
        }

        removed
    }

    /// Whether `other` is this element or one of its descendants.
    pub fn contains(&self, other: &MemoryElement) -> bool {
        let mut current = Some(other.clone());

        while let Some(element) = current {
            if element.ptr_eq(self) {
                return true;
            }
            current = element.parent();
        }

        false
    }

    fn matches(&self, selector: &SimpleSelector<'_>) -> bool {
        let node = self.0.lock().unwrap();

        match selector {
            SimpleSelector::Id(id) => node.attributes.get("id").is_some_and(|v| v == id),
            SimpleSelector::Class(class) => node
                .attributes
                .get("class")
                .is_some_and(|v| v.split_whitespace().any(|c| c == *class)),
            SimpleSelector::Tag(tag) => node.tag_name.eq_ignore_ascii_case(tag),
        }
    }

    fn find(&self, selector: &SimpleSelector<'_>) -> Option<MemoryElement> {
        if self.matches(selector) {
            return Some(self.clone());
        }

        self.children().iter().find_map(|child| child.find(selector))
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.lock().unwrap();
        f.debug_struct("MemoryElement")
            .field("tag_name", &node.tag_name)
            .field("attributes", &node.attributes)
            .field("children", &node.children.len())
            .finish_non_exhaustive()
    }
}

/// A message posted to a [`MemoryWindow`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostedMessage {
    /// The serialized message.
    pub message: String,
    /// The origin the message was restricted to.
    pub target_origin: String,
}

/// The content window of an iframe [`MemoryElement`].
#[derive(Clone, Debug, Default)]
pub struct MemoryWindow {
    messages: Arc<Mutex<Vec<PostedMessage>>>,
}

impl MemoryWindow {
    /// Every message posted to this window so far.
    pub fn posted_messages(&self) -> Vec<PostedMessage> {
        self.messages.lock().unwrap().clone()
    }
}

enum SimpleSelector<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag(&'a str),
}

impl<'a> SimpleSelector<'a> {
    fn parse(selector: &'a str) -> Result<Self, DomError> {
        let invalid = || DomError::new(format!("'{selector}' is not a valid selector"));

        let selector = selector.trim();
        let parsed = if let Some(id) = selector.strip_prefix('#') {
            Self::Id(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            Self::Class(class)
        } else {
            Self::Tag(selector)
        };

        let (Self::Id(name) | Self::Class(name) | Self::Tag(name)) = parsed;
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(parsed)
        } else {
            Err(invalid())
        }
    }
}

impl Dom for MemoryDom {
    type Element = MemoryElement;
    type Frame = MemoryElement;
    type Window = MemoryWindow;

    fn query_selector(&self, selector: &str) -> Result<Option<MemoryElement>, DomError> {
        let selector = SimpleSelector::parse(selector)?;
        Ok(self.body.find(&selector))
    }

    fn create_frame(&self) -> Result<MemoryElement, DomError> {
        Ok(self.create_element("iframe"))
    }

    fn set_attribute(&self, frame: &MemoryElement, name: &str, value: &str) {
        frame.set_attribute(name, value);
    }

    fn set_style_property(&self, frame: &MemoryElement, property: &str, value: &str) {
        frame.set_style_property(property, value);
    }

    fn append_child(
        &self,
        container: &MemoryElement,
        frame: &MemoryElement,
    ) -> Result<(), DomError> {
        if frame.contains(container) {
            return Err(DomError::new("the new child is an ancestor of the parent"));
        }

        container.append(frame);
        Ok(())
    }

    fn contains(&self, container: &MemoryElement, frame: &MemoryElement) -> bool {
        container.contains(frame)
    }

    fn remove_child(
        &self,
        container: &MemoryElement,
        frame: &MemoryElement,
    ) -> Result<(), DomError> {
        if container.remove(frame) {
            Ok(())
        } else {
            Err(DomError::new("the node to be removed is not a child of this node"))
        }
    }

    fn content_window(&self, frame: &MemoryElement) -> Option<MemoryWindow> {
        // Only frames connected to the document have a browsing context.
        if frame.tag_name() != "iframe" || !self.body.contains(frame) {
            return None;
        }

        Some(frame.0.lock().unwrap().window.clone())
    }

    fn post_message(
        &self,
        window: &MemoryWindow,
        message: &str,
        target_origin: &str,
    ) -> Result<(), DomError> {
        window.messages.lock().unwrap().push(PostedMessage {
            message: message.to_owned(),
            target_origin: target_origin.to_owned(),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryDom;
    use crate::dom::Dom;

    #[test]
    fn test_query_selector() {
        let dom = MemoryDom::new();
        let outer = dom.create_element("section");
        outer.set_attribute("class", "card wide");
        let inner = dom.create_element("DIV");
        inner.set_id("widget");
        outer.append(&inner);
        dom.body().append(&outer);

        assert!(dom.query_selector("#widget").unwrap().unwrap().ptr_eq(&inner));
        assert!(dom.query_selector(".wide").unwrap().unwrap().ptr_eq(&outer));
        assert!(dom.query_selector("div").unwrap().unwrap().ptr_eq(&inner));
        assert!(dom.query_selector("#other").unwrap().is_none());

        for selector in ["#", "div > p", "a,b", "[id=widget]"] {
            assert!(dom.query_selector(selector).is_err(), "{selector}");
        }
    }

    #[test]
    fn test_frame_window_only_exists_while_attached() {
        let dom = MemoryDom::new();
        let frame = dom.create_frame().unwrap();
        assert!(dom.content_window(&frame).is_none());

        dom.append_child(dom.body(), &frame).unwrap();
        assert!(dom.contains(dom.body(), &frame));
        let window = dom.content_window(&frame).unwrap();

        dom.post_message(&window, "hello", "https://example.org").unwrap();
        assert_eq!(window.posted_messages()[0].message, "hello");

        dom.remove_child(dom.body(), &frame).unwrap();
        assert!(!dom.contains(dom.body(), &frame));
        assert!(dom.content_window(&frame).is_none());
        assert!(dom.remove_child(dom.body(), &frame).is_err());
    }

    #[test]
    fn test_frame_in_detached_container_has_no_window() {
        let dom = MemoryDom::new();
        let container = dom.create_element("div");
        let frame = dom.create_frame().unwrap();

        dom.append_child(&container, &frame).unwrap();
        assert!(dom.content_window(&frame).is_none());

        dom.body().append(&container);
        assert!(dom.content_window(&frame).is_some());

        dom.body().remove(&container);
        assert!(dom.content_window(&frame).is_none());
    }

    #[test]
    fn test_style_properties_are_replaced() {
        let dom = MemoryDom::new();
        let frame = dom.create_frame().unwrap();

        dom.set_style_property(&frame, "border", "none");
        dom.set_style_property(&frame, "height", "100%");
        dom.set_style_property(&frame, "border", "1px solid");

        let style: Vec<_> = frame.style().into_iter().map(|(p, v)| format!("{p}: {v}")).collect();
        assert_eq!(style, ["border: 1px solid", "height: 100%"]);
        assert_eq!(frame.style_property("height").as_deref(), Some("100%"));
    }
}
