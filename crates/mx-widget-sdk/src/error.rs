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

use std::{borrow::Cow, result::Result as StdResult};

use thiserror::Error as ThisError;

/// Result type of the widget API.
pub type Result<T, E = Error> = StdResult<T, E>;

/// Errors surfaced synchronously by the widget API.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The container selector did not match any element.
    #[error(
        "Unable to find widget container. Ensure that an element matching a selector for \
         '{0}' is available in the DOM before you initialize the widget."
    )]
    ContainerNotFound(String),

    /// The container is neither a usable selector nor an element.
    #[error(
        "Invalid or missing value for container property, expecting a query selector string \
         or a DOM Element: {0}"
    )]
    InvalidContainer(String),

    /// No widget type was given where one was expected.
    #[error("Missing value for widgetType property, expecting a string (eg. connect_widget).")]
    MissingWidgetType,

    /// The widget type tag is not part of the catalogue.
    #[error("Unknown widget type '{0}'")]
    UnknownWidgetType(String),

    /// `navigate_back` was called while the frame has no content window.
    #[error("Unable to navigate back, iframe element is not available.")]
    NavigationUnavailable,

    /// The message channel went away before the widget answered.
    #[error("The message channel was closed before the widget replied")]
    ChannelClosed,

    /// The host DOM rejected an operation.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// An outgoing message couldn't be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors of the SSO URL resolution step.
///
/// These never reach the caller of [`Widget::new`](crate::Widget::new), they
/// are reported through [`Widget::settled`](crate::Widget::settled) instead.
#[derive(Debug, ThisError)]
pub enum ResolverError {
    /// None of the `url`, `proxy` or API credential props were provided.
    #[error(
        "Missing widget loading props, expecting one of `url`, `proxy` or \
         `apiKey`/`clientId`/`userGuid`/`environment`"
    )]
    MissingConfiguration,

    /// The HTTP request to the SSO backend failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The SSO backend answered with a non-success status.
    #[error("The SSO backend rejected the request with status {status}: {body}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The response body, as text.
        body: String,
    },

    /// The SSO backend answered without a token.
    #[error("The SSO backend returned an empty token")]
    EmptyToken,

    /// A URL couldn't be built or parsed.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// An operation on the host DOM failed.
#[derive(Clone, Debug, ThisError)]
#[error("{0}")]
pub struct DomError(Cow<'static, str>);

impl DomError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self(message.into())
    }

    /// Create an error from the `Debug` representation of a host value, e.g.
    /// a `JsValue` thrown by the browser.
    pub fn from_debug(value: impl std::fmt::Debug) -> Self {
        Self(format!("{value:?}").into())
    }
}
