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

use std::{fmt, time::Duration};

use url::Url;

use crate::WidgetType;

const DEFAULT_WIDGET_HOST: &str = "moneydesktop.com";

/// Configuration of the HTTP SSO backend.
///
/// By default widget URLs point at `widgets.moneydesktop.com` and requests
/// have no timeout: the widget never gives up on a resolution by itself.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use mx_widget_sdk::SsoConfig;
///
/// let config = SsoConfig::new().widget_host("example.com").timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct SsoConfig {
    pub(crate) widget_host: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: Option<String>,
}

impl Default for SsoConfig {
    fn default() -> Self {
        Self { widget_host: DEFAULT_WIDGET_HOST.to_owned(), timeout: None, user_agent: None }
    }
}

impl fmt::Debug for SsoConfig {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { widget_host, timeout, user_agent } = self;

        let mut res = fmt.debug_struct("SsoConfig");
        res.field("widget_host", widget_host);

        if let Some(timeout) = timeout {
            res.field("timeout", timeout);
        }
        if let Some(user_agent) = user_agent {
            res.field("user_agent", user_agent);
        }

        res.finish()
    }
}

impl SsoConfig {
    /// Create a new default `SsoConfig`.
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the host the widgets are served from, without the `widgets.`
    /// prefix.
    #[must_use]
    pub fn widget_host(mut self, host: impl Into<String>) -> Self {
        self.widget_host = host.into();
        self
    }

    /// Give up on SSO requests that take longer than `timeout`.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header of SSO requests.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the canonical widget URL,
    /// `https://widgets.<host>/md/<widget type>/<token>`.
    ///
    /// The token always ends up in a single path segment, whatever it
    /// contains.
    pub(crate) fn widget_url(
        &self,
        widget_type: WidgetType,
        token: &str,
    ) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("https://widgets.{}/", self.widget_host))?;

        // An https URL always has a path.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push("md").push(widget_type.as_str()).push(token);
        }

        Ok(url)
    }
}
