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

//! Resolution of the URL a widget frame navigates to.
//!
//! Three mutually exclusive strategies exist, picked by
//! [`LoadingProps::configuration`]: a literal URL is used unchanged, while the
//! proxy and Platform API strategies ask an [`SsoBackend`] for a single sign-on
//! token and build the canonical widget URL out of it.

use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::{ApiConfig, LoadingProps, ProxyConfig, SsoConfig, WidgetConfiguration},
    messages::JsonObject,
    AsyncTraitDeps, ResolverError, WidgetType,
};

mod http;

pub use self::http::HttpSsoBackend;

/// The service handing out SSO tokens for widgets.
///
/// Failures are reported as they are, nothing is retried.
#[cfg_attr(target_family = "wasm", async_trait(?Send))]
#[cfg_attr(not(target_family = "wasm"), async_trait)]
pub trait SsoBackend: AsyncTraitDeps {
    /// Ask the SSO proxy of the embedding application for a token.
    async fn proxy_token(
        &self,
        config: &ProxyConfig,
        widget_type: WidgetType,
        params: &JsonObject,
    ) -> Result<String, ResolverError>;

    /// Ask the Platform API for a token, on behalf of `config.user_guid`.
    async fn api_token(
        &self,
        config: &ApiConfig,
        widget_type: WidgetType,
        params: &JsonObject,
    ) -> Result<String, ResolverError>;

    /// Build the widget URL for a token.
    fn widget_url(&self, widget_type: WidgetType, token: &str) -> Result<Url, ResolverError> {
        Ok(SsoConfig::default().widget_url(widget_type, token)?)
    }
}

/// Produce the URL a widget of type `widget_type` should navigate to.
///
/// Exactly one strategy runs per call. Fails with
/// [`ResolverError::MissingConfiguration`] when no loading props are usable.
#[instrument(skip_all, fields(widget_type = %widget_type))]
pub async fn resolve_url(
    backend: &dyn SsoBackend,
    loading: &LoadingProps,
    params: &JsonObject,
    widget_type: WidgetType,
) -> Result<String, ResolverError> {
    let token = match loading.configuration()? {
        WidgetConfiguration::Url(config) => {
            debug!("Using the widget URL as is");
            return Ok(config.url);
        }
        WidgetConfiguration::Proxy(config) => {
            debug!(proxy = %config.proxy, "Requesting an SSO token from the proxy");
            backend.proxy_token(&config, widget_type, params).await?
        }
        WidgetConfiguration::Api(config) => {
            debug!(user_guid = %config.user_guid, "Requesting an SSO token from the API");
            backend.api_token(&config, widget_type, params).await?
        }
    };

    if token.trim().is_empty() {
        return Err(ResolverError::EmptyToken);
    }

    Ok(backend.widget_url(widget_type, &token)?.into())
}
