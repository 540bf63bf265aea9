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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::ResolverError;

/// The Platform API an [`ApiConfig`] authenticates against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    /// `https://api.mx.com`
    Production,
    /// `https://int-api.mx.com`
    Integration,
    /// Any other deployment of the Platform API.
    Custom(Url),
}

impl Environment {
    /// The base URL of the Platform API of this environment.
    pub fn api_base_url(&self) -> Url {
        match self {
            Self::Production => Url::parse("https://api.mx.com").expect("valid static URL"),
            Self::Integration => Url::parse("https://int-api.mx.com").expect("valid static URL"),
            Self::Custom(url) => url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "production" => Ok(Self::Production),
            "integration" | "sandbox" | "development" => Ok(Self::Integration),
            other => Ok(Self::Custom(Url::parse(other)?)),
        }
    }
}

impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The raw loading props of a widget, as given by the caller.
///
/// Any combination may be set, [`LoadingProps::configuration`] picks the one
/// that is used.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingProps {
    /// A ready-made widget URL.
    #[serde(default)]
    pub url: Option<String>,
    /// An SSO proxy endpoint of the embedding application.
    #[serde(default)]
    pub proxy: Option<String>,
    /// Platform API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Platform API client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// The user the widget is opened for.
    #[serde(default)]
    pub user_guid: Option<String>,
    /// The Platform API environment.
    #[serde(default)]
    pub environment: Option<Environment>,
}

impl LoadingProps {
    /// Select the loading strategy.
    ///
    /// A literal `url` wins over a `proxy`, which wins over API credentials.
    /// API credentials are only usable when all four of them are present.
    pub fn configuration(&self) -> Result<WidgetConfiguration, ResolverError> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        if let Some(url) = present(&self.url) {
            return Ok(WidgetConfiguration::Url(UrlConfig { url: url.to_owned() }));
        }

        if let Some(proxy) = present(&self.proxy) {
            return Ok(WidgetConfiguration::Proxy(ProxyConfig { proxy: Url::parse(proxy)? }));
        }

        match (
            present(&self.api_key),
            present(&self.client_id),
            present(&self.user_guid),
            &self.environment,
        ) {
            (Some(api_key), Some(client_id), Some(user_guid), Some(environment)) => {
                Ok(WidgetConfiguration::Api(ApiConfig {
                    api_key: api_key.to_owned(),
                    client_id: client_id.to_owned(),
                    user_guid: user_guid.to_owned(),
                    environment: environment.clone(),
                }))
            }
            _ => Err(ResolverError::MissingConfiguration),
        }
    }
}

impl fmt::Debug for LoadingProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingProps")
            .field("url", &self.url)
            .field("proxy", &self.proxy)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("client_id", &self.client_id)
            .field("user_guid", &self.user_guid)
            .field("environment", &self.environment)
            .finish()
    }
}

/// How the widget URL is obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetConfiguration {
    /// The URL is given verbatim.
    Url(UrlConfig),
    /// An SSO proxy hands out the token.
    Proxy(ProxyConfig),
    /// The token is requested from the Platform API directly.
    Api(ApiConfig),
}

/// Load a literal widget URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlConfig {
    /// The widget URL, used unchanged.
    pub url: String,
}

/// Get the SSO token from a proxy of the embedding application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyConfig {
    /// The proxy endpoint.
    pub proxy: Url,
}

/// Get the SSO token from the Platform API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Platform API key.
    pub api_key: String,
    /// Platform API client id.
    pub client_id: String,
    /// The user the widget is opened for.
    pub user_guid: String,
    /// Where the Platform API lives.
    pub environment: Environment,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("client_id", &self.client_id)
            .field("user_guid", &self.user_guid)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

/// What the Connect widget is opened for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectMode {
    /// Aggregate accounts and transactions.
    Aggregation,
    /// Verify account and routing numbers.
    Verification,
}

/// Color scheme the widget renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

/// Settings forwarded to the SSO backend when a Connect widget is requested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectConfiguration {
    /// Aggregation or verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ConnectMode>,
    /// Open the widget on this institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_institution_code: Option<String>,
    /// Open the widget on this existing member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_member_guid: Option<String>,
    /// Hide the institution search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_institution_search: Option<bool>,
    /// Fetch transactions when verifying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_transactions: Option<bool>,
    /// Open the credentials form of `current_member_guid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_credentials: Option<bool>,
    /// The color scheme, light by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
}

#[cfg(test)]
mod tests {
    use assert_matches2::{assert_let, assert_matches};
    use serde_json::json;
    use url::Url;

    use super::{Environment, LoadingProps, WidgetConfiguration};
    use crate::ResolverError;

    fn api_props() -> LoadingProps {
        LoadingProps {
            api_key: Some("myveryownapikey".to_owned()),
            client_id: Some("myveryownclientid".to_owned()),
            user_guid: Some("USR-777".to_owned()),
            environment: Some(Environment::Production),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_wins_over_proxy_and_api() {
        let props = LoadingProps {
            url: Some("https://widgets.moneydesktop.com/md/hi/tok".to_owned()),
            proxy: Some("https://client.com/mx-sso-proxy".to_owned()),
            ..api_props()
        };

        assert_let!(Ok(WidgetConfiguration::Url(config)) = props.configuration());
        assert_eq!(config.url, "https://widgets.moneydesktop.com/md/hi/tok");
    }

    #[test]
    fn test_proxy_wins_over_api() {
        let proxy = Some("https://client.com/mx-sso-proxy".to_owned());
        let props = LoadingProps { proxy, ..api_props() };

        assert_let!(Ok(WidgetConfiguration::Proxy(config)) = props.configuration());
        assert_eq!(config.proxy.as_str(), "https://client.com/mx-sso-proxy");
    }

    #[test]
    fn test_api_needs_every_credential() {
        assert_matches!(api_props().configuration(), Ok(WidgetConfiguration::Api(_)));

        let props = LoadingProps { user_guid: None, ..api_props() };
        assert_matches!(props.configuration(), Err(ResolverError::MissingConfiguration));

        let props = LoadingProps { url: Some(String::new()), ..Default::default() };
        assert_matches!(props.configuration(), Err(ResolverError::MissingConfiguration));
    }

    #[test]
    fn test_debug_hides_the_api_key() {
        let props = api_props();
        assert!(!format!("{props:?}").contains("myveryownapikey"));

        assert_let!(Ok(WidgetConfiguration::Api(config)) = props.configuration());
        assert!(!format!("{config:?}").contains("myveryownapikey"));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Integration);
        assert_eq!(
            "http://localhost:8080".parse::<Environment>().unwrap(),
            Environment::Custom(Url::parse("http://localhost:8080").unwrap())
        );
        assert!("staging".parse::<Environment>().is_err());

        let props: LoadingProps = serde_json::from_value(json!({
            "apiKey": "key",
            "clientId": "client",
            "userGuid": "USR-1",
            "environment": "integration",
        }))
        .unwrap();
        assert_eq!(props.environment, Some(Environment::Integration));
        assert_eq!(
            props.environment.unwrap().api_base_url().as_str(),
            "https://int-api.mx.com/"
        );
    }
}
