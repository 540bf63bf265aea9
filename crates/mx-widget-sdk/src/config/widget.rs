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

use std::mem;

use serde_json::Value as JsonValue;

use super::{ConnectConfiguration, Environment, LoadingProps};
use crate::{
    dispatch::Callbacks,
    dom::Container,
    messages::{
        BackToSearch, ConnectedPrimaryAction, CreateMemberError, EnterCredentials, FocusTrap,
        InstitutionSearch, InvalidData, JsonObject, Load, Loaded, MemberConnected, MemberDeleted,
        MemberStatusUpdate, Navigation, OAuthComplete, OAuthError, OAuthRequested,
        OverdraftWarningCtaTransferFunds, Ping, SelectedInstitution, StepChange, SubmitMfa,
        UpdateCredentials,
    },
    SendOutsideWasm, SyncOutsideWasm,
};

/// Inline style of the widget frame, as CSS property/value pairs.
///
/// The default makes the frame fill its container without a border.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Style(Vec<(String, String)>);

impl Style {
    /// An empty style.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set a CSS property, replacing a previous value of the same property.
    #[must_use]
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();

        match self.0.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.0.push((property, value)),
        }

        self
    }

    /// Iterate over the property/value pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new().set("border", "none").set("height", "100%").set("width", "100%")
    }
}

/// Everything a [`Widget`](crate::Widget) is constructed from.
///
/// Exactly one set of loading props should be given: a [`url`](Self::url), a
/// [`proxy`](Self::proxy) or the Platform API credentials
/// ([`api`](Self::api)). A widget without any still constructs, it just never
/// mounts.
///
/// # Examples
///
/// ```
/// use mx_widget_sdk::{Environment, WidgetOptions};
/// # use mx_widget_sdk::memory::MemoryElement;
///
/// let options = WidgetOptions::<MemoryElement>::new("#widget")
///     .api("api-key", "client-id", "USR-123", Environment::Production)
///     .iframe_title("Connect your accounts")
///     .on_load(|_| println!("the widget loaded"));
/// ```
#[derive(Debug)]
pub struct WidgetOptions<E> {
    pub(crate) container: Container<E>,
    pub(crate) iframe_title: Option<String>,
    pub(crate) style: Option<Style>,
    pub(crate) loading: LoadingProps,
    pub(crate) params: JsonObject,
    pub(crate) callbacks: Callbacks,
}

macro_rules! callback_setters {
    ($group:ident { $( $setter:ident($payload:ty), )* }) => {
        $(
            #[doc = concat!("Set the `", stringify!($setter), "` callback.")]
            #[must_use]
            pub fn $setter<F>(mut self, callback: F) -> Self
            where
                F: Fn(&$payload) + SendOutsideWasm + SyncOutsideWasm + 'static,
            {
                self.callbacks.$group = mem::take(&mut self.callbacks.$group).$setter(callback);
                self
            }
        )*
    };
}

impl<E> WidgetOptions<E> {
    /// Create options for a widget mounted in `container`.
    pub fn new(container: impl Into<Container<E>>) -> Self {
        Self {
            container: container.into(),
            iframe_title: None,
            style: None,
            loading: LoadingProps::default(),
            params: JsonObject::new(),
            callbacks: Callbacks::default(),
        }
    }

    /// Create options for a widget mounted in the given element.
    pub fn with_element(element: E) -> Self {
        Self::new(Container::Element(element))
    }

    /// Load the given widget URL as is.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.loading.url = Some(url.into());
        self
    }

    /// Get the SSO token from the given proxy endpoint.
    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.loading.proxy = Some(proxy.into());
        self
    }

    /// Get the SSO token from the Platform API.
    #[must_use]
    pub fn api(
        mut self,
        api_key: impl Into<String>,
        client_id: impl Into<String>,
        user_guid: impl Into<String>,
        environment: Environment,
    ) -> Self {
        self.loading.api_key = Some(api_key.into());
        self.loading.client_id = Some(client_id.into());
        self.loading.user_guid = Some(user_guid.into());
        self.loading.environment = Some(environment);
        self
    }

    /// Replace all the loading props at once.
    #[must_use]
    pub fn loading_props(mut self, loading: LoadingProps) -> Self {
        self.loading = loading;
        self
    }

    /// Set the `title` attribute of the frame, `"Widget Iframe"` by default.
    #[must_use]
    pub fn iframe_title(mut self, title: impl Into<String>) -> Self {
        self.iframe_title = Some(title.into());
        self
    }

    /// Replace the default inline style of the frame.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Forward an extra parameter to the SSO backend.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Forward Connect settings to the SSO backend.
    #[must_use]
    pub fn connect_configuration(mut self, configuration: ConnectConfiguration) -> Self {
        if let Ok(JsonValue::Object(params)) = serde_json::to_value(configuration) {
            self.params.extend(params);
        }
        self
    }

    callback_setters!(widget {
        on_load(Load),
        on_ping(Ping),
        on_focus_trap(FocusTrap),
        on_navigation(Navigation),
        on_oauth_complete(OAuthComplete),
    });

    callback_setters!(connect {
        on_loaded(Loaded),
        on_enter_credentials(EnterCredentials),
        on_institution_search(InstitutionSearch),
        on_selected_institution(SelectedInstitution),
        on_member_connected(MemberConnected),
        on_connected_primary_action(ConnectedPrimaryAction),
        on_member_deleted(MemberDeleted),
        on_create_member_error(CreateMemberError),
        on_member_status_update(MemberStatusUpdate),
        on_oauth_error(OAuthError),
        on_oauth_requested(OAuthRequested),
        on_step_change(StepChange),
        on_submit_mfa(SubmitMfa),
        on_update_credentials(UpdateCredentials),
        on_back_to_search(BackToSearch),
        on_invalid_data(InvalidData),
    });

    callback_setters!(pulse {
        on_overdraft_warning_cta_transfer_funds(OverdraftWarningCtaTransferFunds),
    });
}
