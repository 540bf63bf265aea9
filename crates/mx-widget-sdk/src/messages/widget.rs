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

// Metadata fields are named after their wire keys.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

post_message_events! {
    /// Messages every widget kind may send.
    pub enum WidgetEvent => WidgetCallbacks {
        /// The widget finished loading.
        "mx/load" => Load(Load) as on_load,
        /// Periodic keep-alive of the widget session.
        "mx/ping" => Ping(Ping) as on_ping,
        /// Keyboard focus entered or left a focus trap of the widget.
        "mx/focusTrap" => FocusTrap(FocusTrap) as on_focus_trap,
        /// The widget navigated, possibly as an answer to `navigate_back`.
        "mx/navigation" => Navigation(Navigation) as on_navigation,
        /// An OAuth flow opened by the widget completed.
        "mx/client/oauthComplete" => OAuthComplete(OAuthComplete) as on_oauth_complete,
    }
}

/// Metadata of `mx/load`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Load {}

/// Metadata of `mx/ping`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    pub user_guid: String,
    pub session_guid: String,
}

/// Metadata of `mx/focusTrap`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusTrap {
    pub user_guid: String,
    pub session_guid: String,
    /// Either `"on"` or `"off"`.
    pub state: String,
}

/// Metadata of `mx/navigation`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    #[serde(default)]
    pub user_guid: Option<String>,
    #[serde(default)]
    pub session_guid: Option<String>,
    /// Whether the widget could go back, `false` if it didn't say.
    #[serde(default)]
    pub did_go_back: bool,
}

/// Metadata of `mx/client/oauthComplete`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OAuthComplete {
    pub url: String,
}
