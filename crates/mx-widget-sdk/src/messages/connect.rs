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
    /// Messages specific to the Connect widget.
    pub enum ConnectEvent => ConnectCallbacks {
        /// The widget loaded and shows its first step.
        "mx/connect/loaded" => Loaded(Loaded) as on_loaded,
        "mx/connect/enterCredentials" => EnterCredentials(EnterCredentials) as on_enter_credentials,
        "mx/connect/institutionSearch" => InstitutionSearch(InstitutionSearch) as on_institution_search,
        "mx/connect/selectedInstitution" => SelectedInstitution(SelectedInstitution) as on_selected_institution,
        /// A member was created or updated and successfully aggregated.
        "mx/connect/memberConnected" => MemberConnected(MemberConnected) as on_member_connected,
        "mx/connect/connectedPrimaryAction" => ConnectedPrimaryAction(ConnectedPrimaryAction) as on_connected_primary_action,
        "mx/connect/memberDeleted" => MemberDeleted(MemberDeleted) as on_member_deleted,
        "mx/connect/createMemberError" => CreateMemberError(CreateMemberError) as on_create_member_error,
        "mx/connect/memberStatusUpdate" => MemberStatusUpdate(MemberStatusUpdate) as on_member_status_update,
        "mx/connect/oauthError" => OAuthError(OAuthError) as on_oauth_error,
        /// The host has to open `url` for the user to authenticate.
        "mx/connect/oauthRequested" => OAuthRequested(OAuthRequested) as on_oauth_requested,
        "mx/connect/stepChange" => StepChange(StepChange) as on_step_change,
        "mx/connect/submitMFA" => SubmitMfa(SubmitMfa) as on_submit_mfa,
        "mx/connect/updateCredentials" => UpdateCredentials(UpdateCredentials) as on_update_credentials,
        "mx/connect/backToSearch" => BackToSearch(BackToSearch) as on_back_to_search,
        "mx/connect/invalidData" => InvalidData(InvalidData) as on_invalid_data,
    }
}

/// An institution, as referenced by Connect messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub code: String,
    pub guid: String,
}

/// Metadata of `mx/connect/loaded`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loaded {
    pub user_guid: String,
    pub session_guid: String,
    /// The step the widget opened on, e.g. `search` or `mfa`.
    pub initial_step: String,
}

/// Metadata of `mx/connect/enterCredentials`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnterCredentials {
    pub user_guid: String,
    pub session_guid: String,
    pub institution: Institution,
}

/// Metadata of `mx/connect/institutionSearch`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstitutionSearch {
    pub user_guid: String,
    pub session_guid: String,
    pub query: String,
}

/// Metadata of `mx/connect/selectedInstitution`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedInstitution {
    pub user_guid: String,
    pub session_guid: String,
    pub code: String,
    pub guid: String,
    pub name: String,
    pub url: String,
}

/// Metadata of `mx/connect/memberConnected`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberConnected {
    pub user_guid: String,
    pub session_guid: String,
    pub member_guid: String,
}

/// Metadata of `mx/connect/connectedPrimaryAction`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectedPrimaryAction {
    pub user_guid: String,
    pub session_guid: String,
}

/// Metadata of `mx/connect/memberDeleted`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberDeleted {
    pub user_guid: String,
    pub session_guid: String,
    pub member_guid: String,
}

/// Metadata of `mx/connect/createMemberError`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberError {
    pub user_guid: String,
    pub session_guid: String,
    pub institution_guid: String,
    pub institution_code: String,
}

/// Metadata of `mx/connect/memberStatusUpdate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberStatusUpdate {
    pub user_guid: String,
    pub session_guid: String,
    pub member_guid: String,
    /// Numeric connection status of the member.
    pub connection_status: u32,
}

/// Metadata of `mx/connect/oauthError`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OAuthError {
    pub user_guid: String,
    pub session_guid: String,
    pub member_guid: String,
}

/// Metadata of `mx/connect/oauthRequested`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OAuthRequested {
    pub user_guid: String,
    pub session_guid: String,
    pub url: String,
    pub member_guid: String,
}

/// Metadata of `mx/connect/stepChange`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepChange {
    pub user_guid: String,
    pub session_guid: String,
    pub previous: String,
    pub current: String,
}

/// Metadata of `mx/connect/submitMFA`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitMfa {
    pub user_guid: String,
    pub session_guid: String,
    pub member_guid: String,
}

/// Metadata of `mx/connect/updateCredentials`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateCredentials {
    pub user_guid: String,
    pub session_guid: String,
    pub member_guid: String,
    pub institution: Institution,
}

/// Metadata of `mx/connect/backToSearch`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackToSearch {
    pub user_guid: String,
    pub session_guid: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// Metadata of `mx/connect/invalidData`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvalidData {
    pub user_guid: String,
    pub session_guid: String,
    pub member_guid: String,
    pub code: u32,
}
