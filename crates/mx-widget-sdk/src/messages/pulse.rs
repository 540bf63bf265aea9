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
    /// Messages specific to the Pulse widgets.
    pub enum PulseEvent => PulseCallbacks {
        /// The user asked to move money to cover a predicted overdraft.
        "mx/pulse/overdraftWarning/cta/transferFunds" => OverdraftWarningCtaTransferFunds(OverdraftWarningCtaTransferFunds) as on_overdraft_warning_cta_transfer_funds,
    }
}

/// Metadata of `mx/pulse/overdraftWarning/cta/transferFunds`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverdraftWarningCtaTransferFunds {
    pub user_guid: String,
    pub session_guid: String,
    pub account_guid: String,
    pub amount: f64,
}
