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

//! The closed catalogue of widget kinds.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{dispatch::Dispatcher, Error};

/// The tag of a widget kind, e.g. `connect_widget`.
///
/// It names the widget towards the SSO backend and is embedded in the widget
/// URL path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetType(&'static str);

impl WidgetType {
    /// The tag as a string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for WidgetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

macro_rules! widget_kinds {
    ($( $(#[$meta:meta])* $variant:ident => $tag:literal, $dispatcher:ident; )*) => {
        /// The kinds of widgets that can be embedded.
        ///
        /// Each kind fixes the widget type sent to the SSO backend and the
        /// dispatcher that turns its post messages into callbacks.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum WidgetKind {
            $( $(#[$meta])* $variant, )*
        }

        impl WidgetKind {
            /// Every widget kind, in catalogue order.
            pub const ALL: &'static [WidgetKind] = &[$( WidgetKind::$variant, )*];

            /// The widget type tag of this kind.
            pub fn widget_type(&self) -> WidgetType {
                match self {
                    $( Self::$variant => WidgetType($tag), )*
                }
            }

            /// The dispatcher strategy used for messages of this kind.
            pub fn dispatcher(&self) -> Dispatcher {
                match self {
                    $( Self::$variant => Dispatcher::$dispatcher, )*
                }
            }
        }

        impl FromStr for WidgetKind {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    "" => Err(Error::MissingWidgetType),
                    $( $tag => Ok(Self::$variant), )*
                    other => Err(Error::UnknownWidgetType(other.to_owned())),
                }
            }
        }
    };
}

widget_kinds! {
    Accounts => "accounts_widget", Widget;
    Budgets => "budgets_widget", Widget;
    /// Lets users connect their financial institutions.
    Connect => "connect_widget", Connect;
    Connections => "connections_widget", Widget;
    Debts => "debts_widget", Widget;
    Finstrong => "finstrong_widget", Widget;
    Goals => "goals_widget", Widget;
    Help => "help_widget", Widget;
    /// The full money management experience in a single widget.
    Master => "master_widget", Widget;
    MiniBudgets => "mini_budgets_widget", Widget;
    MiniFinstrong => "mini_finstrong_widget", Widget;
    MiniPulseCarousel => "mini_pulse_carousel_widget", Pulse;
    MiniSpending => "mini_spending_widget", Widget;
    Pulse => "pulse_widget", Pulse;
    Settings => "settings_widget", Widget;
    Spending => "spending_widget", Widget;
    Transactions => "transactions_widget", Widget;
    Trends => "trends_widget", Widget;
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.widget_type().fmt(f)
    }
}

impl Serialize for WidgetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.widget_type().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WidgetKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
