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

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_debug_implementations, missing_docs)]

pub mod channel;
pub mod config;
mod dispatch;
pub mod dom;
mod error;
pub mod executor;
mod frame;
mod kind;
pub mod memory;
pub mod messages;
pub mod sso;
#[cfg(all(target_family = "wasm", feature = "js"))]
pub mod web;
mod widget;

pub use self::{
    channel::{MessageBus, MessageChannel, MessageEvent, SubscriptionHandle},
    config::{Environment, LoadingProps, SsoConfig, Style, WidgetConfiguration, WidgetOptions},
    dispatch::Dispatcher,
    dom::{Container, Dom},
    error::{DomError, Error, ResolverError, Result},
    frame::FrameState,
    kind::{WidgetKind, WidgetType},
    sso::{HttpSsoBackend, SsoBackend},
    widget::{NavigateBack, ResolutionOutcome, Widget, WidgetHost},
};

/// The host origin used as the `postMessage` target when it can't be derived
/// from the widget configuration.
pub const DEFAULT_WIDGET_ORIGIN: &str = "https://widgets.moneydesktop.com";

/// Alias for `Send` on non-wasm, empty trait (implemented by everything) on
/// wasm.
#[cfg(not(target_family = "wasm"))]
pub trait SendOutsideWasm: Send {}
#[cfg(not(target_family = "wasm"))]
impl<T: Send> SendOutsideWasm for T {}

/// Alias for `Send` on non-wasm, empty trait (implemented by everything) on
/// wasm.
#[cfg(target_family = "wasm")]
pub trait SendOutsideWasm {}
#[cfg(target_family = "wasm")]
impl<T> SendOutsideWasm for T {}

/// Alias for `Sync` on non-wasm, empty trait (implemented by everything) on
/// wasm.
#[cfg(not(target_family = "wasm"))]
pub trait SyncOutsideWasm: Sync {}
#[cfg(not(target_family = "wasm"))]
impl<T: Sync> SyncOutsideWasm for T {}

/// Alias for `Sync` on non-wasm, empty trait (implemented by everything) on
/// wasm.
#[cfg(target_family = "wasm")]
pub trait SyncOutsideWasm {}
#[cfg(target_family = "wasm")]
impl<T> SyncOutsideWasm for T {}

/// Super trait that is used for the host backends, this trait will differ if
/// it's used on wasm. Wasm targets will not require `Send` and `Sync` to have
/// implemented, while other targets will.
pub trait AsyncTraitDeps: std::fmt::Debug + SendOutsideWasm + SyncOutsideWasm {}
impl<T: std::fmt::Debug + SendOutsideWasm + SyncOutsideWasm> AsyncTraitDeps for T {}
