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

// The http mocking library is not supported for wasm32
#![cfg(not(target_family = "wasm"))]

use std::sync::Arc;

use mx_widget_sdk::{
    memory::{MemoryDom, MemoryElement},
    HttpSsoBackend, MessageBus, SsoConfig, WidgetHost,
};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

mod api;
mod literal_url;
mod messaging;
mod proxy;

const TOKEN: &str = "$ssotoken$";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A page with a `#widget` container, a message bus and an SSO backend
/// talking to a mock server.
struct TestPage {
    dom: Arc<MemoryDom>,
    container: MemoryElement,
    bus: MessageBus,
    server: MockServer,
    host: WidgetHost<MemoryDom>,
}

impl TestPage {
    async fn new() -> Self {
        init_tracing();

        let server = MockServer::start().await;
        let dom = Arc::new(MemoryDom::new());
        let container = dom.create_element("div");
        container.set_id("widget");
        dom.body().append(&container);

        let bus = MessageBus::new();
        let sso = HttpSsoBackend::new(SsoConfig::new()).unwrap();
        let host = WidgetHost::new(dom.clone(), Arc::new(bus.clone()), Arc::new(sso));

        Self { dom, container, bus, server, host }
    }

    fn proxy_url(&self) -> String {
        format!("{}/mx-sso-proxy", self.server.uri())
    }

    /// The `src` of every frame in the container.
    fn frame_sources(&self) -> Vec<Option<String>> {
        self.container.children().iter().map(|frame| frame.attribute("src")).collect()
    }
}

/// Answer every proxy request with [`TOKEN`].
async fn mock_proxy(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/mx-sso-proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
        .mount(server)
        .await;
}
