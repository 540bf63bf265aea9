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

use assert_matches2::{assert_let, assert_matches};
use mx_widget_sdk::{
    FrameState, ResolutionOutcome, ResolverError, Widget, WidgetKind, WidgetOptions,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

use crate::{mock_proxy, TestPage, TOKEN};

#[tokio::test]
async fn test_proxy_url_for_every_kind() {
    let page = TestPage::new().await;
    mock_proxy(&page.server).await;

    for kind in WidgetKind::ALL {
        let options = WidgetOptions::new("#widget").proxy(page.proxy_url());
        let widget = Widget::new(*kind, options, page.host.clone()).unwrap();

        let expected =
            format!("https://widgets.moneydesktop.com/md/{}/{TOKEN}", kind.widget_type());
        assert_let!(ResolutionOutcome::Mounted(url) = widget.settled().await);
        assert_eq!(url, expected);
        assert_eq!(page.frame_sources(), [Some(expected)]);

        widget.unmount().unwrap();
        assert!(page.frame_sources().is_empty());
    }

    let requests = page.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), WidgetKind::ALL.len());
}

#[tokio::test]
async fn test_proxy_receives_the_forwarded_params() {
    let page = TestPage::new().await;

    Mock::given(method("POST"))
        .and(path("/mx-sso-proxy"))
        .and(body_json(json!({
            "widget_type": "connect_widget",
            "mode": "aggregation",
            "color_scheme": "dark",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
        .expect(1)
        .mount(&page.server)
        .await;

    let options = WidgetOptions::new("#widget")
        .proxy(page.proxy_url())
        .param("mode", "aggregation")
        .param("color_scheme", "dark");
    let widget = Widget::new(WidgetKind::Connect, options, page.host.clone()).unwrap();

    assert_matches!(widget.settled().await, ResolutionOutcome::Mounted(_));
}

#[tokio::test]
async fn test_proxy_failure_never_mounts() {
    let page = TestPage::new().await;

    Mock::given(method("POST"))
        .and(path("/mx-sso-proxy"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&page.server)
        .await;

    let options = WidgetOptions::new("#widget").proxy(page.proxy_url());
    let widget = Widget::new(WidgetKind::Pulse, options, page.host.clone()).unwrap();

    assert_let!(ResolutionOutcome::Failed(error) = widget.settled().await);
    assert_matches!(&*error, ResolverError::Rejected { status: 500, .. });
    assert_eq!(widget.frame_state(), FrameState::PendingUrl);
    assert!(page.frame_sources().is_empty());

    widget.unmount().unwrap();
    assert_eq!(widget.frame_state(), FrameState::Unmounted);
}
