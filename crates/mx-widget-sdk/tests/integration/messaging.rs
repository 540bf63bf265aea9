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

use std::sync::{Arc, Mutex};

use assert_matches2::assert_matches;
use mx_widget_sdk::{
    dom::Dom, messages::Ping, Error, MessageEvent, Widget, WidgetKind, WidgetOptions,
};
use serde_json::{json, Value as JsonValue};

use crate::{mock_proxy, TestPage};

#[tokio::test]
async fn test_connect_widget_messages() {
    let page = TestPage::new().await;
    mock_proxy(&page.server).await;

    let loaded = Arc::new(Mutex::new(Vec::new()));
    let pings = Arc::new(Mutex::new(Vec::<Ping>::new()));

    let options = WidgetOptions::new("#widget")
        .proxy(page.proxy_url())
        .on_loaded({
            let loaded = loaded.clone();
            move |event| loaded.lock().unwrap().push(event.clone())
        })
        .on_ping({
            let pings = pings.clone();
            move |ping| pings.lock().unwrap().push(ping.clone())
        });
    let widget = Widget::new(WidgetKind::Connect, options, page.host.clone()).unwrap();
    widget.settled().await;

    page.bus.dispatch(MessageEvent::new(json!({
        "mx": true,
        "type": "mx/connect/loaded",
        "metadata": { "user_guid": "USR-123", "session_guid": "SES-123", "initial_step": "search" },
    })));
    // Messages from other scripts on the page are left alone.
    page.bus.dispatch(MessageEvent::new(json!({ "type": "mx/connect/loaded" })));
    let ping = json!({
        "mx": true,
        "type": "mx/ping",
        "metadata": { "user_guid": "USR-1", "session_guid": "SES-1" },
    });
    // Only objects are envelopes, not their serialized form.
    page.bus.dispatch(MessageEvent::new(JsonValue::String(ping.to_string())));
    page.bus.dispatch(MessageEvent::new(ping));

    let loaded = loaded.lock().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].initial_step, "search");
    assert_eq!(pings.lock().unwrap().len(), 1);

    widget.unmount().unwrap();
}

#[tokio::test]
async fn test_navigate_back() {
    let page = TestPage::new().await;
    mock_proxy(&page.server).await;

    let options = WidgetOptions::new("#widget").proxy(page.proxy_url());
    let widget = Widget::new(WidgetKind::Connect, options, page.host.clone()).unwrap();
    assert_matches!(widget.navigate_back(), Err(Error::NavigationUnavailable));

    widget.settled().await;
    let went_back = widget.navigate_back().unwrap();

    let frame = &page.container.children()[0];
    let posted = page.dom.content_window(frame).unwrap().posted_messages();
    assert_eq!(posted.len(), 1);
    // Not a literal URL, so the default widget origin is targeted.
    assert_eq!(posted[0].target_origin, "https://widgets.moneydesktop.com");
    assert_eq!(
        serde_json::from_str::<JsonValue>(&posted[0].message).unwrap(),
        json!({ "mx": true, "type": "mx/navigation", "payload": { "action": "back" } })
    );

    page.bus.dispatch(MessageEvent::new(json!({
        "mx": true,
        "type": "mx/navigation",
        "metadata": { "did_go_back": false },
    })));
    assert!(!went_back.await.unwrap());

    // The temporary listener is gone, the widget's own is still there.
    assert_eq!(page.bus.listener_count(), 1);
    widget.unmount().unwrap();
    assert_eq!(page.bus.listener_count(), 0);
}
