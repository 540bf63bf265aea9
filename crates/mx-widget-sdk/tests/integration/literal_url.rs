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

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use assert_matches2::assert_let;
use mx_widget_sdk::{
    FrameState, MessageEvent, ResolutionOutcome, Style, Widget, WidgetKind, WidgetOptions,
};
use serde_json::json;

use crate::{mock_proxy, TestPage};

#[tokio::test]
async fn test_literal_url_is_used_unchanged() {
    let page = TestPage::new().await;
    // Proxy props are ignored when a URL is given.
    mock_proxy(&page.server).await;

    let options = WidgetOptions::new("#widget")
        .url("https://x/md/hi/tok")
        .proxy(page.proxy_url());
    let widget = Widget::new(WidgetKind::Transactions, options, page.host.clone()).unwrap();

    assert_let!(ResolutionOutcome::Mounted(url) = widget.settled().await);
    assert_eq!(url, "https://x/md/hi/tok");
    assert_eq!(page.frame_sources(), [Some("https://x/md/hi/tok".to_owned())]);
    assert!(page.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_frame_attributes() {
    let page = TestPage::new().await;

    let options = WidgetOptions::with_element(page.container.clone())
        .url("https://x/md/hi/tok")
        .iframe_title("Spending")
        .style(Style::new().set("height", "550px"));
    let widget = Widget::new(WidgetKind::Spending, options, page.host.clone()).unwrap();
    widget.settled().await;

    let frame = &page.container.children()[0];
    assert_eq!(frame.attribute("title").as_deref(), Some("Spending"));
    assert_eq!(frame.attribute("data-test-id").as_deref(), Some("mx-widget-iframe"));
    // A custom style replaces the default one.
    assert_eq!(frame.style(), [("height".to_owned(), "550px".to_owned())]);
}

#[tokio::test]
async fn test_unmount_twice_and_before_mounting() {
    let page = TestPage::new().await;

    let options = WidgetOptions::new("#widget").url("https://x/md/hi/tok");
    let widget = Widget::new(WidgetKind::Debts, options, page.host.clone()).unwrap();
    assert_eq!(page.bus.listener_count(), 1);

    widget.unmount().unwrap();
    widget.unmount().unwrap();
    assert_eq!(page.bus.listener_count(), 0);

    assert_let!(ResolutionOutcome::Discarded = widget.settled().await);
    assert_eq!(widget.frame_state(), FrameState::Unmounted);
    assert!(page.frame_sources().is_empty());
    assert_eq!(page.dom.body().children().len(), 1);
}

#[tokio::test]
async fn test_dropped_widget_never_mounts() {
    let page = TestPage::new().await;
    let loads = Arc::new(AtomicUsize::new(0));

    let options = WidgetOptions::new("#widget").url("https://x/md/hi/tok").on_load({
        let loads = loads.clone();
        move |_| {
            loads.fetch_add(1, Ordering::SeqCst);
        }
    });
    let widget = Widget::new(WidgetKind::Accounts, options, page.host.clone()).unwrap();
    drop(widget);

    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    page.bus.dispatch(MessageEvent::new(json!({ "mx": true, "type": "mx/load" })));

    assert_eq!(page.bus.listener_count(), 0);
    assert!(page.frame_sources().is_empty());
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}
