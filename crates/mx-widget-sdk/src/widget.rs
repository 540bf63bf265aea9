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

//! The widget engine shared by every widget kind.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, OnceLock},
    task::{Context, Poll},
};

use eyeball::{SharedObservable, Subscriber};
use serde_json::Value as JsonValue;
use tokio::sync::oneshot;
use tracing::{debug, error, instrument, warn, Instrument as _, Span};
use url::Url;

use crate::{
    channel::{listener, MessageChannel, SubscriptionHandle},
    config::{LoadingProps, Style, WidgetOptions},
    dom::Dom,
    executor,
    frame::{FrameLifecycle, FrameState, DEFAULT_TITLE},
    messages::{Envelope, JsonObject, NAVIGATION_EVENT_TYPE},
    sso::{self, SsoBackend},
    DomError, Error, ResolverError, Result, WidgetKind, WidgetType, DEFAULT_WIDGET_ORIGIN,
};

/// The collaborators a widget needs from its host environment.
pub struct WidgetHost<D: Dom> {
    /// The document the widget is mounted into.
    pub dom: Arc<D>,
    /// The bus inbound post messages arrive on.
    pub channel: Arc<dyn MessageChannel>,
    /// The backend handing out SSO tokens.
    pub sso: Arc<dyn SsoBackend>,
}

impl<D: Dom> WidgetHost<D> {
    /// Bundle the host collaborators.
    pub fn new(dom: Arc<D>, channel: Arc<dyn MessageChannel>, sso: Arc<dyn SsoBackend>) -> Self {
        Self { dom, channel, sso }
    }
}

impl<D: Dom> Clone for WidgetHost<D> {
    fn clone(&self) -> Self {
        Self { dom: self.dom.clone(), channel: self.channel.clone(), sso: self.sso.clone() }
    }
}

impl<D: Dom> fmt::Debug for WidgetHost<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetHost")
            .field("dom", &self.dom)
            .field("channel", &self.channel)
            .field("sso", &self.sso)
            .finish()
    }
}

/// How the resolution of the widget URL ended.
#[derive(Clone, Debug)]
pub enum ResolutionOutcome {
    /// The URL is still being resolved.
    Pending,
    /// The frame was mounted with this URL.
    Mounted(String),
    /// The URL couldn't be resolved, the frame will never be mounted.
    Failed(Arc<ResolverError>),
    /// A URL was resolved but not applied, because the widget was unmounted
    /// first, the URL was empty or the document refused the frame.
    Discarded,
}

impl ResolutionOutcome {
    /// Whether the resolution is still running.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// An embedded widget.
///
/// Constructing a widget locates its container and creates its frame right
/// away, while the widget URL is resolved in the background. Resolution
/// failures never surface from [`Widget::new`]: the widget stays usable, its
/// frame just never mounts. Watch [`Widget::settled`] to learn about them.
///
/// The widget stays subscribed to the message channel until
/// [`Widget::unmount`] is called or the widget is dropped, whichever comes
/// first. A URL resolved after that is discarded.
///
/// # Examples
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
///
/// use mx_widget_sdk::{
///     memory::MemoryDom, HttpSsoBackend, MessageBus, SsoConfig, Widget, WidgetHost, WidgetKind,
///     WidgetOptions,
/// };
///
/// let dom = Arc::new(MemoryDom::new());
/// let container = dom.create_element("div");
/// dom.body().append(&container);
///
/// let host = WidgetHost::new(
///     dom,
///     Arc::new(MessageBus::new()),
///     Arc::new(HttpSsoBackend::new(SsoConfig::new())?),
/// );
/// let options = WidgetOptions::with_element(container)
///     .proxy("https://client.example.org/mx-sso-proxy")
///     .on_load(|_| println!("loaded"));
///
/// let widget = Widget::new(WidgetKind::Budgets, options, host)?;
/// widget.settled().await;
/// # Ok(())
/// # }
/// ```
pub struct Widget<D: Dom> {
    inner: Arc<WidgetInner<D>>,
}

struct WidgetInner<D: Dom> {
    kind: WidgetKind,
    frame: FrameLifecycle<D>,
    channel: Arc<dyn MessageChannel>,
    subscription: Mutex<Option<SubscriptionHandle>>,
    target_origin: String,
    resolution: SharedObservable<ResolutionOutcome>,
}

impl<D: Dom> Widget<D> {
    /// Create a widget of the given kind.
    ///
    /// Fails right away if the container can't be found or the frame can't
    /// be created. Must be called from within a tokio runtime on native
    /// targets.
    #[instrument(skip_all, fields(widget_type = %kind.widget_type()))]
    pub fn new(
        kind: WidgetKind,
        options: WidgetOptions<D::Element>,
        host: WidgetHost<D>,
    ) -> Result<Self> {
        let WidgetOptions { container, iframe_title, style, loading, params, callbacks } =
            options;
        let WidgetHost { dom, channel, sso } = host;

        let container = container.locate(&*dom)?;
        let frame = FrameLifecycle::new(dom, container)?;

        let dispatcher = kind.dispatcher();
        let subscription = channel.subscribe(listener(move |event| {
            if let Some(envelope) = Envelope::from_event(event) {
                dispatcher.dispatch(&envelope, &callbacks);
            }
        }));

        let inner = Arc::new(WidgetInner {
            kind,
            frame,
            channel,
            subscription: Mutex::new(Some(subscription)),
            target_origin: target_origin(&loading),
            resolution: SharedObservable::new(ResolutionOutcome::Pending),
        });

        inner.frame.begin_resolution();

        let title = iframe_title.unwrap_or_else(|| DEFAULT_TITLE.to_owned());
        let style = style.unwrap_or_default();

        // Never inline: construction has to return before the continuation
        // runs.
        drop(executor::spawn(
            inner.clone().resolve(sso, loading, params, title, style).instrument(Span::current()),
        ));

        debug!("Created the widget");

        Ok(Self { inner })
    }

    /// Create a widget from its type tag, e.g. `connect_widget`.
    ///
    /// Fails with [`Error::MissingWidgetType`] for an empty tag.
    pub fn with_widget_type(
        widget_type: &str,
        options: WidgetOptions<D::Element>,
        host: WidgetHost<D>,
    ) -> Result<Self> {
        Self::new(widget_type.parse()?, options, host)
    }

    /// The kind of this widget.
    pub fn kind(&self) -> WidgetKind {
        self.inner.kind
    }

    /// The type tag of this widget.
    pub fn widget_type(&self) -> WidgetType {
        self.inner.kind.widget_type()
    }

    /// The current state of the frame.
    pub fn frame_state(&self) -> FrameState {
        self.inner.frame.state()
    }

    /// Get notified of the frame state changes.
    pub fn subscribe_frame_state(&self) -> Subscriber<FrameState> {
        self.inner.frame.subscribe()
    }

    /// The current state of the URL resolution.
    pub fn resolution(&self) -> ResolutionOutcome {
        self.inner.resolution.get()
    }

    /// Get notified when the URL resolution ends.
    pub fn subscribe_resolution(&self) -> Subscriber<ResolutionOutcome> {
        self.inner.resolution.subscribe()
    }

    /// Wait for the URL resolution to end.
    ///
    /// There is no timeout: this waits as long as the SSO backend does.
    pub async fn settled(&self) -> ResolutionOutcome {
        let mut subscriber = self.inner.resolution.subscribe();
        let mut outcome = subscriber.get();

        while outcome.is_pending() {
            match subscriber.next().await {
                Some(next) => outcome = next,
                None => break,
            }
        }

        outcome
    }

    /// Ask the widget to navigate back.
    ///
    /// Fails with [`Error::NavigationUnavailable`] before sending anything if
    /// the frame has no content window, e.g. because it isn't mounted yet.
    /// The returned future resolves with whether the widget went back, as
    /// soon as the next `mx/navigation` message arrives on the channel.
    ///
    /// Requests aren't correlated with answers, so only one should be in
    /// flight at a time. No timeout is applied.
    #[instrument(skip_all, fields(widget_type = %self.widget_type()))]
    pub fn navigate_back(&self) -> Result<NavigateBack> {
        let Some(window) = self.inner.frame.content_window() else {
            return Err(Error::NavigationUnavailable);
        };

        let message = serde_json::to_string(&Envelope::navigate_back())?;

        let (sender, receiver) = oneshot::channel();
        let sender = Mutex::new(Some(sender));
        let own_handle = Arc::new(OnceLock::new());
        let channel = self.inner.channel.clone();

        let handle = channel.subscribe(listener({
            let channel = channel.clone();
            let own_handle = own_handle.clone();

            move |event| {
                let Some(envelope) = Envelope::from_event(event) else { return };
                if envelope.event_type != NAVIGATION_EVENT_TYPE {
                    return;
                }

                let did_go_back = did_go_back(envelope.metadata.as_ref());
                if let Some(sender) = sender.lock().unwrap().take() {
                    let _ = sender.send(did_go_back);
                }
                if let Some(handle) = own_handle.get() {
                    channel.unsubscribe(*handle);
                }
            }
        }));
        // The listener can't have run yet, nothing was posted.
        let _ = own_handle.set(handle);

        let pending = NavigateBack { receiver, channel, handle };

        if let Err(e) =
            self.inner.frame.dom().post_message(&window, &message, &self.inner.target_origin)
        {
            error!("Couldn't post the navigation request: {e}");
            return Err(e.into());
        }

        debug!(target_origin = %self.inner.target_origin, "Sent a navigation request");
        Ok(pending)
    }

    /// Tear the widget down: unsubscribe from the message channel and remove
    /// the frame.
    ///
    /// Safe to call before the URL is resolved, a late URL is then discarded.
    /// Calling it again is a no-op.
    #[instrument(skip_all, fields(widget_type = %self.widget_type()))]
    pub fn unmount(&self) -> Result<()> {
        self.inner.tear_down()?;
        Ok(())
    }
}

impl<D: Dom> Drop for Widget<D> {
    fn drop(&mut self) {
        if let Err(e) = self.inner.tear_down() {
            warn!(widget_type = %self.widget_type(), "Couldn't remove a dropped widget: {e}");
        }
    }
}

impl<D: Dom> WidgetInner<D> {
    fn tear_down(&self) -> Result<(), DomError> {
        if let Some(handle) = self.subscription.lock().unwrap().take() {
            self.channel.unsubscribe(handle);
            debug!("Unsubscribed from the message channel");
        }

        self.frame.unmount()
    }

    async fn resolve(
        self: Arc<Self>,
        sso: Arc<dyn SsoBackend>,
        loading: LoadingProps,
        params: JsonObject,
        title: String,
        style: Style,
    ) {
        let widget_type = self.kind.widget_type();
        let outcome = match sso::resolve_url(&*sso, &loading, &params, widget_type).await {
            Ok(url) => match self.frame.mount(&url, &title, &style) {
                Ok(true) => ResolutionOutcome::Mounted(url),
                Ok(false) => ResolutionOutcome::Discarded,
                Err(e) => {
                    error!("Couldn't attach the widget frame: {e}");
                    ResolutionOutcome::Discarded
                }
            },
            Err(e) => {
                warn!("Couldn't resolve the widget URL, the widget won't be mounted: {e}");
                ResolutionOutcome::Failed(Arc::new(e))
            }
        };

        self.resolution.set(outcome);
    }
}

impl<D: Dom> fmt::Debug for Widget<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("kind", &self.inner.kind)
            .field("frame", &self.inner.frame)
            .field("target_origin", &self.inner.target_origin)
            .field("resolution", &self.inner.resolution.get())
            .finish_non_exhaustive()
    }
}

/// The pending answer to [`Widget::navigate_back`].
///
/// Dropping it stops listening for the answer.
pub struct NavigateBack {
    receiver: oneshot::Receiver<bool>,
    channel: Arc<dyn MessageChannel>,
    handle: SubscriptionHandle,
}

impl Future for NavigateBack {
    type Output = Result<bool>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|result| result.map_err(|_| Error::ChannelClosed))
    }
}

impl Drop for NavigateBack {
    fn drop(&mut self) {
        self.channel.unsubscribe(self.handle);
    }
}

impl fmt::Debug for NavigateBack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigateBack").field("handle", &self.handle).finish_non_exhaustive()
    }
}

fn did_go_back(metadata: Option<&JsonObject>) -> bool {
    metadata.and_then(|m| m.get("did_go_back")).and_then(JsonValue::as_bool).unwrap_or(false)
}

/// The origin navigation requests are posted to.
///
/// Only a literal `http(s)` widget URL says where the widget is served from,
/// anything else goes to the default widget host.
fn target_origin(loading: &LoadingProps) -> String {
    loading
        .url
        .as_deref()
        .and_then(|url| Url::parse(url).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| url.origin().ascii_serialization())
        .unwrap_or_else(|| DEFAULT_WIDGET_ORIGIN.to_owned())
}
