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

//! Where the widget schedules its asynchronous work.
//!
//! On native targets the mount continuation runs as a tokio task, so
//! [`Widget::new`](crate::Widget::new) must be called from within a tokio
//! runtime. In the browser the continuation is queued on the page's event
//! loop with `wasm-bindgen-futures`, which matches the scheduling of a JS
//! promise callback.

#[cfg(not(target_family = "wasm"))]
mod sys {
    pub use tokio::task::{spawn, JoinError, JoinHandle};
}

#[cfg(target_family = "wasm")]
mod sys {
    use std::{
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    };

    use futures_util::{future::RemoteHandle, FutureExt};

    /// The spawned task went away without producing a value.
    #[derive(Debug)]
    pub struct JoinError;

    impl std::fmt::Display for JoinError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("task was dropped before completion")
        }
    }

    impl std::error::Error for JoinError {}

    /// Handle to a future queued on the browser's event loop.
    ///
    /// Dropping the handle does not cancel the task.
    #[derive(Debug)]
    pub struct JoinHandle<T> {
        remote_handle: Option<RemoteHandle<T>>,
    }

    impl<T> Drop for JoinHandle<T> {
        fn drop(&mut self) {
            if let Some(handle) = self.remote_handle.take() {
                handle.forget();
            }
        }
    }

    impl<T: 'static> Future for JoinHandle<T> {
        type Output = Result<T, JoinError>;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            match self.remote_handle.as_mut() {
                Some(handle) => Pin::new(handle).poll(cx).map(Ok),
                None => Poll::Ready(Err(JoinError)),
            }
        }
    }

    /// Queue `future` on the page's event loop.
    pub fn spawn<F, T>(future: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + 'static,
        T: 'static,
    {
        let (future, remote_handle) = future.remote_handle();
        wasm_bindgen_futures::spawn_local(future);

        JoinHandle { remote_handle: Some(remote_handle) }
    }
}

pub use sys::*;
