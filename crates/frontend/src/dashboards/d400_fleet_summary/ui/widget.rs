//! Loading/error/data triple owned by one dashboard widget.

use std::future::Future;

use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::request_seq::RequestSeq;

pub struct WidgetState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    seq: RequestSeq,
}

impl<T: Send + Sync + 'static> Clone for WidgetState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for WidgetState<T> {}

impl<T: Send + Sync + 'static> WidgetState<T> {
    pub fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            seq: RequestSeq::new(),
        }
    }

    /// Run `fut`; an empty payload clears the data without raising an error.
    pub fn load<F>(self, name: &'static str, fut: F)
    where
        F: Future<Output = Result<T, ApiError>> + 'static,
    {
        let ticket = self.seq.next();
        self.loading.set(true);
        self.error.set(None);
        spawn_local(async move {
            let result = fut.await;
            if !self.seq.is_current(ticket) {
                return;
            }
            match result {
                Ok(value) => self.data.set(Some(value)),
                Err(e) if e.is_empty() => self.data.set(None),
                Err(e) => {
                    log::error!("{} failed: {}", name, e);
                    self.data.set(None);
                    self.error.set(Some(e.user_message()));
                }
            }
            self.loading.set(false);
        });
    }
}
