//! Generic CRUD wrapper over one REST collection

use std::{marker::PhantomData, sync::Arc};

use reqwest::Method;

use super::ApiClient;
use crate::{
    config::NotificationConfig,
    error::AppResult,
    models::{Notice, Resource},
    notify::{Notifier, Toast},
};

/// CRUD calls for resource `R` under `/{R::PATH}`
pub struct ResourceService<R> {
    pub(super) api: ApiClient,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) durations: NotificationConfig,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: Arc::clone(&self.notifier),
            durations: self.durations.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, durations: NotificationConfig) -> Self {
        Self {
            api,
            notifier,
            durations,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, id)
    }

    /// Get all records
    pub async fn list(&self, token: Option<&str>) -> AppResult<Vec<R>> {
        tracing::debug!(resource = R::PATH, "GET collection");
        self.api
            .send(self.api.request(Method::GET, R::PATH, token))
            .await
    }

    /// Get a single record
    pub async fn get(&self, id: &str, token: Option<&str>) -> AppResult<R> {
        tracing::debug!(resource = R::PATH, id, "GET record");
        self.api
            .send(self.api.request(Method::GET, &Self::item_path(id), token))
            .await
    }

    /// Create a record, returning it with its server-assigned id
    pub async fn create(&self, draft: &R::Draft, token: &str) -> AppResult<R> {
        let created: R = self
            .api
            .send(self.api.request(Method::POST, R::PATH, Some(token)).json(draft))
            .await?;
        self.announce(R::NOTICES.created);
        Ok(created)
    }

    /// Replace a record, identified by its own id
    pub async fn update(&self, record: &R, token: &str) -> AppResult<R> {
        let updated: R = self
            .api
            .send(
                self.api
                    .request(Method::PUT, &Self::item_path(record.id()), Some(token))
                    .json(record),
            )
            .await?;
        self.announce(R::NOTICES.updated);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, token: &str) -> AppResult<()> {
        self.api
            .send_unit(self.api.request(Method::DELETE, &Self::item_path(id), Some(token)))
            .await?;
        self.announce(R::NOTICES.deleted);
        Ok(())
    }

    pub(super) fn announce(&self, notice: Notice) {
        self.notifier.notify(Toast::success(
            notice.title,
            notice.description,
            self.durations.success_duration_ms,
        ));
    }
}
