//! Generic resource slice: one entity collection plus its request status

use std::sync::Arc;
use tokio::sync::RwLock;

use super::status::RequestStatus;
use crate::models::Resource;

/// Operation a lifecycle action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        write!(f, "{}", label)
    }
}

/// Typed actions accepted by [`ResourceSlice::reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<R> {
    Pending(Operation),
    /// Full collection returned by a list call
    Listed(Vec<R>),
    /// Single record returned by a get call, merged by id
    Fetched(R),
    Created(R),
    Updated(R),
    /// Identifier of the deleted record
    Deleted(String),
    Rejected(String),
    Reset,
}

/// State container for one entity type
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSlice<R> {
    pub items: Vec<R>,
    pub status: RequestStatus,
}

impl<R> Default for ResourceSlice<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: RequestStatus::default(),
        }
    }
}

impl<R: Resource> ResourceSlice<R> {
    /// Apply one lifecycle action
    pub fn reduce(&mut self, action: SliceAction<R>) {
        match action {
            SliceAction::Pending(_) => self.status.pending(),
            SliceAction::Listed(items) => {
                self.status.fulfilled();
                self.items = items;
            }
            SliceAction::Fetched(record) => {
                self.status.fulfilled();
                match self.items.iter_mut().find(|r| r.id() == record.id()) {
                    Some(existing) => *existing = record,
                    None => self.items.push(record),
                }
            }
            SliceAction::Created(record) => {
                self.status.fulfilled();
                self.items.push(record);
            }
            SliceAction::Updated(record) => {
                self.status.fulfilled();
                for existing in self.items.iter_mut().filter(|r| r.id() == record.id()) {
                    *existing = record.clone();
                }
            }
            SliceAction::Deleted(id) => {
                self.status.fulfilled();
                self.items.retain(|r| r.id() != id);
            }
            SliceAction::Rejected(message) => self.status.rejected(message),
            SliceAction::Reset => *self = Self::default(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn is_initial(&self) -> bool {
        self.items.is_empty() && self.status.is_idle()
    }
}

/// Shared handle to a slice; the only writer is `reduce`
pub struct SliceHandle<R> {
    inner: Arc<RwLock<ResourceSlice<R>>>,
}

impl<R> Clone for SliceHandle<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> Default for SliceHandle<R> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceSlice::default())),
        }
    }
}

impl<R: Resource> SliceHandle<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn dispatch(&self, action: SliceAction<R>) {
        self.inner.write().await.reduce(action);
    }

    /// Current state, cloned
    pub async fn snapshot(&self) -> ResourceSlice<R> {
        self.inner.read().await.clone()
    }

    /// Read a derived value without cloning the whole slice
    pub async fn select<T>(&self, selector: impl FnOnce(&ResourceSlice<R>) -> T) -> T {
        selector(&*self.inner.read().await)
    }

    pub async fn reset(&self) {
        self.dispatch(SliceAction::Reset).await;
    }
}
