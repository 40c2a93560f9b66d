//! SGE School Management client
//!
//! A typed client for the SGE REST backend: per-resource state slices,
//! async operations bound to cancellation tokens, and headless screens that
//! derive table rows from the slices.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod screens;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use models::{Book, Grade, Loan, Payment, Subject};
use notify::Notifier;
use services::Services;
use store::{AuthThunks, ResourceThunks, Store};

/// Application context passed to every screen
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub services: Arc<Services>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn new(config: AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        let services = Services::new(&config, notifier.clone());
        Self {
            config: Arc::new(config),
            store: Store::new(),
            services: Arc::new(services),
            notifier,
        }
    }

    pub fn auth(&self) -> AuthThunks {
        AuthThunks::new(self.store.auth.clone(), self.services.auth.clone())
    }

    pub fn subjects(&self) -> ResourceThunks<Subject> {
        ResourceThunks::new(
            self.store.subjects.clone(),
            self.services.subjects.clone(),
            self.store.auth.clone(),
        )
    }

    pub fn grades(&self) -> ResourceThunks<Grade> {
        ResourceThunks::new(
            self.store.grades.clone(),
            self.services.grades.clone(),
            self.store.auth.clone(),
        )
    }

    pub fn books(&self) -> ResourceThunks<Book> {
        ResourceThunks::new(
            self.store.books.clone(),
            self.services.books.clone(),
            self.store.auth.clone(),
        )
    }

    pub fn payments(&self) -> ResourceThunks<Payment> {
        ResourceThunks::new(
            self.store.payments.clone(),
            self.services.payments.clone(),
            self.store.auth.clone(),
        )
    }

    pub fn loans(&self) -> ResourceThunks<Loan> {
        ResourceThunks::new(
            self.store.loans.clone(),
            self.services.loans.clone(),
            self.store.auth.clone(),
        )
    }
}
