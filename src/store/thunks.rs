//! Async operations that call a service and report the outcome to a slice

use std::future::Future;

use tokio_util::sync::CancellationToken;
use validator::Validate;

use super::{
    auth::{AuthAction, AuthHandle},
    slice::{Operation, SliceAction, SliceHandle},
};
use crate::{
    error::{AppError, AppResult},
    models::{DateRange, Loan, LoginForm, Payment, PaymentStatus, Resource, ReturnForm, Session},
    services::{auth::AuthService, ResourceService},
};

/// Await `call` unless `cancel` fires first.
///
/// A result that arrives after cancellation is discarded.
async fn guarded<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(AppError::Cancelled),
        result = call => result,
    };
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    result
}

/// List/get/create/update/delete thunks for resource `R`
pub struct ResourceThunks<R> {
    slice: SliceHandle<R>,
    service: ResourceService<R>,
    auth: AuthHandle,
}

impl<R> Clone for ResourceThunks<R> {
    fn clone(&self) -> Self {
        Self {
            slice: self.slice.clone(),
            service: self.service.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<R: Resource> ResourceThunks<R> {
    pub fn new(slice: SliceHandle<R>, service: ResourceService<R>, auth: AuthHandle) -> Self {
        Self {
            slice,
            service,
            auth,
        }
    }

    pub fn slice(&self) -> &SliceHandle<R> {
        &self.slice
    }

    async fn require_token(&self) -> AppResult<String> {
        self.auth.token().await.ok_or(AppError::Unauthenticated)
    }

    /// Run one lifecycle: pending, the call, then fulfilled or rejected.
    ///
    /// When `cancel` fires the slice receives no outcome.
    async fn run<T>(
        &self,
        operation: Operation,
        cancel: &CancellationToken,
        call: impl Future<Output = AppResult<T>>,
        apply: impl FnOnce(T) -> SliceAction<R>,
    ) -> AppResult<()> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        self.slice.dispatch(SliceAction::Pending(operation)).await;

        match guarded(cancel, call).await {
            Ok(value) => {
                self.slice.dispatch(apply(value)).await;
                tracing::debug!(resource = R::PATH, %operation, "Operation fulfilled");
                Ok(())
            }
            Err(AppError::Cancelled) => {
                tracing::debug!(resource = R::PATH, %operation, "Discarding cancelled operation");
                Err(AppError::Cancelled)
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(resource = R::PATH, %operation, error = %err, "Operation rejected");
                self.slice.dispatch(SliceAction::Rejected(message)).await;
                Err(err)
            }
        }
    }

    /// Replace the collection with the server's list
    pub async fn list(&self, cancel: &CancellationToken) -> AppResult<()> {
        let call = async {
            let token = self.auth.token().await;
            self.service.list(token.as_deref()).await
        };
        self.run(Operation::List, cancel, call, SliceAction::Listed).await
    }

    /// Fetch one record and merge it into the collection
    pub async fn get(&self, id: &str, cancel: &CancellationToken) -> AppResult<()> {
        let call = async {
            let token = self.auth.token().await;
            self.service.get(id, token.as_deref()).await
        };
        self.run(Operation::Get, cancel, call, SliceAction::Fetched).await
    }

    /// Validate and create; an invalid draft never reaches the slice or the network
    pub async fn create(&self, draft: &R::Draft, cancel: &CancellationToken) -> AppResult<R> {
        draft.validate()?;

        let mut created = None;
        let call = async {
            let token = self.require_token().await?;
            self.service.create(draft, &token).await
        };
        self.run(Operation::Create, cancel, call, |record: R| {
            created = Some(record.clone());
            SliceAction::Created(record)
        })
        .await?;

        created.ok_or(AppError::Cancelled)
    }

    /// Validate and replace the record with the same id
    pub async fn update(&self, record: &R, cancel: &CancellationToken) -> AppResult<()> {
        record.validate()?;

        let call = async {
            let token = self.require_token().await?;
            self.service.update(record, &token).await
        };
        self.run(Operation::Update, cancel, call, SliceAction::Updated).await
    }

    pub async fn delete(&self, id: &str, cancel: &CancellationToken) -> AppResult<()> {
        let call = async {
            let token = self.require_token().await?;
            self.service.delete(id, &token).await
        };
        self.run(Operation::Delete, cancel, call, |()| {
            SliceAction::Deleted(id.to_string())
        })
        .await
    }

    pub async fn reset(&self) {
        self.slice.reset().await;
    }
}

impl ResourceThunks<Payment> {
    /// Replace the collection with the payments inside `range`
    pub async fn list_in_range(&self, range: &DateRange, cancel: &CancellationToken) -> AppResult<()> {
        range.validate()?;

        let call = async {
            let token = self.require_token().await?;
            self.service.list_in_range(range, &token).await
        };
        self.run(Operation::List, cancel, call, SliceAction::Listed).await
    }

    /// Replace the collection with one student's payments inside `range`
    pub async fn list_by_student(
        &self,
        student_id: &str,
        range: &DateRange,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        range.validate()?;

        let call = async {
            let token = self.require_token().await?;
            self.service.list_by_student(student_id, range, &token).await
        };
        self.run(Operation::List, cancel, call, SliceAction::Listed).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        estado: PaymentStatus,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        let call = async {
            let token = self.require_token().await?;
            self.service.update_status(id, estado, &token).await
        };
        self.run(Operation::Update, cancel, call, SliceAction::Updated).await
    }
}

impl ResourceThunks<Loan> {
    /// Register the return of a loaned map
    pub async fn register_return(
        &self,
        loan: &Loan,
        form: &ReturnForm,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        form.validate()?;
        self.update(&loan.with_return(form), cancel).await
    }
}

/// Login/logout thunks
#[derive(Clone)]
pub struct AuthThunks {
    slice: AuthHandle,
    service: AuthService,
}

impl AuthThunks {
    pub fn new(slice: AuthHandle, service: AuthService) -> Self {
        Self { slice, service }
    }

    pub async fn login(&self, form: &LoginForm, cancel: &CancellationToken) -> AppResult<Session> {
        form.validate()?;

        self.slice.dispatch(AuthAction::Pending).await;
        match guarded(cancel, self.service.login(form)).await {
            Ok(session) => {
                tracing::info!(correo = %session.correo, "Logged in");
                self.slice.dispatch(AuthAction::LoggedIn(session.clone())).await;
                Ok(session)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                tracing::warn!(error = %err, "Login rejected");
                self.slice.dispatch(AuthAction::Rejected(err.user_message())).await;
                Err(err)
            }
        }
    }

    pub async fn logout(&self) {
        self.slice.dispatch(AuthAction::Logout).await;
    }

    pub async fn reset(&self) {
        self.slice.dispatch(AuthAction::Reset).await;
    }
}
