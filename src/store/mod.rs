//! Client-side state: one slice per resource plus the session

pub mod auth;
pub mod slice;
pub mod status;
pub mod thunks;

use crate::models::{Book, Grade, Loan, Payment, Subject};

pub use auth::{AuthAction, AuthHandle, AuthState};
pub use slice::{Operation, ResourceSlice, SliceAction, SliceHandle};
pub use status::RequestStatus;
pub use thunks::{AuthThunks, ResourceThunks};

/// Every slice of the application
#[derive(Clone, Default)]
pub struct Store {
    pub auth: AuthHandle,
    pub subjects: SliceHandle<Subject>,
    pub grades: SliceHandle<Grade>,
    pub books: SliceHandle<Book>,
    pub payments: SliceHandle<Payment>,
    pub loans: SliceHandle<Loan>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
