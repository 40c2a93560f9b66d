//! Request lifecycle flags shared by every slice

/// Loading/error/success flags plus the last error message.
///
/// Flags are overwritten by each operation, so concurrent operations on the
/// same slice report last-write-wins. An error stays raised until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStatus {
    pub is_loading: bool,
    pub is_error: bool,
    pub is_success: bool,
    pub message: String,
}

impl RequestStatus {
    pub fn pending(&mut self) {
        self.is_loading = true;
    }

    pub fn fulfilled(&mut self) {
        self.is_loading = false;
        self.is_success = true;
    }

    pub fn rejected(&mut self, message: String) {
        self.is_loading = false;
        self.is_error = true;
        self.message = message;
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
