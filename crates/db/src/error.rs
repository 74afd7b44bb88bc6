use mediavault_core::error::CoreError;

/// Errors surfaced by the persistence service.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique-field contract was violated on insert.
    #[error("duplicate value for unique field '{field}'")]
    Duplicate { field: &'static str },
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                CoreError::Duplicate(format!("A user with this {field} already exists."))
            }
        }
    }
}
