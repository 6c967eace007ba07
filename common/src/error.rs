use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("no venue with id {0} on the map")]
    UnknownVenue(String),
    #[error("no venue at position {0} (the map shows {1} venues)")]
    IndexOutOfRange(usize, usize),
}
