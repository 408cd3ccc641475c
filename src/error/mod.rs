#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation Error: {0} should be {1}")]
    Validation(String, String),

    #[error("Shape Error: {0} should be {1}, but got {2:?}")]
    MismatchedShape(String, String, Vec<usize>),
}
