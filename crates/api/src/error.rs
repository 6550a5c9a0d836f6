use thiserror::Error;

/// Failure of a conversation step. The session is left as it was before the step.
#[derive(Error, Debug, PartialEq)]
pub enum ConversationError {
    #[error("The store failed while executing `{0}`")]
    Storage(&'static str),
    #[error("Invalid input rejected by `{0}`")]
    Rejected(&'static str),
}
