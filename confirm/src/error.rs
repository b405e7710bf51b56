use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfirmError {
    /// The listener half of the channel is gone; no prompt can be delivered.
    #[error("no confirmation listener attached")]
    ListenerGone,
}
