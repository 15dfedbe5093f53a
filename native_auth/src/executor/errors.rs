use thiserror::Error;

/// Faults raised by the command execution layer itself, as opposed to
/// classified service results.
#[derive(Debug, Error, Clone)]
pub enum CommandError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed service response: {0}")]
    Malformed(String),

    #[error("Dispatch failure: {0}")]
    Dispatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<CommandError>();
    }

    #[test]
    fn test_error_display() {
        let err = CommandError::Transport("connection reset".to_string());
        assert_eq!(err.to_string(), "Transport failure: connection reset");

        let err = CommandError::Malformed("truncated body".to_string());
        assert_eq!(err.to_string(), "Malformed service response: truncated body");

        let err = CommandError::Dispatch("queue closed".to_string());
        assert_eq!(err.to_string(), "Dispatch failure: queue closed");
    }
}
