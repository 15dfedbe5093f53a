//! Background dispatch for the callback-style operation surface

use std::future::Future;

use crate::flow::errors::{AuthFlowError, ErrorDetail};

/// Run a flow operation on the ambient Tokio runtime and report through the
/// two callback channels.
///
/// This boundary catches everything the operation can produce: classified
/// errors, execution-layer faults, and panics in the operation task (a
/// panic surfaces as an unknown error carrying the join fault). Nothing
/// escapes the callback pair.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn dispatch<T, F, R, E>(operation: F, on_result: R, on_error: E)
where
    T: Send + 'static,
    F: Future<Output = Result<T, AuthFlowError>> + Send + 'static,
    R: FnOnce(T) + Send + 'static,
    E: FnOnce(AuthFlowError) + Send + 'static,
{
    let handle = tokio::runtime::Handle::current();
    // Nested spawn so a panic inside the operation is observable as a
    // JoinError instead of tearing down the reporting task.
    let operation = handle.spawn(operation);
    handle.spawn(async move {
        match operation.await {
            Ok(Ok(value)) => on_result(value),
            Ok(Err(err)) => on_error(err.log()),
            Err(join_err) => on_error(
                AuthFlowError::Unknown {
                    detail: ErrorDetail::local("background task terminated abnormally", None),
                    source: Some(Box::new(join_err)),
                }
                .log(),
            ),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_dispatch_reports_success() {
        let (tx, mut rx) = mpsc::channel::<Result<u32, AuthFlowError>>(1);
        let tx_err = tx.clone();

        dispatch(
            async { Ok(42u32) },
            move |value| {
                tx.try_send(Ok(value)).ok();
            },
            move |err| {
                tx_err.try_send(Err(err)).ok();
            },
        );

        let outcome = rx.recv().await.expect("callback should fire");
        assert_eq!(outcome.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_dispatch_reports_classified_error() {
        let (tx, mut rx) = mpsc::channel::<Result<u32, AuthFlowError>>(1);
        let tx_err = tx.clone();

        dispatch(
            async { Err(AuthFlowError::InvalidState("no token".to_string())) },
            move |value| {
                tx.try_send(Ok(value)).ok();
            },
            move |err| {
                tx_err.try_send(Err(err)).ok();
            },
        );

        let outcome = rx.recv().await.expect("callback should fire");
        match outcome {
            Err(AuthFlowError::InvalidState(msg)) => assert_eq!(msg, "no token"),
            other => panic!("Wrong outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_catches_panic() {
        let (tx, mut rx) = mpsc::channel::<Result<u32, AuthFlowError>>(1);
        let tx_err = tx.clone();

        dispatch(
            async { panic!("operation blew up") },
            move |value: u32| {
                tx.try_send(Ok(value)).ok();
            },
            move |err| {
                tx_err.try_send(Err(err)).ok();
            },
        );

        let outcome = rx.recv().await.expect("callback should fire");
        match outcome {
            Err(AuthFlowError::Unknown { source, .. }) => {
                assert!(source.is_some(), "join fault should be attached")
            }
            other => panic!("Wrong outcome: {other:?}"),
        }
    }
}
