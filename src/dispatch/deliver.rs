//! # Guarded delivery of one payload to one handler.
//!
//! Both publish flavors funnel through here. Every delivery runs as its own
//! Tokio task, so one handler can neither block nor crash another. The
//! awaited flavor waits for settlement under the configured deadline; the
//! detached flavor returns immediately and reports failures from inside the
//! task.
//!
//! ## Timeout semantics
//! A deadline hit abandons the delivery: the join handle is dropped, the
//! spawned task keeps running in the background, and its eventual result is
//! discarded. Nothing forcibly stops the handler's work.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinError;
use tokio::time;

use crate::diag::Logger;
use crate::error::DispatchError;
use crate::handlers::HandlerRef;
use crate::registry::EventKey;

/// Delivers `payload` to `handler`, awaiting settlement under `deadline`.
///
/// Never returns an error: failures are reported through `logger` with the
/// originating key and handler name attached.
pub(crate) async fn deliver<P>(
    key: EventKey,
    handler: HandlerRef<P>,
    payload: P,
    deadline: Option<Duration>,
    logger: Logger,
) where
    P: Send + 'static,
{
    let name = handler.name().to_owned();
    let task = tokio::spawn(async move { handler.call(payload).await });

    let outcome = match deadline {
        Some(dur) => match time::timeout(dur, task).await {
            Ok(joined) => settle(joined),
            // Dropping the elapsed join handle detaches the task: the
            // handler's work continues, its result is discarded.
            Err(_elapsed) => Err(DispatchError::Timeout { timeout: dur }),
        },
        None => settle(task.await),
    };

    if let Err(err) = outcome {
        report(&logger, &key, &name, &err);
    }
}

/// Spawns a detached delivery: failures are reported from inside the task,
/// completion is not awaited by anyone.
///
/// Used by the fire-and-forget publish flavors; no deadline applies.
pub(crate) fn deliver_detached<P>(key: EventKey, handler: HandlerRef<P>, payload: P, logger: Logger)
where
    P: Send + 'static,
{
    tokio::spawn(async move {
        let name = handler.name().to_owned();
        match AssertUnwindSafe(handler.call(payload)).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => report(&logger, &key, &name, &err),
            Err(panic) => {
                let err = DispatchError::Panicked {
                    info: panic_message(panic.as_ref()),
                };
                report(&logger, &key, &name, &err);
            }
        }
    });
}

/// Collapses a join result into the delivery outcome.
fn settle(joined: Result<Result<(), DispatchError>, JoinError>) -> Result<(), DispatchError> {
    match joined {
        Ok(outcome) => outcome,
        Err(join_err) if join_err.is_panic() => Err(DispatchError::Panicked {
            info: panic_message(join_err.into_panic().as_ref()),
        }),
        Err(_cancelled) => Err(DispatchError::fail("delivery task cancelled")),
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

/// Logs one isolated failure with its key and handler attribution.
fn report(logger: &Logger, key: &EventKey, handler: &str, err: &DispatchError) {
    match err {
        DispatchError::Timeout { timeout } => logger.error(format!(
            "[deliver-timeout] key={key} handler={handler} timeout={timeout:?}"
        )),
        DispatchError::Panicked { info } => logger.error(format!(
            "[deliver-panic] key={key} handler={handler} info={info:?}"
        )),
        _ => logger.error(format!(
            "[deliver-failed] key={key} handler={handler} err={err}"
        )),
    }
}
