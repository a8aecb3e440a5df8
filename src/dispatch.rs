use tokio::sync::mpsc;

use crate::{classify::AlertRecord, config::OverflowPolicy, error::AlertError};

/// Hand-off point between transport workers and the single rendering
/// context. Each successfully classified packet yields exactly one enqueue;
/// the display task on the other side of the channel serializes all render
/// calls. The channel is bounded so a slow or hung panel cannot pile up
/// unbounded state behind it.
#[derive(Debug, Clone)]
pub struct AlertDispatcher {
    scene_tx: mpsc::Sender<AlertRecord>,
    overflow: OverflowPolicy,
}

impl AlertDispatcher {
    pub fn new(scene_tx: mpsc::Sender<AlertRecord>, overflow: OverflowPolicy) -> Self {
        Self { scene_tx, overflow }
    }

    /// Forwards the record unchanged. No buffering, batching or
    /// deduplication here; overflow handling is the only policy applied.
    pub async fn dispatch(&self, record: AlertRecord) -> Result<(), AlertError> {
        match self.overflow {
            OverflowPolicy::Block => self
                .scene_tx
                .send(record)
                .await
                .map_err(|_| AlertError::QueueClosed),
            OverflowPolicy::DropNew => match self.scene_tx.try_send(record) {
                Ok(()) => Ok(()),
                Err(mpsc::error::TrySendError::Full(dropped)) => {
                    tracing::warn!(
                        target: "dispatch",
                        category = dropped.category.as_str(),
                        severity = dropped.severity,
                        "scene queue full; dropping newest alert"
                    );
                    Ok(())
                }
                Err(mpsc::error::TrySendError::Closed(_)) => Err(AlertError::QueueClosed),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use crate::{
        classify::{AlertRecord, Category},
        config::OverflowPolicy,
        error::AlertError,
    };

    use super::AlertDispatcher;

    fn record(message: &str) -> AlertRecord {
        AlertRecord {
            category: Category::Flood,
            severity: 2,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn forwards_each_record_once() {
        let (tx, mut rx) = mpsc::channel(4);
        let dispatcher = AlertDispatcher::new(tx, OverflowPolicy::DropNew);

        dispatcher.dispatch(record("first")).await.expect("dispatch");
        dispatcher.dispatch(record("second")).await.expect("dispatch");

        assert_eq!(rx.recv().await.expect("record").message, "first");
        assert_eq!(rx.recv().await.expect("record").message, "second");
        assert!(rx.try_recv().is_err(), "exactly one enqueue per dispatch");
    }

    #[tokio::test]
    async fn drop_new_policy_discards_on_full_queue_without_failing() {
        let (tx, mut rx) = mpsc::channel(1);
        let dispatcher = AlertDispatcher::new(tx, OverflowPolicy::DropNew);

        dispatcher.dispatch(record("kept")).await.expect("dispatch");
        dispatcher
            .dispatch(record("dropped"))
            .await
            .expect("overflow is not an error under drop-new");

        assert_eq!(rx.recv().await.expect("record").message, "kept");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn closed_queue_surfaces_as_an_error() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let dispatcher = AlertDispatcher::new(tx, OverflowPolicy::DropNew);

        match dispatcher.dispatch(record("orphan")).await {
            Err(AlertError::QueueClosed) => {}
            other => panic!("expected QueueClosed, got {other:?}"),
        }
    }
}
