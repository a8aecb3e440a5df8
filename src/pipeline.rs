use std::net::IpAddr;

use crate::{
    auth::Authenticator, classify::Classifier, dispatch::AlertDispatcher, error::AlertError,
    payload,
};

/// The full packet path: authenticate, strip and decode the payload,
/// classify, dispatch. One call per inbound packet, synchronous end to end
/// apart from the final queue hand-off. Failures stop the packet here and
/// never reach the rendering side.
pub struct AlertPipeline {
    authenticator: Authenticator,
    classifier: Classifier,
    dispatcher: AlertDispatcher,
}

impl AlertPipeline {
    pub fn new(
        authenticator: Authenticator,
        classifier: Classifier,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            authenticator,
            classifier,
            dispatcher,
        }
    }

    pub async fn ingest(&self, raw: &[u8], peer: IpAddr) -> Result<(), AlertError> {
        self.authenticator.verify(raw, peer)?;
        let text = payload::extract(raw)?;
        let record = self.classifier.classify(&text)?;
        tracing::info!(
            target: "pipeline",
            %peer,
            category = record.category.as_str(),
            severity = record.severity,
            "alert accepted"
        );
        self.dispatcher.dispatch(record).await
    }
}
