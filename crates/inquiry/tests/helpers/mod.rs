#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use mclears_inquiry::{Controller, Deliver, Field, InquiryDraft};
use tokio::sync::Notify;

#[derive(Default)]
pub struct RecordingDelivery {
    pub calls: AtomicUsize,
    pub received: Mutex<Vec<InquiryDraft>>,
    pub fail_with: Option<String>,
    pub gate: Option<Arc<Notify>>,
    pub delay: Option<Duration>,
}

impl RecordingDelivery {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Deliver for RecordingDelivery {
    async fn deliver(&self, draft: &InquiryDraft) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(draft.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.fail_with {
            Some(reason) => anyhow::bail!("{reason}"),
            None => Ok(()),
        }
    }
}

pub fn controller(delivery: RecordingDelivery) -> (Controller, Arc<RecordingDelivery>) {
    let delivery = Arc::new(delivery);

    (Controller::new(delivery.clone()), delivery)
}

pub fn fill_jane(controller: &Controller) {
    controller.update_field(Field::Name, "Jane");
    controller.update_field(Field::Email, "jane@example.com");
    controller.update_field(Field::Message, "Hi");
}

pub fn jane() -> InquiryDraft {
    InquiryDraft {
        name: "Jane".to_owned(),
        email: "jane@example.com".to_owned(),
        message: "Hi".to_owned(),
        ..Default::default()
    }
}
