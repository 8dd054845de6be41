use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::{DeliveryFailure, Error, Field, InquiryDraft, ValidationError, validate};

pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(20);

/// Transmits a validated draft to whoever handles inquiries.
///
/// Implementations must not retry on their own: delivery is not assumed to be
/// idempotent, and a retry is always the visitor's decision.
#[async_trait::async_trait]
pub trait Deliver: Send + Sync {
    async fn deliver(&self, draft: &InquiryDraft) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(DeliveryFailure),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Submitted => "submitted",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted,
    /// Controller was busy or already submitted; nothing happened.
    Ignored,
    Invalid(ValidationError),
    Failed(DeliveryFailure),
}

struct Form {
    draft: InquiryDraft,
    state: SubmissionState,
}

/// Owns one visitor's draft and submission state.
///
/// Cloning yields another handle on the same form. The inner lock is never
/// held across the delivery await, so a concurrent `submit` observes
/// `Submitting` and is ignored instead of queueing behind the first one.
#[derive(Clone)]
pub struct Controller {
    form: Arc<Mutex<Form>>,
    delivery: Arc<dyn Deliver>,
    timeout: Duration,
}

impl Controller {
    pub fn new(delivery: Arc<dyn Deliver>) -> Self {
        Self {
            form: Arc::new(Mutex::new(Form {
                draft: InquiryDraft::default(),
                state: SubmissionState::Idle,
            })),
            delivery,
            timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Form> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    pub fn draft(&self) -> InquiryDraft {
        self.lock().draft.clone()
    }

    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        self.lock().draft.set(field, value);
    }

    #[tracing::instrument(skip(self))]
    pub async fn submit(&self) -> SubmissionOutcome {
        let snapshot = {
            let mut form = self.lock();

            match form.state {
                SubmissionState::Submitting => {
                    tracing::debug!("Inquiry already being sent, ignoring submit");
                    return SubmissionOutcome::Ignored;
                }
                SubmissionState::Submitted => {
                    tracing::debug!("Inquiry already sent, reset required before resubmitting");
                    return SubmissionOutcome::Ignored;
                }
                SubmissionState::Idle | SubmissionState::Failed(_) => {}
            }

            if let Err(err) = validate(&form.draft) {
                tracing::debug!(field = %err.field(), "Inquiry rejected by validation: {err}");
                return SubmissionOutcome::Invalid(err);
            }

            form.state = SubmissionState::Submitting;
            form.draft.clone()
        };

        let in_flight = InFlight {
            form: self.form.clone(),
            settled: false,
        };

        let result = tokio::time::timeout(self.timeout, self.delivery.deliver(&snapshot)).await;

        let failure = match result {
            Ok(Ok(())) => None,
            Ok(Err(err)) => {
                tracing::error!("Inquiry delivery failed: {err:#}");
                Some(DeliveryFailure::Rejected(err.to_string()))
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Inquiry delivery timed out");
                Some(DeliveryFailure::Timeout)
            }
        };

        match failure {
            None => {
                in_flight.settle(|form| {
                    form.state = SubmissionState::Submitted;
                    form.draft = InquiryDraft::default();
                });
                tracing::info!("Inquiry delivered");

                SubmissionOutcome::Submitted
            }
            Some(failure) => {
                let state = SubmissionState::Failed(failure.clone());
                in_flight.settle(|form| form.state = state);

                SubmissionOutcome::Failed(failure)
            }
        }
    }

    /// Clears the draft after a success or a failure. Rejected while sending.
    pub fn reset(&self) -> crate::Result<()> {
        let mut form = self.lock();

        match form.state {
            SubmissionState::Submitting => Err(Error::Busy),
            SubmissionState::Idle => Ok(()),
            SubmissionState::Submitted | SubmissionState::Failed(_) => {
                form.draft = InquiryDraft::default();
                form.state = SubmissionState::Idle;

                Ok(())
            }
        }
    }
}

/// Moves a dropped submission out of `Submitting`.
struct InFlight {
    form: Arc<Mutex<Form>>,
    settled: bool,
}

impl InFlight {
    fn settle(mut self, apply: impl FnOnce(&mut Form)) {
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut form);
        self.settled = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        if form.state.is_submitting() {
            tracing::warn!("Inquiry submission dropped while sending");
            form.state = SubmissionState::Failed(DeliveryFailure::Cancelled);
        }
    }
}
