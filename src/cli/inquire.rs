use mclears_inquiry::{Controller, Field, SubmissionOutcome};

#[derive(clap::Args, Debug)]
pub struct InquireArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub message: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Preferred dates, e.g. "July 4-11"
    #[arg(long, default_value = "")]
    pub dates: String,

    /// One of the accommodation labels, e.g. "RV Site"
    #[arg(long, default_value = "")]
    pub accommodation: String,
}

/// Runs one inquiry through a controller using the configured delivery.
pub async fn inquire(config: crate::config::Config, args: InquireArgs) -> anyhow::Result<()> {
    let delivery = crate::delivery::build_delivery(&config)?;
    let controller = Controller::new(delivery).with_timeout(config.delivery.timeout());

    controller.update_field(Field::Name, args.name);
    controller.update_field(Field::Email, args.email);
    controller.update_field(Field::Phone, args.phone);
    controller.update_field(Field::PreferredDates, args.dates);
    controller.update_field(Field::Accommodation, args.accommodation.to_owned());
    controller.update_field(Field::Message, args.message);

    if !args.accommodation.is_empty() && controller.draft().accommodation.is_none() {
        tracing::warn!(
            "unknown accommodation '{}', sending without a preference",
            args.accommodation
        );
    }

    match controller.submit().await {
        SubmissionOutcome::Submitted => {
            tracing::info!("inquiry delivered");
            Ok(())
        }
        SubmissionOutcome::Invalid(err) => anyhow::bail!("inquiry rejected: {err}"),
        SubmissionOutcome::Failed(failure) => anyhow::bail!("{failure}"),
        SubmissionOutcome::Ignored => anyhow::bail!("inquiry already in flight"),
    }
}
