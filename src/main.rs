//! Customer form - scripted session
//!
//! Runs the customer form component on a single-threaded runtime and feeds
//! it the same sequence a user would trigger from the form: fill in the
//! sample customer, add a second address, then save.

use anyhow::Result;
use customer_form::customer::{paths, LogSink};
use customer_form::{CustomerComponent, FormConfig, FormEvent};
use std::io;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "customer_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FormConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Falling back to default config: {err:#}");
        FormConfig::default()
    });

    let component = CustomerComponent::new(&config, Box::new(LogSink::new(config.pretty_save())));
    let (tx, rx) = mpsc::channel(32);
    let session = tokio::spawn(component.run(rx));

    for event in [
        FormEvent::PopulateTestData,
        FormEvent::input(paths::CONFIRM_EMAIL, "ottonormalisto@mail.com"),
        FormEvent::blur(paths::CONFIRM_EMAIL),
        FormEvent::AddAddress,
        FormEvent::Save,
        FormEvent::Shutdown,
    ] {
        tx.send(event).await?;
    }

    let component = session.await?;
    tracing::info!(
        valid = component.form().valid(),
        addresses = component.addresses()?.len(),
        "Session finished"
    );

    Ok(())
}
