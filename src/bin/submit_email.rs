//! Submits an address to a running site through the same form logic the
//! landing page uses.

use anyhow::Result;
use clap::Parser;
use solaris_mission_control::form_controller::{
    FormController, HttpSubmissionClient, SubmitOutcome,
};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://localhost:3000")]
    site_url: String,
    email: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let transport = HttpSubmissionClient::new(&cli.site_url)?;

    let mut form = FormController::new();
    form.open_dialog();
    form.set_input(cli.email);

    match form.submit(&transport).await {
        SubmitOutcome::Submitted => {
            println!("submitted to {}", transport.endpoint());
            Ok(())
        }
        SubmitOutcome::Invalid | SubmitOutcome::Failed | SubmitOutcome::AlreadySubmitting => {
            anyhow::bail!(form.error().unwrap_or("submission not sent").to_string())
        }
    }
}
