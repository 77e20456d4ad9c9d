use tokio::io::{AsyncBufReadExt, BufReader};

use onboard_intake::collector::{Collector, OnboardingClient, SubmitState, prompt};
use onboard_intake::config::CollectorConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Quiet by default so log lines do not interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CollectorConfig::from_env();
    let client = OnboardingClient::new(&config.server_url);

    eprintln!("Onboarding form");
    eprintln!("   Submitting to: {}", client.endpoint());
    eprintln!("   Fields marked * are required.\n");

    let mut collector = Collector::new(client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stderr = tokio::io::stderr();

    if !prompt::fill_form(&mut lines, &mut stderr, collector.form_mut()).await? {
        return Err("input ended before the form was complete".into());
    }

    eprintln!("\n{}", SubmitState::Submitting);
    let state = collector.submit().await?;
    match state {
        SubmitState::Success { .. } => {
            println!("{state}");
            Ok(())
        }
        other => Err(other.to_string().into()),
    }
}
