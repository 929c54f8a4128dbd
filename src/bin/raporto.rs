use anyhow::Result;
use raporto::cli::{self, telemetry};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    let action = cli::start()?;

    let result = action.execute().await;

    // Flush any buffered spans before exiting
    telemetry::shutdown_tracer();

    result
}
