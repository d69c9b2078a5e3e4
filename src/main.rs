/*
 * Responsibility
 * - tokio runtime
 * - app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    bearer_gate::app::run().await?;
    Ok(())
}
