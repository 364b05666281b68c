/*
 * Responsibility
 * - start the tokio runtime
 * - call app::run() (no logic here)
 */
use anyhow::Result;

use auth_gate::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
