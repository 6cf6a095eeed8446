use crate::error::{CliError, CliResult};
use kgdash_api::ApiClient;

pub async fn run(client: &ApiClient) -> CliResult<()> {
    let healthy = client.health().await?;
    if healthy {
        println!("Backend reachable at {}", client.base_url());
        Ok(())
    } else {
        Err(CliError::Remote(format!(
            "backend at {} answered but reported not ok",
            client.base_url()
        )))
    }
}
