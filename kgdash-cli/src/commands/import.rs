use crate::error::{CliError, CliResult};
use kgdash_api::ApiClient;
use kgdash_panel::PipelineController;

pub async fn run(client: &ApiClient) -> CliResult<()> {
    let controller = PipelineController::new(client.clone());
    let notification = controller.import_to_graph().await;
    if notification.ok {
        println!("{}", notification.message);
        Ok(())
    } else {
        Err(CliError::Remote(notification.message))
    }
}
