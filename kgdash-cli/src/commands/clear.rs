use crate::error::{CliError, CliResult};
use kgdash_api::ApiClient;
use kgdash_panel::PipelineController;

pub async fn run(force: bool, client: &ApiClient) -> CliResult<()> {
    // Destructive: deletes every triple in the repository. The explicit
    // flag is the confirmation step; nothing is sent without it.
    if !force {
        return Err(CliError::Usage(
            "use --force to confirm deleting all triples in the repository".to_string(),
        ));
    }

    let controller = PipelineController::new(client.clone());
    let notification = controller.clear_repository().await;
    if notification.ok {
        println!("{}", notification.message);
        Ok(())
    } else {
        Err(CliError::Remote(notification.message))
    }
}
