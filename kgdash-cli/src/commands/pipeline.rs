use crate::error::{CliError, CliResult};
use crate::output;
use kgdash_api::ApiClient;
use kgdash_panel::{PipelineController, UploadedArtifact};
use std::fs;
use std::path::Path;

pub async fn run(file: &Path, download: Option<&Path>, client: &ApiClient) -> CliResult<()> {
    let bytes = fs::read(file)
        .map_err(|e| CliError::Input(format!("failed to read {}: {e}", file.display())))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.json")
        .to_string();

    let controller = PipelineController::new(client.clone());
    controller.select_file(UploadedArtifact { file_name, bytes });
    controller.run().await;

    let view = controller.view();

    // The run payload is shown verbatim, success or not; it carries the
    // backend's diagnostics.
    if let Some(result) = &view.result {
        println!("{}", serde_json::to_string_pretty(result.as_value())?);
    }

    if view.failed() {
        return Err(CliError::Remote(
            view.failure_message()
                .unwrap_or_else(|| "pipeline run failed".to_string()),
        ));
    }

    if let Some(reference) = &view.output_ttl {
        println!();
        println!(
            "Output: {}",
            output::hyperlink(&output::absolute_url(client.base_url(), reference))
        );

        if let Some(dir) = download {
            let bytes = client.download_file(reference).await?;
            fs::create_dir_all(dir)?;
            let name = reference.rsplit('/').next().filter(|s| !s.is_empty());
            let target = dir.join(name.unwrap_or("output.ttl"));
            fs::write(&target, bytes)?;
            println!("Saved {}", target.display());
        }
    }

    Ok(())
}
