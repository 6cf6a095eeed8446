use crate::error::{CliError, CliResult};
use crate::output;
use comfy_table::{ContentArrangement, Table};
use kgdash_api::ApiClient;
use kgdash_panel::PresetQueryController;

pub async fn list(client: &ApiClient) -> CliResult<()> {
    let controller = PresetQueryController::new(client.clone());
    controller.load_catalog().await;

    let view = controller.view();
    if let Some(err) = view.catalog_error {
        return Err(CliError::Remote(format!("failed to load queries: {err}")));
    }

    let names = view.catalog.unwrap_or_default();
    if names.is_empty() {
        println!("No preset queries found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["QUERY"]);
    for name in &names {
        table.add_row(vec![name.clone()]);
    }
    println!("{table}");

    Ok(())
}

pub async fn run(name: &str, format_str: &str, client: &ApiClient) -> CliResult<()> {
    let format = output::parse_format(format_str)?;

    let controller = PresetQueryController::new(client.clone());
    controller.run_query(name).await;

    let view = controller.view();
    if let Some(err) = view.error {
        return Err(CliError::Remote(err));
    }

    println!("{}", output::format_result(&view.rows, &view.table, format)?);
    Ok(())
}
