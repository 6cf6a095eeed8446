use crate::error::{CliError, CliResult};
use crate::input;
use crate::output;
use kgdash_api::ApiClient;
use kgdash_panel::Nl2SparqlController;
use std::path::Path;

pub async fn run(
    file: Option<&Path>,
    expr: Option<&str>,
    format_str: &str,
    client: &ApiClient,
) -> CliResult<()> {
    let format = output::parse_format(format_str)?;

    let source = input::resolve_input(expr, file)?;
    let query = input::read_input(&source)?;

    let controller = Nl2SparqlController::new(client.clone());
    controller.set_query_text(&query);
    controller.run_generated().await;

    let view = controller.view();
    if let Some(err) = view.error {
        return Err(CliError::Remote(err));
    }

    println!("{}", output::format_result(&view.rows, &view.table, format)?);
    Ok(())
}
