use crate::error::{CliError, CliResult};
use crate::output;
use kgdash_api::ApiClient;
use kgdash_panel::Nl2SparqlController;

pub async fn run(
    question: &str,
    run_after: bool,
    format_str: &str,
    client: &ApiClient,
) -> CliResult<()> {
    let format = output::parse_format(format_str)?;

    let controller = Nl2SparqlController::new(client.clone());
    controller.set_question(question);
    controller.translate().await;

    let view = controller.view();
    if let Some(err) = view.error {
        return Err(CliError::Remote(err));
    }

    // Always show what would run; the query is only executed on request.
    println!("{}", view.query_text);

    if run_after {
        controller.run_generated().await;
        let view = controller.view();
        if let Some(err) = view.error {
            return Err(CliError::Remote(err));
        }
        println!();
        println!("{}", output::format_result(&view.rows, &view.table, format)?);
    }

    Ok(())
}
