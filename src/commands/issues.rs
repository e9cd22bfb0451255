use clap::ArgMatches;
use colored::*;
use tracing::error;

use crate::cli_context::CliContext;
use crate::error::{BbError, BbResult, ErrorContext};
use crate::formatting::print_issues;
use crate::presentation::{action_enabled, results_modal, Notification, Presenter};

/// Logs and notifies a failed collection. The returned error is not printed again.
fn report_collect_failure(presenter: &dyn Presenter, e: BbError) -> BbError {
    let message = format!("Error while fetching all issues: {}", e);
    error!("{}", message);
    presenter.notify(Notification::error(message.clone()));
    BbError::Reported(message)
}

pub async fn handle_find(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_find_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_find_impl(matches: &ArgMatches) -> BbResult<()> {
    let page_url = matches
        .get_one::<String>("page-url")
        .ok_or_else(|| BbError::InvalidInput("Page URL is required".to_string()))?;
    let search_text = matches
        .get_one::<String>("search")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let format = matches.get_one::<String>("format").map(|s| s.as_str()).unwrap_or("table");

    let context = CliContext::load(page_url).with_context(|| format!("Opening {}", page_url))?;
    let presenter = context.presenter();
    let session = context.session();
    let states = context.client().location().allowed_states().to_vec();

    if states.is_empty() {
        eprintln!(
            "{}",
            "The page URL has no status filter, so no issue can match.".yellow()
        );
    }

    let issues = match context
        .collector()
        .collect(&search_text, |progress| presenter.show_progress(progress))
        .await
    {
        Ok(issues) => issues,
        Err(e) => return Err(report_collect_failure(presenter.as_ref(), e)),
    };

    if format == "json" {
        print_issues(&issues, "json");
        return Ok(());
    }

    presenter.render_rows(&issues, &session);

    let listener_session = session.clone();
    session.register_change_listener(move |element| {
        tracing::debug!(
            "Row {} changed, bulk actions {}",
            element.issue_id,
            if action_enabled(&listener_session.get()) { "enabled" } else { "disabled" }
        );
    });

    presenter.show_modal(results_modal(issues, &search_text, &states));

    if matches.get_flag("delete") {
        let mut rows = presenter.rows();
        if rows.is_empty() {
            return Ok(());
        }

        let toggle = session.select_all(&mut rows, true);
        presenter.update_rows(&rows);
        presenter.set_header_toggle(toggle);

        if presenter.header_toggle().checked {
            println!("Deleting all {} listed issues...", rows.len());
        } else {
            println!("Deleting {} issues...", session.selected_issues().len());
        }
        let result = context.executor().execute(session.selected_issues()).await?;

        if !result.errors.is_empty() {
            return Err(BbError::Unknown(format!(
                "{} of {} deletions failed",
                result.errors.len(),
                result.errors.len() + result.success.len()
            )));
        }
    }

    Ok(())
}
