use clap::ArgMatches;

use crate::cli_context::CliContext;
use crate::error::{BbError, BbResult, ErrorContext};
use crate::formatting::parse_issue_ids;
use crate::models::IssueId;
use crate::presentation::Presenter;

fn page_and_ids(matches: &ArgMatches) -> BbResult<(String, Vec<IssueId>)> {
    let page_url = matches
        .get_one::<String>("page-url")
        .ok_or_else(|| BbError::InvalidInput("Page URL is required".to_string()))?
        .clone();

    let ids = matches
        .get_many::<String>("ids")
        .map(|values| parse_issue_ids(values))
        .unwrap_or_else(|| Ok(Vec::new()))
        .map_err(BbError::InvalidInput)?;

    if ids.is_empty() {
        return Err(BbError::InvalidInput("No issue IDs provided".to_string()));
    }

    Ok((page_url, ids))
}

pub async fn handle_bulk_delete(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_bulk_delete_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_bulk_delete_impl(matches: &ArgMatches) -> BbResult<()> {
    let (page_url, ids) = page_and_ids(matches)?;
    let context = CliContext::load(&page_url).with_context(|| format!("Opening {}", page_url))?;
    let presenter = context.presenter();
    let session = context.session();

    presenter.render_ids(&ids, &session);
    let mut rows = presenter.rows();
    let toggle = session.select_all(&mut rows, true);
    presenter.update_rows(&rows);
    presenter.set_header_toggle(toggle);

    if presenter.header_toggle().checked {
        println!("Deleting all {} listed issues...", ids.len());
    } else {
        println!("Deleting {} issues...", session.selected_issues().len());
    }
    let result = context.executor().execute(session.selected_issues()).await?;

    if !result.errors.is_empty() {
        return Err(BbError::Unknown(format!(
            "{} of {} deletions failed",
            result.errors.len(),
            ids.len()
        )));
    }

    Ok(())
}

pub async fn handle_bulk_spam(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let (page_url, ids) = page_and_ids(matches)?;
    let context = CliContext::load(&page_url)?;

    context.executor().mark_as_spam(ids);
    Ok(())
}
