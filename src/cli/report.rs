//! Summary and history CLI commands

use super::record::print_json;
use super::OutputOptions;
use crate::api::TrackerApi;
use crate::display::{format_history, format_summary};
use crate::error::TrackerResult;
use crate::store::TrackerStore;

/// Fetch both collections and print totals and balance
pub async fn handle_summary_command<A: TrackerApi>(
    store: &mut TrackerStore<A>,
    output: &OutputOptions,
) -> TrackerResult<()> {
    store.refresh().await?;
    let summary = store.summary();

    if output.json {
        print_json(&summary)
    } else {
        print!("{}", format_summary(&summary, &output.display));
        Ok(())
    }
}

/// Fetch both collections and print the most recent records
pub async fn handle_history_command<A: TrackerApi>(
    store: &mut TrackerStore<A>,
    output: &OutputOptions,
    limit: Option<usize>,
) -> TrackerResult<()> {
    store.refresh().await?;
    let entries = match limit {
        Some(limit) => store.recent_history(limit),
        None => store.transaction_history(),
    };

    if output.json {
        print_json(&entries)
    } else {
        print!("{}", format_history(&entries, &output.display));
        Ok(())
    }
}
