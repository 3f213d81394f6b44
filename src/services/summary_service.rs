use tracing::{debug, info};

use crate::api::transaction_gateway::{ApiError, TransactionPageSource, TransactionQuery};
use crate::models::summary::TransactionSummary;

/// Fetch every page of a customer's transaction history and aggregate the
/// risk-status tallies.
///
/// Pages are requested strictly one at a time. The offset cursor starts
/// unset; each page's continuation token replaces it, and the first page
/// without a token ends the loop. Any fetch or decode error aborts the loop
/// and propagates to the caller with no partial summary.
pub async fn collect_transaction_summary<S>(
    source: &S,
    mut query: TransactionQuery,
) -> Result<TransactionSummary, ApiError>
where
    S: TransactionPageSource + ?Sized,
{
    let mut summary = TransactionSummary::default();

    loop {
        let page = source.fetch_page(&query).await?;
        let digest = summary.absorb_page(&page);

        info!("page #: {}", summary.pages_received);
        info!("transactions this response: {}", digest.record_count);
        info!("risk statuses in this page: {:?}", digest.risk_statuses);

        match page.next_offset() {
            Some(token) => {
                debug!("next offset_identifier: {}", token);
                query.offset_identifier = Some(token);
            }
            None => break,
        }
    }

    Ok(summary)
}
