//! Aggregate state for the risk-status summary

use std::collections::BTreeSet;

use crate::api::transaction_gateway::TransactionPage;

/// Risk evaluation outcomes the tally recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskStatus {
    Success,
    NotImplemented,
    Failed,
    InProgress,
}

impl RiskStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "SUCCESS" => Some(RiskStatus::Success),
            "NOT_IMPLEMENTED" => Some(RiskStatus::NotImplemented),
            "FAILED" => Some(RiskStatus::Failed),
            "IN_PROGRESS" => Some(RiskStatus::InProgress),
            _ => None,
        }
    }
}

/// Counters for the recognized risk statuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskStatusCounts {
    pub success: u64,
    pub not_implemented: u64,
    pub failed: u64,
    pub in_progress: u64,
}

impl RiskStatusCounts {
    /// Tally one risk status. Values outside the recognized set increment
    /// nothing here; callers keep them in the totals.
    pub fn record(&mut self, raw: &str) {
        match RiskStatus::parse(raw) {
            Some(RiskStatus::Success) => self.success += 1,
            Some(RiskStatus::NotImplemented) => self.not_implemented += 1,
            Some(RiskStatus::Failed) => self.failed += 1,
            Some(RiskStatus::InProgress) => self.in_progress += 1,
            None => {}
        }
    }
}

/// What one page contributed, for the per-page log lines
#[derive(Debug)]
pub struct PageDigest {
    pub record_count: usize,
    pub risk_statuses: BTreeSet<String>,
}

/// Running aggregate over all pages of one invocation
#[derive(Debug, Default)]
pub struct TransactionSummary {
    pub pages_received: u64,
    pub transactions_received: u64,
    pub counts: RiskStatusCounts,
    pub risk_statuses_seen: BTreeSet<String>,
}

impl TransactionSummary {
    /// Fold one page into the aggregate and report what it contributed
    pub fn absorb_page(&mut self, page: &TransactionPage) -> PageDigest {
        let mut page_statuses = BTreeSet::new();

        for record in &page.page_content {
            let risk_status = record.order_statuses.risk_status.as_str();
            self.counts.record(risk_status);
            page_statuses.insert(risk_status.to_string());
        }

        self.pages_received += 1;
        self.transactions_received += page.page_content.len() as u64;
        self.risk_statuses_seen
            .extend(page_statuses.iter().cloned());

        PageDigest {
            record_count: page.page_content.len(),
            risk_statuses: page_statuses,
        }
    }

    /// Render the final summary block with right-aligned labels
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("        total pages: {}\n", self.pages_received));
        output.push('\n');
        output.push_str(&format!("            SUCCESS: {}\n", self.counts.success));
        output.push_str(&format!(
            "    NOT_IMPLEMENTED: {}\n",
            self.counts.not_implemented
        ));
        output.push_str(&format!("             FAILED: {}\n", self.counts.failed));
        output.push_str(&format!(
            "        IN_PROGRESS: {}\n",
            self.counts.in_progress
        ));
        output.push_str("                     ----\n");
        output.push_str(&format!(
            " total transactions: {}",
            self.transactions_received
        ));

        output
    }
}
