//! Plain-text tables and summaries for records returned by the core.

use chrono::NaiveDate;
use freelance_core::model::client::Client;
use freelance_core::model::contract::Contract;
use freelance_core::model::deliverable::Deliverable;
use freelance_core::model::finance::{Balance, FinancialMovement};
use freelance_core::model::project::Project;
use freelance_core::model::proposal::Proposal;

const DUE_DATE_UNSPECIFIED: &str = "unspecified";
const EMPTY_CELL: &str = "-";

/// Left-aligned text table sized to its widest cells.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        let mut lines = vec![format_row(&header, &widths), format_row(&rule, &widths)];
        lines.extend(self.rows.iter().map(|row| format_row(row, &widths)));
        lines.join("\n")
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn amount(value: f64) -> String {
    format!("${value:.2}")
}

fn due_date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| DUE_DATE_UNSPECIFIED.to_string(), |date| date.to_string())
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

/// Single-line preview of long free text.
fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

pub fn clients(clients: &[Client]) -> String {
    let mut table = Table::new(&["ID", "Name", "Email", "Phone"]);
    for client in clients {
        table.row(vec![
            client.id.to_string(),
            client.name.clone(),
            client.email.clone(),
            client.phone.clone(),
        ]);
    }
    table.render()
}

pub fn contracts(contracts: &[Contract]) -> String {
    let mut table = Table::new(&[
        "ID",
        "Client",
        "Freelancer",
        "Project",
        "Type",
        "Status",
        "Start",
        "Amount",
    ]);
    for contract in contracts {
        table.row(vec![
            contract.id.to_string(),
            contract.client_name.clone(),
            contract.freelancer_name.clone(),
            contract.project_name.clone(),
            contract.kind.to_string(),
            contract.status.to_string(),
            contract.start_date.to_string(),
            amount(contract.amount),
        ]);
    }
    table.render()
}

pub fn projects(projects: &[Project]) -> String {
    let mut table = Table::new(&["ID", "Title", "Contract", "Status", "Description"]);
    for project in projects {
        table.row(vec![
            project.id.to_string(),
            project.title.clone(),
            project.contract_title.clone(),
            project.status.to_string(),
            preview(&project.description, 40),
        ]);
    }
    table.render()
}

pub fn deliverables(deliverables: &[Deliverable]) -> String {
    let mut table = Table::new(&["ID", "Title", "Project", "Client", "Due date"]);
    for deliverable in deliverables {
        table.row(vec![
            deliverable.id.to_string(),
            deliverable.title.clone(),
            deliverable.project_title.clone(),
            optional(deliverable.client_name.as_deref()),
            due_date(deliverable.due_date),
        ]);
    }
    table.render()
}

pub fn proposals(proposals: &[Proposal]) -> String {
    let mut table = Table::new(&["ID", "Title", "Client", "Date"]);
    for proposal in proposals {
        table.row(vec![
            proposal.id.to_string(),
            proposal.title.clone(),
            proposal.client_name.clone(),
            proposal
                .date
                .map_or_else(|| EMPTY_CELL.to_string(), |date| date.to_string()),
        ]);
    }
    table.render()
}

/// Full proposal record as indented JSON, content included.
pub fn proposal_detail(proposal: &Proposal) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(proposal)
}

pub fn movements(movements: &[FinancialMovement]) -> String {
    let mut table = Table::new(&["ID", "Date", "Type", "Amount", "Client", "Description"]);
    for movement in movements {
        table.row(vec![
            movement.id.to_string(),
            movement.date.to_string(),
            movement.kind.to_string(),
            amount(movement.amount),
            optional(movement.client_name.as_deref()),
            movement.description.clone(),
        ]);
    }
    table.render()
}

pub fn balance(balance: &Balance) -> String {
    format!(
        "Income:  {}\nExpense: {}\nBalance: {}",
        amount(balance.income),
        amount(balance.expense),
        amount(balance.balance)
    )
}
