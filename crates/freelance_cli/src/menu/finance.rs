use crate::menu::{pick_action, settle, show_rows, ActionResult};
use crate::prompt::{PromptResult, Prompter};
use crate::render;
use freelance_core::model::finance::{MovementDraft, MovementKind};
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::repo::finance_repo::SqliteFinanceRepository;
use freelance_core::service::client_service::ClientService;
use freelance_core::service::finance_service::FinanceService;
use freelance_core::validation::{parse_amount, parse_date, parse_month, parse_year};
use freelance_core::ValidationError;
use rusqlite::Connection;
use std::io::{BufRead, Write};

type Service<'conn> = FinanceService<SqliteFinanceRepository<'conn>, SqliteClientRepository<'conn>>;

const ACTIONS: [&str; 6] = [
    "Record movement",
    "List movements",
    "Filter movements",
    "Balance",
    "Update movement",
    "Delete movement",
];

/// Kind filter choices; `None` means every kind.
const KIND_FILTERS: [Option<MovementKind>; 3] =
    [None, Some(MovementKind::Income), Some(MovementKind::Expense)];

pub(crate) fn run<R: BufRead, W: Write>(
    conn: &Connection,
    prompt: &mut Prompter<R, W>,
) -> PromptResult<()> {
    let clients = SqliteClientRepository::new(conn);
    let service = FinanceService::new(SqliteFinanceRepository::new(conn), clients);
    while let Some(action) = pick_action(prompt, "Finances", &ACTIONS, "Back")? {
        let result = match action {
            0 => create(&service, &ClientService::new(clients), prompt),
            1 => list(&service, prompt),
            2 => filter(&service, prompt),
            3 => balance(&service, prompt),
            4 => update(&service, prompt),
            _ => delete(&service, prompt),
        };
        settle(prompt, result)?;
    }
    Ok(())
}

fn create<R: BufRead, W: Write>(
    service: &Service<'_>,
    clients: &ClientService<SqliteClientRepository<'_>>,
    prompt: &mut Prompter<R, W>,
) -> ActionResult {
    let Some(draft) = ask_draft(prompt)? else {
        return Ok(());
    };

    let known = clients.list_clients()?;
    let client_id = if known.is_empty() || !prompt.confirm("Link a client?")? {
        None
    } else {
        prompt
            .choose("Client", &known, |client| client.name.clone())?
            .map(|client| client.id.to_string())
    };

    let id = service.create_movement(draft, client_id.as_deref())?;
    prompt.say(format!("Movement recorded with id {id}"))?;
    Ok(())
}

fn list<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let movements = service.list_movements()?;
    show_rows(
        prompt,
        movements.len(),
        render::movements(&movements),
        "No movements recorded.",
    )?;
    Ok(())
}

fn filter<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let Some(kind) = prompt
        .choose("Type", &KIND_FILTERS, |kind| match kind {
            Some(kind) => kind.to_string(),
            None => "all".to_string(),
        })?
        .copied()
    else {
        return Ok(());
    };
    let month = prompt.ask_parsed("Month 1-12 (blank for any)", parse_month)?;
    let year = prompt.ask_parsed("Year (blank for any)", parse_year)?;

    let movements = service.filter_movements(kind, month, year)?;
    show_rows(
        prompt,
        movements.len(),
        render::movements(&movements),
        "No movements in that period.",
    )?;
    Ok(())
}

fn balance<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let year = prompt.ask_parsed("Year", |raw| {
        parse_year(raw).and_then(|year| year.ok_or(ValidationError::Required("year")))
    })?;
    let month = prompt.ask_parsed("Month 1-12 (blank for whole year)", parse_month)?;

    let totals = service.balance(year, month)?;
    prompt.say(render::balance(&totals))?;
    Ok(())
}

fn update<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Movement id")?;
    let current = service.get_movement(&id)?;
    prompt.say(render::movements(std::slice::from_ref(&current)))?;

    let Some(draft) = ask_draft(prompt)? else {
        return Ok(());
    };
    let updated = service.update_movement(&id, draft)?;
    prompt.say(format!("Movement {} updated.", updated.id))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Movement id")?;
    let deleted = service.delete_movement(&id)?;
    prompt.say(format!("Movement {} deleted.", deleted.id))?;
    Ok(())
}

fn ask_draft<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
) -> PromptResult<Option<MovementDraft>> {
    let Some(kind) = prompt
        .choose("Type", &MovementKind::ALL, |kind| kind.to_string())?
        .copied()
    else {
        return Ok(None);
    };
    Ok(Some(MovementDraft {
        kind,
        description: prompt.ask("Description")?,
        amount: prompt.ask_parsed("Amount", parse_amount)?,
        date: prompt.ask_parsed("Date (YYYY-MM-DD)", parse_date)?,
    }))
}
