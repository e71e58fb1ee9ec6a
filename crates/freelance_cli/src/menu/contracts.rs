use crate::menu::{pick_action, settle, show_rows, ActionResult, Confirmer};
use crate::prompt::{PromptResult, Prompter};
use crate::render;
use freelance_core::model::contract::{
    ContractChange, ContractCriterion, ContractDraft, ContractField, ContractKind, ContractStatus,
};
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::repo::contract_repo::SqliteContractRepository;
use freelance_core::service::contract_service::ContractService;
use freelance_core::validation::{parse_amount, parse_date};
use freelance_core::Outcome;
use rusqlite::Connection;
use std::io::{BufRead, Write};

type Service<'conn> = ContractService<SqliteContractRepository<'conn>, SqliteClientRepository<'conn>>;

const ACTIONS: [&str; 5] = [
    "Create contract",
    "List contracts",
    "Search contracts",
    "Update contract",
    "Delete contract",
];

const SEARCH_FIELDS: [&str; 4] = ["client name", "freelancer name", "status", "type"];

pub(crate) fn run<R: BufRead, W: Write>(
    conn: &Connection,
    prompt: &mut Prompter<R, W>,
) -> PromptResult<()> {
    let service = ContractService::new(
        SqliteContractRepository::new(conn),
        SqliteClientRepository::new(conn),
    );
    while let Some(action) = pick_action(prompt, "Contracts", &ACTIONS, "Back")? {
        let result = match action {
            0 => create(&service, prompt),
            1 => list(&service, prompt),
            2 => search(&service, prompt),
            3 => update(&service, prompt),
            _ => delete(&service, prompt),
        };
        settle(prompt, result)?;
    }
    Ok(())
}

fn create<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let clients = service.available_clients()?;
    let Some(client) = prompt.choose("Client", &clients, |client| client.name.clone())? else {
        return Ok(());
    };
    let client_id = client.id.to_string();

    let freelancer_name = prompt.ask_required("Freelancer name")?;
    let project_name = prompt.ask_required("Project name")?;
    let Some(kind) = ask_kind(prompt)? else {
        return Ok(());
    };
    let Some(status) = ask_status(prompt)? else {
        return Ok(());
    };
    let start_date = prompt.ask_parsed("Start date (YYYY-MM-DD)", parse_date)?;
    let amount = prompt.ask_parsed("Amount (USD)", parse_amount)?;

    let id = service.create_contract(
        &client_id,
        ContractDraft {
            freelancer_name,
            project_name,
            kind,
            status,
            start_date,
            amount,
        },
    )?;
    prompt.say(format!("Contract created with id {id}"))?;
    Ok(())
}

fn list<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let contracts = service.list_contracts()?;
    show_rows(
        prompt,
        contracts.len(),
        render::contracts(&contracts),
        "No contracts registered.",
    )?;
    Ok(())
}

fn search<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let Some(field) = prompt.choose("Search by", &SEARCH_FIELDS, |field| field.to_string())? else {
        return Ok(());
    };
    let criterion = match *field {
        "client name" => ContractCriterion::ClientName(prompt.ask("Client name contains")?),
        "freelancer name" => {
            ContractCriterion::FreelancerName(prompt.ask("Freelancer name contains")?)
        }
        "status" => match ask_status(prompt)? {
            Some(status) => ContractCriterion::Status(status),
            None => return Ok(()),
        },
        _ => match ask_kind(prompt)? {
            Some(kind) => ContractCriterion::Kind(kind),
            None => return Ok(()),
        },
    };

    let contracts = service.search_contracts(criterion)?;
    show_rows(prompt, contracts.len(), render::contracts(&contracts), "No contracts found.")?;
    Ok(())
}

fn update<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Contract id")?;
    let current = service.get_contract(&id)?;
    prompt.say(render::contracts(std::slice::from_ref(&current)))?;

    let Some(field) = prompt
        .choose("Field to change", &ContractField::ALL, |field| field.to_string())?
        .copied()
    else {
        return Ok(());
    };
    let change = match field {
        ContractField::FreelancerName => {
            ContractChange::FreelancerName(prompt.ask_required("New freelancer name")?)
        }
        ContractField::ProjectName => {
            ContractChange::ProjectName(prompt.ask_required("New project name")?)
        }
        ContractField::Kind => match ask_kind(prompt)? {
            Some(kind) => ContractChange::Kind(kind),
            None => return Ok(()),
        },
        ContractField::Status => match ask_status(prompt)? {
            Some(status) => ContractChange::Status(status),
            None => return Ok(()),
        },
        ContractField::StartDate => {
            ContractChange::StartDate(prompt.ask_parsed("New start date (YYYY-MM-DD)", parse_date)?)
        }
        ContractField::Amount => {
            ContractChange::Amount(prompt.ask_parsed("New amount (USD)", parse_amount)?)
        }
    };

    let updated = service.update_contract(&id, change)?;
    prompt.say(format!("Contract {} updated.", updated.id))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Contract id")?;

    let mut confirmer = Confirmer::new(prompt);
    let outcome = service.delete_contract(&id, |contract| {
        confirmer.ask(&format!(
            "Delete contract `{}` for {}?",
            contract.title(),
            contract.client_name
        ))
    });
    confirmer.finish()?;

    match outcome? {
        Outcome::Applied(contract) => prompt.say(format!("Contract {} deleted.", contract.id))?,
        Outcome::Cancelled => prompt.say("Deletion cancelled.")?,
    }
    Ok(())
}

fn ask_kind<R: BufRead, W: Write>(prompt: &mut Prompter<R, W>) -> PromptResult<Option<ContractKind>> {
    Ok(prompt
        .choose("Contract type", &ContractKind::ALL, |kind| kind.to_string())?
        .copied())
}

fn ask_status<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
) -> PromptResult<Option<ContractStatus>> {
    Ok(prompt
        .choose("Contract status", &ContractStatus::ALL, |status| status.to_string())?
        .copied())
}
