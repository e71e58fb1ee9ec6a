use crate::menu::{pick_action, settle, show_rows, ActionResult};
use crate::prompt::{PromptResult, Prompter};
use crate::render;
use freelance_core::model::project::{ProjectDraft, ProjectPatch, ProjectSearch, ProjectStatus};
use freelance_core::repo::contract_repo::SqliteContractRepository;
use freelance_core::repo::project_repo::SqliteProjectRepository;
use freelance_core::service::project_service::ProjectService;
use rusqlite::Connection;
use std::io::{BufRead, Write};

type Service<'conn> = ProjectService<SqliteProjectRepository<'conn>, SqliteContractRepository<'conn>>;

const ACTIONS: [&str; 5] = [
    "Create project",
    "List projects",
    "Search projects",
    "Update project",
    "Delete project",
];

pub(crate) fn run<R: BufRead, W: Write>(
    conn: &Connection,
    prompt: &mut Prompter<R, W>,
) -> PromptResult<()> {
    let service = ProjectService::new(
        SqliteProjectRepository::new(conn),
        SqliteContractRepository::new(conn),
    );
    while let Some(action) = pick_action(prompt, "Projects", &ACTIONS, "Back")? {
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
    let contracts = service.available_contracts()?;
    let Some(contract) = prompt.choose("Contract", &contracts, |contract| {
        format!("{} ({})", contract.title(), contract.client_name)
    })?
    else {
        return Ok(());
    };
    let contract_id = contract.id.to_string();

    let title = prompt.ask_required("Title")?;
    let description = prompt.ask("Description")?;
    let Some(status) = ask_status(prompt, "Status")? else {
        return Ok(());
    };

    let id = service.create_project(
        &contract_id,
        ProjectDraft {
            title,
            description,
            status,
        },
    )?;
    prompt.say(format!("Project created with id {id}"))?;
    Ok(())
}

fn list<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let projects = service.list_projects()?;
    show_rows(prompt, projects.len(), render::projects(&projects), "No projects registered.")?;
    Ok(())
}

fn search<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    prompt.say("Leave a filter blank to skip it.")?;
    let client_name = prompt.ask("Client name contains")?;
    let title = prompt.ask("Title contains")?;
    let status = ask_status(prompt, "Status (blank for any)")?;

    let projects = service.search_projects(&ProjectSearch {
        client_name: Some(client_name),
        status,
        title: Some(title),
    })?;
    show_rows(prompt, projects.len(), render::projects(&projects), "No projects found.")?;
    Ok(())
}

fn update<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Project id")?;
    let current = service.get_project(&id)?;
    prompt.say(render::projects(std::slice::from_ref(&current)))?;
    prompt.say("Leave a field blank to keep it.")?;

    let title = prompt.ask("New title")?;
    let description = prompt.ask("New description")?;
    let status = ask_status(prompt, "New status (blank to keep)")?;

    let updated = service.update_project(
        &id,
        ProjectPatch {
            title: Some(title),
            description: Some(description),
            status,
        },
    )?;
    prompt.say(format!("Project {} updated.", updated.id))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Project id")?;
    let deleted = service.delete_project(&id)?;
    prompt.say(format!("Project {} deleted.", deleted.id))?;
    Ok(())
}

fn ask_status<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    label: &str,
) -> PromptResult<Option<ProjectStatus>> {
    Ok(prompt
        .choose(label, &ProjectStatus::ALL, |status| status.to_string())?
        .copied())
}
