use crate::menu::{pick_action, settle, show_rows, ActionResult};
use crate::prompt::{PromptResult, Prompter};
use crate::render;
use freelance_core::model::deliverable::DeliverableDraft;
use freelance_core::repo::contract_repo::SqliteContractRepository;
use freelance_core::repo::deliverable_repo::SqliteDeliverableRepository;
use freelance_core::repo::project_repo::SqliteProjectRepository;
use freelance_core::service::deliverable_service::DeliverableService;
use freelance_core::validation::parse_optional_date;
use rusqlite::Connection;
use std::io::{BufRead, Write};

type Service<'conn> = DeliverableService<
    SqliteDeliverableRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteContractRepository<'conn>,
>;

const ACTIONS: [&str; 4] = [
    "Create deliverable",
    "List deliverables",
    "Update deliverable",
    "Delete deliverable",
];

pub(crate) fn run<R: BufRead, W: Write>(
    conn: &Connection,
    prompt: &mut Prompter<R, W>,
) -> PromptResult<()> {
    let service = DeliverableService::new(
        SqliteDeliverableRepository::new(conn),
        SqliteProjectRepository::new(conn),
        SqliteContractRepository::new(conn),
    );
    while let Some(action) = pick_action(prompt, "Deliverables", &ACTIONS, "Back")? {
        let result = match action {
            0 => create(&service, prompt),
            1 => list(&service, prompt),
            2 => update(&service, prompt),
            _ => delete(&service, prompt),
        };
        settle(prompt, result)?;
    }
    Ok(())
}

fn create<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let projects = service.available_projects()?;
    let Some(project) = prompt.choose("Project", &projects, |project| project.title.clone())? else {
        return Ok(());
    };
    let project_id = project.id.to_string();

    let draft = ask_draft(prompt)?;
    let id = service.create_deliverable(&project_id, draft)?;
    prompt.say(format!("Deliverable created with id {id}"))?;
    Ok(())
}

fn list<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let deliverables = service.list_deliverables()?;
    show_rows(
        prompt,
        deliverables.len(),
        render::deliverables(&deliverables),
        "No deliverables registered.",
    )?;
    Ok(())
}

fn update<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Deliverable id")?;
    let current = service.get_deliverable(&id)?;
    prompt.say(render::deliverables(std::slice::from_ref(&current)))?;

    let draft = ask_draft(prompt)?;
    let updated = service.update_deliverable(&id, draft)?;
    prompt.say(format!("Deliverable {} updated.", updated.id))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Deliverable id")?;
    let deleted = service.delete_deliverable(&id)?;
    prompt.say(format!("Deliverable {} deleted.", deleted.id))?;
    Ok(())
}

/// Every field is asked; an update overwrites all three.
fn ask_draft<R: BufRead, W: Write>(prompt: &mut Prompter<R, W>) -> PromptResult<DeliverableDraft> {
    Ok(DeliverableDraft {
        title: prompt.ask_required("Title")?,
        description: prompt.ask("Description")?,
        due_date: prompt.ask_parsed("Due date (YYYY-MM-DD, blank for none)", parse_optional_date)?,
    })
}
