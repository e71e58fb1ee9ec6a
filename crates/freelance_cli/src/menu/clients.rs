use crate::menu::{pick_action, settle, show_rows, ActionResult, Confirmer};
use crate::prompt::{PromptResult, Prompter};
use crate::render;
use freelance_core::model::client::{Client, ClientCriterion, ClientField};
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::service::client_service::ClientService;
use freelance_core::Outcome;
use rusqlite::Connection;
use std::io::{BufRead, Write};

type Service<'conn> = ClientService<SqliteClientRepository<'conn>>;

const ACTIONS: [&str; 5] = [
    "Create client",
    "List clients",
    "Search clients",
    "Update client",
    "Delete client",
];

pub(crate) fn run<R: BufRead, W: Write>(
    conn: &Connection,
    prompt: &mut Prompter<R, W>,
) -> PromptResult<()> {
    let service = ClientService::new(SqliteClientRepository::new(conn));
    while let Some(action) = pick_action(prompt, "Clients", &ACTIONS, "Back")? {
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
    let name = prompt.ask("Name")?;
    let email = prompt.ask("Email")?;
    let phone = prompt.ask("Phone")?;

    let id = service.create_client(&name, &email, &phone)?;
    prompt.say(format!("Client created with id {id}"))?;
    Ok(())
}

fn list<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let clients = service.list_clients()?;
    show_rows(prompt, clients.len(), render::clients(&clients), "No clients registered.")?;
    Ok(())
}

fn search<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let Some(criterion) = ask_criterion(prompt)? else {
        return Ok(());
    };
    let value = prompt.ask(&format!("Search by {criterion}"))?;

    let clients = service.search_clients(criterion, &value)?;
    show_rows(prompt, clients.len(), render::clients(&clients), "No clients found.")?;
    Ok(())
}

fn update<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let Some(criterion) = ask_criterion(prompt)? else {
        return Ok(());
    };
    let value = prompt.ask(&format!("Find client by {criterion}"))?;

    // Fails before any field prompt when nothing matches. The service repeats
    // this lookup; `chosen` answers its selection step.
    let matches = service.find_update_targets(criterion, &value)?;
    let chosen = if matches.len() > 1 {
        prompt.say("Several clients match.")?;
        match prompt.choose("Which client?", &matches, describe)? {
            Some(client) => Some(client.id),
            None => return Ok(()),
        }
    } else {
        None
    };

    let Some(field) = prompt
        .choose("Field to change", &ClientField::ALL, |field| field.to_string())?
        .copied()
    else {
        return Ok(());
    };
    let new_value = prompt.ask(&format!("New {field}"))?;

    match service.update_client(criterion, &value, field, &new_value, |_| chosen)? {
        Outcome::Applied(client) => prompt.say(format!("Client {} updated.", client.id))?,
        Outcome::Cancelled => prompt.say("Update cancelled.")?,
    }
    Ok(())
}

fn delete<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let id = prompt.ask("Client id")?;

    let mut confirmer = Confirmer::new(prompt);
    let outcome =
        service.delete_client(&id, |client| confirmer.ask(&format!("Delete client `{}`?", client.name)));
    confirmer.finish()?;

    match outcome? {
        Outcome::Applied(client) => prompt.say(format!("Client {} deleted.", client.id))?,
        Outcome::Cancelled => prompt.say("Deletion cancelled.")?,
    }
    Ok(())
}

fn ask_criterion<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
) -> PromptResult<Option<ClientCriterion>> {
    Ok(prompt
        .choose("Search by", &ClientCriterion::ALL, |criterion| criterion.to_string())?
        .copied())
}

fn describe(client: &Client) -> String {
    format!("{} <{}> ({})", client.name, client.email, client.id)
}

#[cfg(test)]
mod tests {
    use super::update;
    use crate::menu::ActionError;
    use crate::prompt::Prompter;
    use freelance_core::db::open_db_in_memory;
    use freelance_core::repo::client_repo::SqliteClientRepository;
    use freelance_core::service::client_service::ClientService;
    use freelance_core::ServiceError;
    use std::io::Cursor;

    #[test]
    fn update_stops_before_field_prompt_when_nothing_matches() {
        let conn = open_db_in_memory().unwrap();
        let service = ClientService::new(SqliteClientRepository::new(&conn));
        service.create_client("Ana", "ana@x.com", "5551234").unwrap();

        let mut output = Vec::new();
        let mut prompt = Prompter::new(Cursor::new(b"1\nNobody\n".to_vec()), &mut output);
        let result = update(&service, &mut prompt);
        drop(prompt);

        assert!(matches!(
            result,
            Err(ActionError::Service(ServiceError::NoMatches { .. }))
        ));
        let printed = String::from_utf8(output).unwrap();
        assert!(!printed.contains("Field to change"));
    }
}
