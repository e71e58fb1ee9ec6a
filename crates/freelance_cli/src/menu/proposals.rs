use crate::menu::{pick_action, settle, ActionError, ActionResult, Confirmer};
use crate::prompt::{PromptResult, Prompter};
use crate::render;
use freelance_core::model::proposal::{Proposal, ProposalDraft};
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::repo::proposal_repo::SqliteProposalRepository;
use freelance_core::service::proposal_service::ProposalService;
use freelance_core::validation::parse_optional_date;
use freelance_core::Outcome;
use log::warn;
use rusqlite::Connection;
use std::io::{BufRead, Write};

type Service<'conn> = ProposalService<SqliteProposalRepository<'conn>, SqliteClientRepository<'conn>>;

const ACTIONS: [&str; 5] = [
    "Create proposal",
    "List proposals",
    "View proposal",
    "Update proposal",
    "Delete proposal",
];

pub(crate) fn run<R: BufRead, W: Write>(
    conn: &Connection,
    prompt: &mut Prompter<R, W>,
) -> PromptResult<()> {
    let service = ProposalService::new(
        SqliteProposalRepository::new(conn),
        SqliteClientRepository::new(conn),
    );
    while let Some(action) = pick_action(prompt, "Proposals", &ACTIONS, "Back")? {
        let result = match action {
            0 => create(&service, prompt),
            1 => list(&service, prompt),
            2 => view(&service, prompt),
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

    let draft = ask_draft(prompt)?;
    let id = service.create_proposal(&client_id, draft)?;
    prompt.say(format!("Proposal created with id {id}"))?;
    Ok(())
}

fn list<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let proposals = service.list_proposals()?;
    if proposals.is_empty() {
        prompt.say("No proposals registered.")?;
    } else {
        prompt.say(render::proposals(&proposals))?;
    }
    Ok(())
}

fn view<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let Some(id) = pick_proposal(service, prompt, "Proposal to view")? else {
        return Ok(());
    };
    let proposal = service.view_proposal(&id)?;
    match render::proposal_detail(&proposal) {
        Ok(detail) => prompt.say(detail)?,
        Err(err) => {
            warn!("event=proposal_render module=cli status=error error={err}");
            prompt.say(&proposal.content)?
        }
    }
    Ok(())
}

fn update<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let Some(id) = pick_proposal(service, prompt, "Proposal to update")? else {
        return Ok(());
    };
    let draft = ask_draft(prompt)?;
    let updated = service.update_proposal(&id, draft)?;
    prompt.say(format!("Proposal {} updated.", updated.id))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(service: &Service<'_>, prompt: &mut Prompter<R, W>) -> ActionResult {
    let Some(id) = pick_proposal(service, prompt, "Proposal to delete")? else {
        return Ok(());
    };

    let mut confirmer = Confirmer::new(prompt);
    let outcome = service.delete_proposal(&id, |proposal| {
        confirmer.ask(&format!("Delete proposal `{}`?", proposal.title))
    });
    confirmer.finish()?;

    match outcome? {
        Outcome::Applied(proposal) => prompt.say(format!("Proposal {} deleted.", proposal.id))?,
        Outcome::Cancelled => prompt.say("Deletion cancelled.")?,
    }
    Ok(())
}

/// Lets the user pick from the stored proposals; `None` when there are
/// none or the pick was cancelled.
fn pick_proposal<R: BufRead, W: Write>(
    service: &Service<'_>,
    prompt: &mut Prompter<R, W>,
    label: &str,
) -> Result<Option<String>, ActionError> {
    let proposals = service.list_proposals()?;
    if proposals.is_empty() {
        prompt.say("No proposals registered.")?;
        return Ok(None);
    }
    Ok(prompt
        .choose(label, &proposals, describe)?
        .map(|proposal| proposal.id.to_string()))
}

fn ask_draft<R: BufRead, W: Write>(prompt: &mut Prompter<R, W>) -> PromptResult<ProposalDraft> {
    Ok(ProposalDraft {
        title: prompt.ask_required("Title")?,
        content: prompt.ask_multiline("Content")?,
        date: prompt.ask_parsed("Date (YYYY-MM-DD, blank for none)", parse_optional_date)?,
    })
}

fn describe(proposal: &Proposal) -> String {
    format!("{} ({})", proposal.title, proposal.client_name)
}
