//! Interactive menu shell.
//!
//! # Responsibility
//! - Route the main menu to one submenu per collection.
//! - Turn operation failures into printed messages and keep looping.
//!
//! # Invariants
//! - Only prompt i/o failures leave the loop; service errors never do.

mod clients;
mod contracts;
mod deliverables;
mod finance;
mod projects;
mod proposals;

use crate::prompt::{PromptError, PromptResult, Prompter};
use freelance_core::{ServiceError, ValidationError};
use log::{info, warn};
use rusqlite::Connection;
use std::io::{BufRead, Write};

const MAIN_MENU: [&str; 6] = [
    "Clients",
    "Proposals",
    "Projects",
    "Contracts",
    "Deliverables",
    "Finances",
];

/// Failure of one menu action.
#[derive(Debug)]
pub(crate) enum ActionError {
    Prompt(PromptError),
    Service(ServiceError),
}

impl From<PromptError> for ActionError {
    fn from(value: PromptError) -> Self {
        Self::Prompt(value)
    }
}

impl From<ServiceError> for ActionError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<ValidationError> for ActionError {
    fn from(value: ValidationError) -> Self {
        Self::Service(ServiceError::Validation(value))
    }
}

pub(crate) type ActionResult = Result<(), ActionError>;

/// Runs the main menu until the user exits or input closes.
pub fn run<R: BufRead, W: Write>(
    conn: &Connection,
    prompt: &mut Prompter<R, W>,
) -> PromptResult<()> {
    info!("event=shell_start module=cli status=ok");
    loop {
        let Some(section) = pick_action(prompt, "Freelance ledger", &MAIN_MENU, "Exit")? else {
            info!("event=shell_exit module=cli status=ok");
            return Ok(());
        };
        match section {
            0 => clients::run(conn, prompt)?,
            1 => proposals::run(conn, prompt)?,
            2 => projects::run(conn, prompt)?,
            3 => contracts::run(conn, prompt)?,
            4 => deliverables::run(conn, prompt)?,
            _ => finance::run(conn, prompt)?,
        }
    }
}

/// Shows a numbered menu; returns the picked index or `None` for the exit
/// entry `0`.
pub(crate) fn pick_action<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    title: &str,
    entries: &[&str],
    exit_label: &str,
) -> PromptResult<Option<usize>> {
    prompt.say("")?;
    prompt.say(format!("== {title} =="))?;
    for (index, entry) in entries.iter().enumerate() {
        prompt.say(format!("{}) {entry}", index + 1))?;
    }
    prompt.say(format!("0) {exit_label}"))?;

    let count = entries.len();
    prompt.ask_parsed("Option", |answer| match answer.parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(number) if number <= count => Ok(Some(number - 1)),
        _ => Err(format!("pick a number between 0 and {count}")),
    })
}

/// Prints a service failure and swallows it; prompt failures propagate.
pub(crate) fn settle<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    result: ActionResult,
) -> PromptResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(ActionError::Service(err)) => {
            warn!("event=action_failed module=cli status=error kind={}", error_kind(&err));
            prompt.say(format!("Error: {err}"))
        }
        Err(ActionError::Prompt(err)) => Err(err),
    }
}

/// Prompt-backed answer source for a service confirmation callback.
///
/// Callbacks cannot return prompt errors, so the first one is parked here
/// and surfaced by [`Confirmer::finish`].
pub(crate) struct Confirmer<'p, R, W> {
    prompt: &'p mut Prompter<R, W>,
    error: Option<PromptError>,
}

impl<'p, R: BufRead, W: Write> Confirmer<'p, R, W> {
    pub(crate) fn new(prompt: &'p mut Prompter<R, W>) -> Self {
        Self {
            prompt,
            error: None,
        }
    }

    pub(crate) fn ask(&mut self, question: &str) -> bool {
        match self.prompt.confirm(question) {
            Ok(answer) => answer,
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), ActionError> {
        match self.error {
            Some(err) => Err(ActionError::Prompt(err)),
            None => Ok(()),
        }
    }
}

/// Prints a table, or `empty` when there are no rows.
pub(crate) fn show_rows<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    count: usize,
    table: String,
    empty: &str,
) -> PromptResult<()> {
    if count == 0 {
        prompt.say(empty)
    } else {
        prompt.say(table)
    }
}

fn error_kind(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::Validation(_) => "validation",
        ServiceError::InvalidId(_) => "invalid_id",
        ServiceError::NotFound { .. } => "not_found",
        ServiceError::NoMatches { .. } => "no_matches",
        ServiceError::HasDependents { .. } => "has_dependents",
        ServiceError::NoClientsAvailable => "no_clients",
        ServiceError::NoContractsAvailable => "no_contracts",
        ServiceError::NoProjectsAvailable => "no_projects",
        ServiceError::Repo(_) => "store",
    }
}
