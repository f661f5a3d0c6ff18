//! Subcommand handlers.
//!
//! DESIGN
//! ======
//! Every handler drives the same workflow state machine the browser view
//! uses, so validation, identity checks and notices behave identically.
//! Results go to stdout as pretty JSON; notices and prompts go to stderr.

use std::io::{self, BufRead, Write};

use cloudlab::workflow::notice::{self, Notice};
use cloudlab::workflow::{ExperimentForm, ExperimentList, OngoingExperiment, VariableDraft};
use cloudlab::{ExperimentClient, Goal, Session, Transport};
use serde_json::{Value, json};

use crate::error::CliError;

pub struct CreateArgs {
    pub name: String,
    pub goal: Goal,
    pub population_size: String,
    pub variables: Vec<VariableDraft>,
}

pub async fn run_create<T: Transport>(
    client: &ExperimentClient<T>,
    session: &Session,
    args: CreateArgs,
) -> Result<(), CliError> {
    let mut form = ExperimentForm {
        name: args.name,
        goal: args.goal,
        population_size: args.population_size,
        variables: args.variables.into_iter().collect(),
        ..ExperimentForm::new()
    };
    let outcome = form.submit(client, session).await;
    report(form.notice.as_ref());
    let experiment_id = outcome?;
    print_json(&json!({ "experimentId": experiment_id }))
}

pub async fn run_list<T: Transport>(client: &ExperimentClient<T>, session: &Session) -> Result<(), CliError> {
    let mut list = ExperimentList::new();
    let outcome = list.load(client, session).await;
    report(list.notice.as_ref());
    outcome?;
    if list.is_empty() {
        eprintln!("{}", notice::LIST_EMPTY);
    }
    let experiments: Vec<_> = list.items.iter().map(|entry| &entry.experiment).collect();
    print_json(&serde_json::to_value(experiments)?)
}

pub async fn run_show<T: Transport>(client: &ExperimentClient<T>, experiment_id: &str) -> Result<(), CliError> {
    let view = load(client, experiment_id).await?;
    if let Some(experiment) = &view.experiment {
        if experiment.population.is_empty() {
            eprintln!("{}", notice::POPULATION_EMPTY);
        }
        print_json(&serde_json::to_value(experiment)?)?;
    }
    Ok(())
}

pub async fn run_delete<T: Transport>(
    client: &ExperimentClient<T>,
    experiment_id: &str,
    confirmed: bool,
) -> Result<(), CliError> {
    let mut list = ExperimentList::new();
    list.request_delete(experiment_id);
    if !confirmed && !confirm(&format!("Delete experiment `{experiment_id}`? [y/N] "))? {
        list.cancel_delete();
        eprintln!("Delete cancelled.");
        return Ok(());
    }
    let outcome = list.confirm_delete(client).await;
    report(list.notice.as_ref());
    outcome?;
    print_json(&json!({ "deleted": experiment_id }))
}

/// Fetch the current generation, score it row by row, and print the next one.
pub async fn run_advance<T: Transport>(
    client: &ExperimentClient<T>,
    experiment_id: &str,
    scores: &[String],
) -> Result<(), CliError> {
    let mut view = load(client, experiment_id).await?;
    if scores.len() != view.fitness.len() {
        return Err(CliError::ScoreCount { expected: view.fitness.len(), found: scores.len() });
    }
    for (index, score) in scores.iter().enumerate() {
        view.set_fitness(index, score.trim());
    }
    let outcome = view.advance(client).await;
    report(view.notice.as_ref());
    outcome?;

    let population = view.experiment.as_ref().map(|experiment| experiment.population.clone());
    let prefilled: Option<Vec<f64>> = view.fitness.complete().filter(|scores| !scores.is_empty());
    print_json(&json!({
        "experimentId": view.experiment_id(),
        "population": population,
        "fitnessScores": prefilled,
    }))
}

async fn load<T: Transport>(client: &ExperimentClient<T>, experiment_id: &str) -> Result<OngoingExperiment, CliError> {
    let mut view = OngoingExperiment::new(experiment_id);
    let outcome = view.load(client, experiment_id).await;
    report(view.notice.as_ref());
    outcome?;
    Ok(view)
}

fn report(shown: Option<&Notice>) {
    if let Some(shown) = shown {
        eprintln!("{}", shown.message);
    }
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
