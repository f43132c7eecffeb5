//! Interactive `verify` session: collect the file link and skillsets, then
//! hand off to the chat engine.

use super::view::{CliEngineSink, render_task_sidebar, render_workflow};
use crate::catalog;
use crate::config::Config;
use crate::llm::OpenAiClient;
use crate::ui::style;
use crate::verifier::{ChatEngine, EngineOptions, ExchangeOutcome};
use crate::workflow::WorkflowState;
use anyhow::{Context, Result, bail};
use dialoguer::{Input, MultiSelect};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// One line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Tasks,
    /// 1-based task number.
    Done(usize),
    Quit,
    Message(String),
    Unknown(String),
}

pub fn parse_chat_input(line: &str) -> ChatInput {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return ChatInput::Message(line.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("tasks"), None, None) => ChatInput::Tasks,
        (Some("quit" | "exit"), None, None) => ChatInput::Quit,
        (Some("done"), Some(n), None) => match n.parse() {
            Ok(n) if n > 0 => ChatInput::Done(n),
            _ => ChatInput::Unknown(line.to_string()),
        },
        _ => ChatInput::Unknown(line.to_string()),
    }
}

/// Fill step 1 from `link` or by prompting until a non-blank link is entered.
pub fn collect_file_link(state: &mut WorkflowState, link: Option<String>) -> Result<()> {
    let link = match link {
        Some(link) => link,
        None => {
            ensure_terminal("--link")?;
            Input::<String>::new()
                .with_prompt("  Figma File Link")
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("the link cannot be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()
                .context("Failed to read file link")?
        }
    };
    state.set_file_link(link)?;
    state.submit_file_link()?;
    Ok(())
}

/// Fill step 2 from `skills` or by prompting until at least one is picked.
pub fn collect_skillsets(state: &mut WorkflowState, skills: &[String]) -> Result<()> {
    if skills.is_empty() {
        ensure_terminal("--skill")?;
        prompt_skillsets(state)?;
    } else {
        for skill in skills {
            if !state.is_selected(skill) {
                state.toggle_skill(skill)?;
            }
        }
    }
    state.submit_skills()?;
    Ok(())
}

fn prompt_skillsets(state: &mut WorkflowState) -> Result<()> {
    let entries: Vec<_> = catalog::all_skills().collect();
    let labels: Vec<String> = entries
        .iter()
        .map(|(category, skill)| format!("{skill} {}", style::dim(format!("({category})"))))
        .collect();

    loop {
        let picked = MultiSelect::new()
            .with_prompt("  Select skillsets (space to toggle, enter to submit)")
            .items(&labels)
            .interact()
            .context("Failed to read skillset selection")?;
        if picked.is_empty() {
            println!("  {}", style::yellow("Select at least one skillset."));
            continue;
        }
        for index in picked {
            let (_, skill) = entries[index];
            state.toggle_skill(skill)?;
        }
        println!("  {}", style::dim(state.submit_skills_label()));
        return Ok(());
    }
}

fn ensure_terminal(flag: &str) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        bail!("{flag} is required in non-interactive mode");
    }
    Ok(())
}

pub async fn run_verify(config: &Config, link: Option<String>, skills: Vec<String>) -> Result<()> {
    let client = OpenAiClient::from_config(config)?;
    let session_id = format!("verify_{}", Uuid::new_v4().simple());
    info!(session = %session_id, "verification session started");

    let mut workflow = WorkflowState::new();
    println!("{}\n", render_workflow(&workflow));
    collect_file_link(&mut workflow, link)?;
    println!("\n{}\n", render_workflow(&workflow));
    collect_skillsets(&mut workflow, &skills)?;
    println!("\n{}\n", render_workflow(&workflow));

    let engine = ChatEngine::new(
        Arc::new(client),
        Arc::new(CliEngineSink::new()),
        EngineOptions::from_config(config),
        workflow.file_link(),
        workflow.selected_skills_in_catalog_order(),
    );

    println!("{}", render_task_sidebar(engine.task_phase(), &engine.tasks()));
    engine.initialize().await;
    println!("\n\n{}", render_task_sidebar(engine.task_phase(), &engine.tasks()));

    chat_loop(&engine).await?;
    info!(session = %session_id, "verification session ended");
    Ok(())
}

async fn chat_loop(engine: &ChatEngine) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        bail!("the chat step needs an interactive terminal");
    }
    loop {
        let line: String = Input::new()
            .with_prompt(style::accent("You"))
            .allow_empty(true)
            .interact_text()
            .context("Failed to read chat input")?;

        match parse_chat_input(&line) {
            ChatInput::Quit => return Ok(()),
            ChatInput::Tasks => {
                println!("{}", render_task_sidebar(engine.task_phase(), &engine.tasks()));
            }
            ChatInput::Done(number) => {
                let Some(task) = engine.tasks().into_iter().nth(number - 1) else {
                    println!("  {}", style::yellow(format!("No task {number}.")));
                    continue;
                };
                if engine.mark_task_completed(&task.id).await {
                    println!("  {} {}", style::success("✓"), task.title);
                } else {
                    println!("  {}", style::dim("Already completed."));
                }
            }
            ChatInput::Unknown(command) => {
                println!("  {}", style::yellow(format!("Unknown command: {command}")));
            }
            ChatInput::Message(text) => match engine.send(&text).await? {
                ExchangeOutcome::Ignored => {}
                ExchangeOutcome::Replied(_) => println!(),
                ExchangeOutcome::Failed(error) => {
                    debug!(%error, "exchange failed");
                    println!();
                }
            },
        }
    }
}
