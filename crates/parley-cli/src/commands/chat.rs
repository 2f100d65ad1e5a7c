//! Chat command - interactive conversation loop over stdin.

use parley_client::{list_available_models, ChatSession, OllamaClient, Role};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    SwitchModel(&'a str),
    History,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Input::Message(line);
    };

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map(|(name, arg)| (name, arg.trim()))
        .unwrap_or((command, ""));

    match name {
        "quit" | "exit" => Input::Quit,
        "history" => Input::History,
        "model" if !arg.is_empty() => Input::SwitchModel(arg),
        _ => Input::Unknown(line),
    }
}

pub(crate) async fn run(client: &OllamaClient, model: Option<String>) -> miette::Result<()> {
    let model = match model {
        Some(model) => model,
        None => list_available_models()
            .first()
            .map(|m| m.to_string())
            .ok_or_else(|| miette::miette!("Model catalog is empty"))?,
    };

    let mut session = ChatSession::new(model);
    warn_if_missing(client, &session).await;

    println!("Chatting with {}. Commands: /model <name>, /history, /quit", session.model());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout()
            .flush()
            .map_err(|e| miette::miette!("Failed to write prompt: {}", e))?;

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| miette::miette!("Failed to read input: {}", e))?
        else {
            break;
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::History => print_history(&session),
            Input::SwitchModel(name) => {
                session.set_model(name);
                println!("Switched to {}", session.model());
                warn_if_missing(client, &session).await;
            }
            Input::Unknown(command) => println!("Unknown command: {}", command),
            Input::Message(text) => {
                let installed = client.list_installed_models().await;
                if let Err(e) = session.ensure_available(&installed) {
                    println!("{}", e);
                    continue;
                }

                println!("Thinking...");
                match client.send_turn(&mut session, text).await {
                    Ok(reply) => println!("{}> {}", session.model(), reply),
                    Err(e) => {
                        println!("{}", e);
                        println!("Make sure Ollama is running and the model is available!");
                    }
                }
            }
        }
    }

    Ok(())
}

async fn warn_if_missing(client: &OllamaClient, session: &ChatSession) {
    let installed = client.list_installed_models().await;
    if session.ensure_available(&installed).is_err() {
        println!(
            "Please download {} first with: parley pull {}",
            session.model(),
            session.model()
        );
    }
}

fn print_history(session: &ChatSession) {
    if session.is_empty() {
        println!("(no messages yet)");
        return;
    }
    for turn in session.turns() {
        let speaker = match turn.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("{}> {}", speaker, turn.content);
    }
}
