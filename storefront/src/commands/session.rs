use std::str::FromStr;

use storefront_config::Config;
use storefront_core_contact_contracts::ContactFormFeatureService;
use storefront_models::contact::{ContactFormField, UnknownContactFormField};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::{environment, view};

const HELP: &str = "\
Commands:
  set <field> <value>  enter a value (fields: name, email, subject, message)
  touch <field>        mark a field as visited
  show                 print the form
  submit               validate and download the form
  cancel               clear the form
  help                 print this help
  quit                 leave the session
";

/// Fills in the contact form interactively, one command per line.
#[derive(Debug)]
pub struct SessionCommand;

impl SessionCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let service = environment::contact_feature(&config);
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        stdout.write_all(HELP.as_bytes()).await?;
        run(&service, stdin, &mut stdout).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Set(ContactFormField, String),
    Touch(ContactFormField),
    Show,
    Submit,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum InputError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing field")]
    MissingField,
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl From<UnknownContactFormField> for InputError {
    fn from(value: UnknownContactFormField) -> Self {
        Self::UnknownField(value.0)
    }
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_start();
        let (command, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let field = |rest: &str| -> Result<ContactFormField, InputError> {
            match rest.trim() {
                "" => Err(InputError::MissingField),
                field => Ok(field.parse()?),
            }
        };

        match command {
            "set" => {
                let rest = rest.trim_start();
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Self::Set(field(name)?, value.into()))
            }
            "touch" => Ok(Self::Touch(field(rest)?)),
            "show" => Ok(Self::Show),
            "submit" => Ok(Self::Submit),
            "cancel" => Ok(Self::Cancel),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(InputError::UnknownCommand(command.into())),
        }
    }
}

/// Reads commands from `input` until it is exhausted or `quit` is entered.
pub async fn run(
    service: &impl ContactFormFeatureService,
    input: impl AsyncBufRead + Unpin,
    out: &mut (impl AsyncWrite + Unpin),
) -> anyhow::Result<()> {
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match line.parse::<Input>() {
            Ok(Input::Set(field, value)) => {
                service.set_field(field, value).await;
                continue;
            }
            Ok(Input::Touch(field)) => {
                service.touch(field).await;
                continue;
            }
            Ok(Input::Show) => view::render(&service.snapshot().await),
            Ok(Input::Submit) => {
                if let Err(err) = service.submit().await {
                    tracing::debug!("submission failed: {err}");
                }
                view::render(&service.snapshot().await)
            }
            Ok(Input::Cancel) => {
                service.cancel().await;
                view::render(&service.snapshot().await)
            }
            Ok(Input::Help) => HELP.into(),
            Ok(Input::Quit) => break,
            Err(err) => format!("{err}\n"),
        };
        out.write_all(output.as_bytes()).await?;
        out.flush().await?;
    }

    Ok(())
}
