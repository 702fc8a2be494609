//! Terminal front for the account forms.
//!
//! Interactive mode prompts for each field until it passes its rules.
//! `--json <register|login>` checks a payload read from stdin and prints the
//! report.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use inquire::{Password as PasswordPrompt, Select, Text};
use log::info;
use serde_json::Value;

use watchlist_forms::forms::{validate_form, FormKind, LoginForm, RegistrationForm};
use watchlist_forms::validation::{EmailRules, PasswordRules, Rules, UsernameRules, Validator};

fn main() -> Result<ExitCode> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => interactive(),
        [flag, form] if flag == "--json" => check_json(parse_form_kind(form)?),
        _ => bail!("usage: watchlist-forms [--json <register|login>]"),
    }
}

fn parse_form_kind(name: &str) -> Result<FormKind> {
    match name {
        "register" => Ok(FormKind::Registration),
        "login" => Ok(FormKind::Login),
        other => bail!("unknown form '{}', expected 'register' or 'login'", other),
    }
}

fn check_json(kind: FormKind) -> Result<ExitCode> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read the payload from stdin")?;

    let payload: Value = serde_json::from_str(&input).context("Payload is not valid JSON")?;
    let report = validate_form(kind, &payload)?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn interactive() -> Result<ExitCode> {
    let kind = Select::new("Which form?", vec![FormKind::Registration, FormKind::Login]).prompt()?;

    let email = prompt_field::<EmailRules>("Email:", false)?;

    match kind {
        FormKind::Registration => {
            let username = prompt_field::<UsernameRules>("Username:", false)?;
            let password = prompt_field::<PasswordRules>("Password:", true)?;

            let payload = serde_json::json!({
                "email": email,
                "password": password,
                "username": username,
            });
            let form = RegistrationForm::try_from_payload(&payload)?;
            println!("Ready to sign up {} <{}>", form.username, form.email);
        }
        FormKind::Login => {
            let password = loop {
                let password = PasswordPrompt::new("Password:")
                    .without_confirmation()
                    .prompt()?;
                if !password.is_empty() {
                    break password;
                }
                println!("  - {}", PasswordRules::EMPTY);
            };

            let payload = serde_json::json!({ "email": email, "password": password });
            let form = LoginForm::try_from_payload(&payload)?;
            println!("Ready to log in as {}", form.email);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Prompts until the value passes the rules of `R`, reusing one validator
/// across attempts
fn prompt_field<R: Rules>(message: &str, secret: bool) -> Result<String> {
    let mut validator = Validator::<R>::new(String::new());

    loop {
        let value = if secret {
            PasswordPrompt::new(message).without_confirmation().prompt()?
        } else {
            Text::new(message).prompt()?
        };

        if validator.set_candidate(value).is_valid() {
            info!("{} accepted", R::FIELD);
            return Ok(validator.candidate().to_owned());
        }

        for error in validator.errors() {
            println!("  - {}", error);
        }
    }
}
