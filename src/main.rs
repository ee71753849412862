use roomgate::{
    shared::env_or, AppError, FormFields, Intent, LoggingGateway, PetNameNicknameGenerator,
    ProtocolRules, RoomAccessForm, RoomAccessRequest, RoomContext, SubmitConfig, SubmitError,
};
use serde::Deserialize;
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Form values read from stdin
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormInput {
    #[serde(flatten)]
    fields: FormFields,
    #[serde(default)]
    intent: Intent,
    #[serde(default)]
    suggest_nickname: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing; logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let outcome = run().await;
    if let Err(e) = &outcome {
        error!(error = %e, "roomgate failed");
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 when accepted, 1 when the form was refused, 2 when the run itself failed
fn exit_status(outcome: &Result<bool, AppError>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

/// JSON printed on stdout for a submission result
fn render_outcome(result: &Result<RoomAccessRequest, SubmitError>) -> serde_json::Value {
    match result {
        Ok(request) => json!({ "accepted": true, "request": request }),
        Err(SubmitError::Invalid(errors)) => json!({ "accepted": false, "fieldErrors": errors }),
        Err(e) => json!({ "accepted": false, "error": e.to_string() }),
    }
}

/// Returns whether the request was accepted
async fn run() -> Result<bool, AppError> {
    let mut config = SubmitConfig::from_env()?;
    if let Ok(path) = std::env::var("ROOMGATE_PROTOCOL_RULES") {
        config = config.with_rules(ProtocolRules::load(&PathBuf::from(path))?);
    }
    let context = RoomContext::from_existing(env_or("ROOMGATE_EXISTING_ROOM", false)?);

    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let input: FormInput = serde_json::from_str(&raw)?;

    info!(context = %context, intent = %input.intent, "Submitting room access form");

    let form = RoomAccessForm::with_config(context, Arc::new(LoggingGateway::new()), config);
    form.set_nickname(input.fields.nickname);
    form.set_room_name(input.fields.room_name);
    form.set_room_pass(input.fields.room_pass);

    if input.suggest_nickname {
        form.suggest_nickname(&PetNameNicknameGenerator::new()).await;
    }

    let result = match input.intent {
        Intent::JoinExisting => form.join().await,
        Intent::CreateNew => form.create().await,
    };

    let output = render_outcome(&result);
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(result.is_ok())
}
