use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use serde_json::Value;

use crate::cli::utils::{output_issues, output_success, read_object};
use crate::cli::OutputFormat;
use crate::client::{ClientError, HttpProfileClient};
use crate::config::config;
use crate::editor::ProfileEditor;
use crate::profile::FormSection;
use crate::schema::profile_schema;

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show the current profile")]
    Show,

    #[command(about = "Apply a partial update to the profile")]
    Update {
        #[arg(help = "JSON object, or '-' / omitted to read stdin")]
        payload: Option<String>,
    },

    #[command(about = "Edit one form tab and submit only that tab")]
    Edit {
        #[arg(value_enum, help = "Form tab to submit")]
        tab: Tab,
        #[arg(help = "Partial profile JSON for the tab, or '-' / omitted to read stdin")]
        payload: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Tab {
    Personal,
    Bank,
    Tax,
}

impl From<Tab> for FormSection {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Personal => FormSection::Personal,
            Tab::Bank => FormSection::Bank,
            Tab::Tax => FormSection::Tax,
        }
    }
}

pub async fn handle(
    cmd: ProfileCommands,
    url: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let client = build_client(url)?;
    tracing::debug!(endpoint = %client.endpoint(), "using profile server");

    match cmd {
        ProfileCommands::Show => {
            let editor = ProfileEditor::load(client).await?;
            let data = serde_json::to_value(editor.form().form_data())?;
            output_success(&output_format, "Profile loaded", Some(data))
        }
        ProfileCommands::Update { payload } => {
            let updates = read_updates(payload)?;
            let mut editor = ProfileEditor::load(client).await?;
            let result = editor.update_me(&updates).await;
            finish(editor, result, "Profile updated", &output_format)
        }
        ProfileCommands::Edit { tab, payload } => {
            let updates = read_updates(payload)?;
            let mut editor = ProfileEditor::load(client).await?;

            let section = FormSection::from(tab);
            let result = match editor.edit(section, &updates) {
                Ok(()) => editor.submit(section).await,
                Err(err) => Err(err),
            };
            finish(editor, result, "Profile section submitted", &output_format)
        }
    }
}

fn build_client(url: Option<String>) -> anyhow::Result<HttpProfileClient> {
    let mut client_config = config().client.clone();
    if let Some(url) = url {
        client_config.base_url = url;
    }

    HttpProfileClient::from_config(&client_config)
        .with_context(|| format!("Invalid profile server URL '{}'", client_config.base_url))
}

/// Read a raw update object, refusing one that names no profile field.
/// Type errors are left for the validator to report per field.
fn read_updates(payload: Option<String>) -> anyhow::Result<Value> {
    let updates = Value::Object(read_object(payload)?);
    if names_no_field(&updates) {
        anyhow::bail!("Payload carries no profile fields");
    }
    Ok(updates)
}

fn names_no_field(updates: &Value) -> bool {
    updates
        .as_object()
        .map_or(true, |object| object.keys().all(|key| profile_schema().get(key).is_none()))
}

fn finish(
    editor: ProfileEditor<HttpProfileClient>,
    result: Result<(), ClientError>,
    message: &str,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    match result {
        Ok(()) => {
            let data = serde_json::to_value(editor.form().form_data())?;
            output_success(output_format, message, Some(data))
        }
        Err(err @ (ClientError::Invalid(_) | ClientError::Rejected { .. })) => {
            output_issues(output_format, &err.to_string(), err.issues())?;
            Err(anyhow::anyhow!("Profile update was not accepted"))
        }
        Err(err) => Err(err.into()),
    }
}
