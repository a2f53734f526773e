//! Handlers for `schools list` and `schools add`.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::{AddArgs, ApiArg, ListArgs};
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::api::HttpSchoolApi;
use crate::application::{Directory, DirectoryState, EmptyReason, FormState, RegistrationForm};
use crate::domain::image::content_type_for_path;
use crate::domain::{Field, ImageUpload, School};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct SchoolRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl From<&School> for SchoolRow {
    fn from(school: &School) -> Self {
        Self {
            id: school.id.get(),
            name: school.name.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
            contact: school.contact.clone(),
            email: school.email_id.clone(),
            image: school.image.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn api(config: &Config, arg: &ApiArg) -> Result<Arc<HttpSchoolApi>> {
    let base_url = arg.url.as_deref().unwrap_or(&config.client.base_url);
    Ok(Arc::new(HttpSchoolApi::new(base_url)?))
}

/// Execute `schools list`.
pub async fn execute_list(config: &Config, args: &ListArgs) -> Result<()> {
    let directory = Directory::new(api(config, &args.api)?);
    if let Some(query) = &args.search {
        directory.set_query(query.clone());
    }

    if let Err(err) = directory.load().await {
        return Err(match directory.state() {
            DirectoryState::Failed(message) => Error::Client {
                message,
                source: Box::new(err),
            },
            _ => err,
        });
    }

    let visible = directory.visible();

    if output::is_json() {
        output::document(
            "schools.list",
            json!({
                "query": directory.query(),
                "total": directory.total(),
                "schools": visible,
            }),
        );
        return Ok(());
    }

    output::section("Schools");
    match directory.empty_reason() {
        Some(EmptyReason::NoSchools) => output::note("No schools registered yet"),
        Some(EmptyReason::NoMatches) => {
            output::note(&format!("No schools match '{}'", directory.query()));
        }
        None => {
            output::table(visible.iter().map(SchoolRow::from));
            output::field(
                "Showing",
                format!("{} of {}", visible.len(), directory.total()),
            );
        }
    }
    Ok(())
}

/// Execute `schools add`.
pub async fn execute_add(config: &Config, args: &AddArgs) -> Result<()> {
    let form = RegistrationForm::new(
        api(config, &args.api)?,
        config.uploads.policy(),
        config.client.success_timeout(),
    );

    form.set_field(Field::Name, args.name.clone());
    form.set_field(Field::Address, args.address.clone());
    form.set_field(Field::City, args.city.clone());
    form.set_field(Field::State, args.state.clone());
    form.set_field(Field::Contact, args.contact.clone());
    form.set_field(Field::EmailId, args.email_id.clone());
    if let Some(path) = &args.image {
        form.set_image(Some(read_image(path).await?));
    }

    match form.submit().await {
        Ok(school_id) => {
            let message = match form.state() {
                FormState::Succeeded { message, .. } => message,
                _ => String::new(),
            };
            if output::is_json() {
                output::document(
                    "schools.add",
                    json!({ "school_id": school_id, "message": message }),
                );
            } else {
                output::success(&message);
                output::field("ID", school_id);
            }
            Ok(())
        }
        Err(Error::Validation(err)) => {
            output::field_errors(&err.field_errors());
            Err(err.into())
        }
        Err(err) => Err(match form.state() {
            FormState::Failed(message) => Error::Client {
                message,
                source: Box::new(err),
            },
            _ => err,
        }),
    }
}

async fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path).await?;
    let content_type = content_type_for_path(path).unwrap_or("application/octet-stream");
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);
    Ok(ImageUpload::new(name, content_type, bytes))
}
