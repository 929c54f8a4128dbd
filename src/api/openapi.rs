use super::handlers::{auth, geocode, health, reports, root};
use utoipa::openapi::{Contact, InfoBuilder, License, Tag};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::login::login,
        auth::session::session,
        auth::session::logout,
        reports::create,
        reports::list,
        geocode::search,
        geocode::reverse,
    ),
    components(schemas(
        root::Service,
        health::Health,
        auth::claims::Role,
        auth::claims::Session,
        auth::claims::SessionUser,
        auth::types::LoginRequest,
        auth::types::LoginResponse,
        reports::types::ReportRequest,
        reports::types::ReportResponse,
        geocode::types::Place,
    ))
)]
struct ApiDoc;

/// Generated `OpenAPI` spec with info taken from Cargo.toml metadata.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();

    // Use Cargo.toml metadata instead of the derive defaults.
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();
    info.contact = cargo_contact();
    info.license = cargo_license();
    spec.info = info;

    let mut raporto_tag = Tag::new("raporto");
    raporto_tag.description = Some("Report submission API".to_string());

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Credential login and sessions".to_string());

    let mut reports_tag = Tag::new("reports");
    reports_tag.description = Some("Report submission and listing".to_string());

    let mut geocode_tag = Tag::new("geocode");
    geocode_tag.description = Some("Location autocomplete".to_string());

    spec.tags = Some(vec![raporto_tag, auth_tag, reports_tag, geocode_tag]);

    spec
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        let name = if name.is_empty() { None } else { Some(name) };
        let email = if email.is_empty() { None } else { Some(email) };
        (name, email)
    } else {
        let name = author.trim();
        (if name.is_empty() { None } else { Some(name) }, None)
    }
}
