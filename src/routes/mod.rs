//! HTTP handlers rendering Tera templates and answering the JSON API.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::dto::ListingStatus;

pub mod api;
pub mod catalog;
pub mod main;
pub mod products_table;

/// Maps a flash message level to the CSS class of the alert.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

fn context_with_alerts(alerts: &[(String, &'static str)], current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", alerts);
    context.insert("current_page", current_page);
    context
}

/// Context every page starts from: pending alerts and the active nav entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    context_with_alerts(&collect_alerts(flash_messages), current_page)
}

/// Base context of a listing page, with a notice when the listing is not
/// fresh.
pub fn listing_context(
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    status: ListingStatus,
) -> Context {
    let mut alerts = collect_alerts(flash_messages);

    let level = match status {
        ListingStatus::Fresh => None,
        ListingStatus::Previous => Some(Level::Warning),
        ListingStatus::Unavailable => Some(Level::Error),
    };
    if let (Some(level), Some(notice)) = (level, status.notice()) {
        alerts.push((notice.to_string(), alert_level_to_str(&level)));
    }

    let mut context = context_with_alerts(&alerts, current_page);
    context.insert("listing_status", &status);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Renders `template` answering with `status` instead of 200.
pub fn render_template_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    let mut response = render_template(tera, template, context);
    if response.status().is_success() {
        *response.status_mut() = status;
    }
    response
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
