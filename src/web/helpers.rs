use actix_web::{HttpRequest, HttpResponse};
use askama::Template;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use brandpress::common::AppError;
pub use brandpress::content::escape_html;
use brandpress::models::SopStep;

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

pub fn current_user_id(req: &HttpRequest) -> Option<Uuid> {
    // MVP auth/session.
    // Priority: cookie -> request header -> env var.
    let cookie_val = req
        .cookie("bp_uid")
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(&s).ok());

    if cookie_val.is_some() {
        return cookie_val;
    }

    let header_val = req
        .headers()
        .get("X-Brandpress-User-Id")
        .or_else(|| req.headers().get("X-User-Id"))
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok());

    header_val.or_else(|| {
        std::env::var("BRANDPRESS_USER_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(&s).ok())
    })
}

pub fn require_user(req: &HttpRequest) -> Result<Uuid, HttpResponse> {
    match current_user_id(req) {
        Some(uid) => Ok(uid),
        None => {
            if is_htmx(req) {
                Err(HttpResponse::Unauthorized()
                    .insert_header(("HX-Redirect", "/admin/login"))
                    .finish())
            } else {
                Err(HttpResponse::SeeOther()
                    .insert_header(("Location", "/admin/login"))
                    .finish())
            }
        }
    }
}

pub fn render<T: Template>(t: T) -> Result<HttpResponse, AppError> {
    let body = t.render()?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// HTMX-aware redirect: full requests get a 303, HTMX requests get the
/// client-side redirect header.
pub fn redirect(req: &HttpRequest, to: &str) -> HttpResponse {
    if is_htmx(req) {
        HttpResponse::Ok()
            .insert_header(("HX-Redirect", to.to_string()))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", to.to_string()))
            .finish()
    }
}

/// Builds `base?flash=...` so a message survives the redirect.
pub fn flash_url(base: &str, message: &str) -> String {
    format!("{}?flash={}", base, urlencoding::encode(message))
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

pub fn iframe_srcdoc(html: &str) -> String {
    // `srcdoc` is an attribute; escape enough to keep it valid.
    // Browsers will decode entities inside attributes.
    format!(
        r#"<iframe class="preview-iframe" sandbox="allow-same-origin" referrerpolicy="no-referrer" srcdoc="{}"></iframe>"#,
        escape_html(html)
    )
}

/// Trimmed, non-empty form value.
pub fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parses an optional `datetime-local` form value (no zone) as UTC. An
/// empty field is `None`; a malformed one is a validation error.
pub fn parse_datetime_field(
    value: &Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(raw) = trimmed(value) else {
        return Ok(None);
    };

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| AppError::validation(format!("Invalid {field} date/time")))
}

pub fn parse_uuid_field(value: &Option<String>, field: &str) -> Result<Option<Uuid>, AppError> {
    let Some(raw) = trimmed(value) else {
        return Ok(None);
    };

    Uuid::parse_str(&raw)
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid {field} id")))
}

/// Comma-separated tag field into a clean list.
pub fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One entry per non-empty line.
pub fn parse_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// SOP step lines: `Title :: detail`, detail optional.
pub fn parse_sop_steps(value: &str) -> Vec<SopStep> {
    value
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|line| match line.split_once("::") {
            Some((title, detail)) => SopStep {
                title: title.trim().to_string(),
                detail: detail.trim().to_string(),
            },
            None => SopStep {
                title: line.to_string(),
                detail: String::new(),
            },
        })
        .collect()
}

/// Renders step lines back into the textarea form of `parse_sop_steps`.
pub fn sop_steps_text(steps: &[SopStep]) -> String {
    steps
        .iter()
        .map(|step| {
            if step.detail.is_empty() {
                step.title.clone()
            } else {
                format!("{} :: {}", step.title, step.detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
