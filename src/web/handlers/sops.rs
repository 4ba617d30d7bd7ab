use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::db;
use brandpress::models::{SopCreate, SopUpdate};
use brandpress::services::ChatTurn;

use crate::web::forms::{ListQuery, SopChatForm, SopForm};
use crate::web::helpers::{
    flash_url, parse_sop_steps, redirect, render, require_user, sop_steps_text, trimmed,
};
use crate::web::state::AppState;
use crate::web::templates::{SopDraftView, SopEditTemplate, SopStudioTemplate, SopsListTemplate};

/// The studio transcript is plain text, one turn per line, `USER:` or
/// `ASSISTANT:` prefixed. Unprefixed lines continue the previous turn so
/// multi-line replies survive the round trip.
fn parse_transcript(text: &str) -> Vec<ChatTurn> {
    let mut turns: Vec<ChatTurn> = Vec::new();
    for line in text.lines() {
        if let Some(content) = line.strip_prefix("USER:") {
            turns.push(ChatTurn::user(content.trim()));
        } else if let Some(content) = line.strip_prefix("ASSISTANT:") {
            turns.push(ChatTurn::assistant(content.trim()));
        } else if let Some(last) = turns.last_mut() {
            last.content.push('\n');
            last.content.push_str(line);
        }
    }
    turns
}

fn transcript_text(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| {
            let prefix = if turn.role == "assistant" {
                "ASSISTANT"
            } else {
                "USER"
            };
            format!("{}: {}", prefix, turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[get("/admin/sops")]
pub async fn sops_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let q = query.q.clone().unwrap_or_default();
    let sops = db::list_sops(&state.pool, trimmed(&query.q).as_deref()).await?;

    render(SopsListTemplate {
        sops,
        query: q,
        flash: query.flash.clone(),
    })
}

#[get("/admin/sops/studio")]
pub async fn sop_studio(req: HttpRequest, query: web::Query<ListQuery>) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    render(SopStudioTemplate {
        transcript: String::new(),
        draft: None,
        flash: query.flash.clone(),
    })
}

/// One conversational round trip: append the operator's message, ask the
/// service for a reply, append that too, re-render. Nothing is stored.
#[post("/admin/sops/studio/chat")]
pub async fn sop_chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SopChatForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let message = trimmed(&form.message)
        .ok_or_else(|| AppError::validation("A message is required"))?;

    let mut turns = parse_transcript(form.transcript.as_deref().unwrap_or_default());
    turns.push(ChatTurn::user(message));

    let reply = state.generator.sop_chat(&turns).await?;
    turns.push(ChatTurn::assistant(reply));

    render(SopStudioTemplate {
        transcript: transcript_text(&turns),
        draft: None,
        flash: None,
    })
}

/// Structured extraction over the accumulated transcript; the draft lands
/// in a save form next to the conversation.
#[post("/admin/sops/studio/extract")]
pub async fn sop_extract(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SopChatForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let transcript = form.transcript.clone().unwrap_or_default();
    let turns = parse_transcript(&transcript);
    if turns.is_empty() {
        return Err(AppError::validation("Nothing to extract from yet"));
    }

    let draft = state.generator.extract_sop(&turns).await?;

    render(SopStudioTemplate {
        transcript,
        draft: Some(SopDraftView {
            title: draft.title,
            category: draft.category.unwrap_or_default(),
            summary: draft.summary,
            steps_text: sop_steps_text(&draft.steps),
        }),
        flash: None,
    })
}

#[post("/admin/sops")]
pub async fn sop_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SopForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if form.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }

    let data = SopCreate {
        title: form.title.trim().to_string(),
        category: trimmed(&form.category).unwrap_or_else(|| "general".to_string()),
        summary: trimmed(&form.summary).unwrap_or_default(),
        steps: parse_sop_steps(form.steps.as_deref().unwrap_or_default()),
        source_transcript: form.source_transcript.clone().unwrap_or_default(),
    };
    let sop = db::create_sop(&state.pool, &data).await?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/sops/{}", sop.id), "SOP saved"),
    ))
}

#[get("/admin/sops/{id}")]
pub async fn sop_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let sop = db::get_sop_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("SOP"))?;

    render(SopEditTemplate {
        steps_text: sop_steps_text(&sop.steps.0),
        sop,
        flash: query.flash.clone(),
    })
}

#[post("/admin/sops/{id}")]
pub async fn sop_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<SopForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if form.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    let id = path.into_inner();

    let data = SopUpdate {
        title: Some(form.title.trim().to_string()),
        category: trimmed(&form.category),
        summary: Some(trimmed(&form.summary).unwrap_or_default()),
        steps: Some(parse_sop_steps(form.steps.as_deref().unwrap_or_default())),
    };

    db::update_sop(&state.pool, id, &data)
        .await?
        .ok_or(AppError::NotFound("SOP"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/sops/{id}"), "Saved"),
    ))
}

#[post("/admin/sops/{id}/delete")]
pub async fn sop_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_sop(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("SOP"));
    }

    Ok(redirect(&req, &flash_url("/admin/sops", "SOP deleted")))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(sops_list)
        .service(sop_studio)
        .service(sop_chat)
        .service(sop_extract)
        .service(sop_create)
        .service(sop_edit)
        .service(sop_update)
        .service(sop_delete);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_round_trip() {
        let text = "USER: How do we publish a blog?\nASSISTANT: Draft, review, publish.";
        let turns = parse_transcript(text);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "user");
        assert_eq!(turns[1].role, "assistant");
        assert_eq!(transcript_text(&turns), text);
    }

    #[test]
    fn unprefixed_lines_continue_the_previous_turn() {
        let turns = parse_transcript("ASSISTANT: Step one.\nStep two.");

        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "Step one.\nStep two.");
    }

    #[test]
    fn leading_noise_without_a_turn_is_ignored() {
        assert!(parse_transcript("no prefix here").is_empty());
    }
}
