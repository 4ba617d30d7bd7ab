use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::db;
use brandpress::models::{
    CompanyCreate, CompanyUpdate, PersonCreate, PersonQuery, PersonUpdate,
};

use crate::web::forms::{CompanyForm, ListQuery, PeopleQuery, PersonForm};
use crate::web::helpers::{
    flash_url, parse_uuid_field, redirect, render, require_user, trimmed,
};
use crate::web::state::AppState;
use crate::web::templates::{CompanyEditTemplate, LeadsTemplate, PersonEditTemplate};

#[get("/admin/leads")]
pub async fn leads_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PeopleQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let q = query.q.clone().unwrap_or_default();
    let companies = db::list_companies(&state.pool, trimmed(&query.q).as_deref()).await?;

    let people_query = PersonQuery {
        name: trimmed(&query.q),
        company_id: parse_uuid_field(&query.company, "company")?,
        limit: Some(200),
        ..PersonQuery::default()
    };
    let people = db::get_people(&state.pool, &people_query).await?;

    render(LeadsTemplate {
        companies,
        people,
        query: q,
        flash: query.flash.clone(),
    })
}

#[post("/admin/leads/companies")]
pub async fn company_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<CompanyForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if form.name.trim().is_empty() {
        return Err(AppError::validation("Company name is required"));
    }

    let data = CompanyCreate {
        name: form.name.trim().to_string(),
        website: trimmed(&form.website).unwrap_or_default(),
        industry: trimmed(&form.industry).unwrap_or_default(),
        notes: trimmed(&form.notes).unwrap_or_default(),
    };
    db::create_company(&state.pool, &data).await?;

    Ok(redirect(&req, &flash_url("/admin/leads", "Company added")))
}

#[get("/admin/leads/companies/{id}")]
pub async fn company_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let company = db::get_company_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Company"))?;
    let people = db::list_people_for_company(&state.pool, company.id).await?;

    render(CompanyEditTemplate {
        company,
        people,
        flash: query.flash.clone(),
    })
}

#[post("/admin/leads/companies/{id}")]
pub async fn company_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<CompanyForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if form.name.trim().is_empty() {
        return Err(AppError::validation("Company name is required"));
    }
    let id = path.into_inner();

    let data = CompanyUpdate {
        name: Some(form.name.trim().to_string()),
        website: Some(trimmed(&form.website).unwrap_or_default()),
        industry: Some(trimmed(&form.industry).unwrap_or_default()),
        notes: Some(trimmed(&form.notes).unwrap_or_default()),
    };

    db::update_company(&state.pool, id, &data)
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/leads/companies/{id}"), "Saved"),
    ))
}

#[post("/admin/leads/companies/{id}/delete")]
pub async fn company_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_company(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Company"));
    }

    Ok(redirect(&req, &flash_url("/admin/leads", "Company deleted")))
}

#[post("/admin/leads/people")]
pub async fn person_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<PersonForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if form.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    let data = PersonCreate {
        company_id: parse_uuid_field(&form.company_id, "company")?,
        name: form.name.trim().to_string(),
        email: trimmed(&form.email).unwrap_or_default(),
        role: trimmed(&form.role).unwrap_or_default(),
        notes: trimmed(&form.notes).unwrap_or_default(),
    };
    db::create_person(&state.pool, &data).await?;

    Ok(redirect(&req, &flash_url("/admin/leads", "Person added")))
}

#[get("/admin/leads/people/{id}")]
pub async fn person_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let person = db::get_person_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Person"))?;
    let companies = db::list_companies(&state.pool, None).await?;

    render(PersonEditTemplate {
        company_id_text: person
            .company_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        person,
        companies,
        flash: query.flash.clone(),
    })
}

#[post("/admin/leads/people/{id}")]
pub async fn person_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<PersonForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if form.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let id = path.into_inner();

    let data = PersonUpdate {
        company_id: Some(parse_uuid_field(&form.company_id, "company")?),
        name: Some(form.name.trim().to_string()),
        email: Some(trimmed(&form.email).unwrap_or_default()),
        role: Some(trimmed(&form.role).unwrap_or_default()),
        notes: Some(trimmed(&form.notes).unwrap_or_default()),
    };

    db::update_person(&state.pool, id, &data)
        .await?
        .ok_or(AppError::NotFound("Person"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/leads/people/{id}"), "Saved"),
    ))
}

#[post("/admin/leads/people/{id}/delete")]
pub async fn person_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_person(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Person"));
    }

    Ok(redirect(&req, &flash_url("/admin/leads", "Person deleted")))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(leads_list)
        .service(company_create)
        .service(company_edit)
        .service(company_update)
        .service(company_delete)
        .service(person_create)
        .service(person_edit)
        .service(person_update)
        .service(person_delete);
}
