use actix_web::cookie::{Cookie, SameSite};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use std::time::Duration;

use brandpress::common::AppError;
use brandpress::db;
use brandpress::services::{hash_password, verify_password};

use crate::web::forms::{AuthQuery, LoginForm, RegisterForm};
use crate::web::helpers::render;
use crate::web::security::{validate_email, PasswordValidator};
use crate::web::state::AppState;
use crate::web::templates::{LoginTemplate, RegisterTemplate};

const SESSION_COOKIE: &str = "bp_uid";

fn login_error(code: &str) -> String {
    match code {
        "missing" => "Email and password are required".to_string(),
        "invalid" => "Invalid email or password".to_string(),
        "rate_limit" => "Too many attempts. Please try again later.".to_string(),
        "internal" => "An internal error occurred. Please try again.".to_string(),
        other => other.to_string(),
    }
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

#[get("/admin/login")]
pub async fn login_form(query: web::Query<AuthQuery>) -> Result<HttpResponse, AppError> {
    let error = query.error.as_deref().map(login_error);

    render(LoginTemplate { error })
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    if !state.rate_limiter.check_rate_limit(
        &format!("login:{}", client_ip(&req)),
        5,
        Duration::from_secs(300),
    ) {
        return Ok(see_other("/admin/login?error=rate_limit".to_string()));
    }

    let email = form.email.trim().to_string();
    let password = form.password.clone();

    if email.is_empty() || password.is_empty() {
        return Ok(see_other("/admin/login?error=missing".to_string()));
    }

    let user = db::get_user_by_email(&state.pool, &email).await?;

    // Verify against a dummy hash when the user is unknown, so the
    // response time does not reveal which emails exist.
    let (user, stored_hash) = match user {
        Some(user) => {
            let hash = user.password_hash.clone();
            (Some(user), hash)
        }
        None => {
            let dummy = hash_password("dummy-password-for-timing").unwrap_or_default();
            (None, dummy)
        }
    };

    let password_valid = verify_password(&password, &stored_hash).unwrap_or(false);

    let Some(user) = user.filter(|_| password_valid) else {
        return Ok(see_other("/admin/login?error=invalid".to_string()));
    };

    let cookie = Cookie::build(SESSION_COOKIE, user.id.to_string())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::days(7))
        .finish();

    Ok(HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header(("Location", "/admin"))
        .finish())
}

#[get("/admin/register")]
pub async fn register_form(query: web::Query<AuthQuery>) -> Result<HttpResponse, AppError> {
    let error = query.error.as_deref().map(login_error);

    render(RegisterTemplate { error })
}

#[post("/admin/register")]
pub async fn register_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    if !state.rate_limiter.check_rate_limit(
        &format!("register:{}", client_ip(&req)),
        3,
        Duration::from_secs(3600),
    ) {
        return Ok(see_other("/admin/register?error=rate_limit".to_string()));
    }

    let email = form.email.trim().to_string();

    if !validate_email(&email) {
        return Ok(see_other(format!(
            "/admin/register?error={}",
            urlencoding::encode("A valid email is required")
        )));
    }
    if let Err(e) = PasswordValidator::validate(&form.password) {
        return Ok(see_other(format!(
            "/admin/register?error={}",
            urlencoding::encode(&e)
        )));
    }

    let password_hash = hash_password(&form.password).map_err(|e| {
        log::error!("password hashing failed: {e}");
        AppError::validation("Could not process the password")
    })?;

    let user = db::create_user(&state.pool, &email, &password_hash).await?;

    let Some(user) = user else {
        return Ok(see_other(format!(
            "/admin/register?error={}",
            urlencoding::encode("An account with this email already exists")
        )));
    };

    let cookie = Cookie::build(SESSION_COOKIE, user.id.to_string())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::days(7))
        .finish();

    Ok(HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header(("Location", "/admin"))
        .finish())
}

#[post("/admin/logout")]
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header(("Location", "/admin/login"))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login_submit)
        .service(register_form)
        .service(register_submit)
        .service(logout);
}
