use crate::core::errors::{AdminError, Result};
use crate::core::services::export_service::{ExportService, SupplierExportOptions};
use crate::core::services::moderation_service::{ModerationService, edited_services_label};
use crate::core::services::user_lookup_service::{AccountAction, UserLookupService, safe_return_to};

use super::http::HttpResponse;
use super::router::{App, RouteContext};
use super::views;

/// Cookie carrying a one-shot confirmation across a redirect.
pub const FLASH_COOKIE: &str = "flash";

fn set_flash(message: &str) -> String {
    format!(
        "{FLASH_COOKIE}={}; Path=/admin; HttpOnly; SameSite=Lax",
        urlencoding::encode(message)
    )
}

fn clear_flash() -> String {
    format!("{FLASH_COOKIE}=; Path=/admin; Max-Age=0")
}

fn export_service(app: &App) -> ExportService<'_> {
    ExportService {
        api: app.api(),
        clock: app.clock(),
    }
}

pub fn admin_index(_app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    Ok(HttpResponse::html(200, views::admin_index(ctx.user.role)))
}

pub fn list_service_updates(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    let rows = ModerationService { api: app.api() }.list_unapproved()?;
    let flash = ctx.request.cookie(FLASH_COOKIE).filter(|f| !f.is_empty());
    let html = views::service_updates(&rows, &edited_services_label(rows.len()), flash.as_deref());

    let response = HttpResponse::html(200, html);
    Ok(match flash {
        Some(_) => response.with_header("Set-Cookie", &clear_flash()),
        None => response,
    })
}

pub fn approve_service_update(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    let service_id = ctx.param(0);
    let audit_event_id: u64 = ctx
        .param(1)
        .parse()
        .map_err(|_| AdminError::not_found(format!("audit event {}", ctx.param(1))))?;

    let message =
        ModerationService { api: app.api() }.approve(service_id, audit_event_id, &ctx.user)?;
    Ok(HttpResponse::redirect("/admin/services/updates/unapproved")
        .with_header("Set-Cookie", &set_flash(&message)))
}

pub fn find_user(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    let email = ctx.request.query_param("email_address");
    match (UserLookupService { api: app.api() }).lookup(email) {
        Ok(summary) => Ok(HttpResponse::html(
            200,
            views::user_found(email.unwrap_or_default(), &summary),
        )),
        Err(AdminError::NotFound { what }) => {
            tracing::debug!(%what, "user lookup found nothing");
            Ok(HttpResponse::html(
                404,
                views::user_not_found(email.unwrap_or_default()),
            ))
        }
        Err(e) => Err(e),
    }
}

fn account_action(
    app: &App,
    ctx: &RouteContext<'_>,
    action: AccountAction,
) -> Result<HttpResponse> {
    let user_id: u64 = ctx
        .param(0)
        .parse()
        .map_err(|_| AdminError::not_found(format!("user {}", ctx.param(0))))?;
    UserLookupService { api: app.api() }.apply(user_id, action, &ctx.user)?;
    Ok(HttpResponse::redirect(&safe_return_to(
        ctx.request.form_param("source"),
    )))
}

pub fn unlock_user(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    account_action(app, ctx, AccountAction::Unlock)
}

pub fn deactivate_user(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    account_action(app, ctx, AccountAction::Deactivate)
}

pub fn framework_users(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    let framework = export_service(app).framework(ctx.param(0))?;
    Ok(HttpResponse::html(
        200,
        views::framework_users(&framework.name, &framework.slug),
    ))
}

pub fn download_supplier_users(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    let options = SupplierExportOptions::from_query(|k| ctx.request.query_param(k));
    let report = export_service(app).supplier_report(ctx.param(0), options, &ctx.user)?;
    HttpResponse::csv(&report)
}

pub fn download_buyers(app: &App, ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    let report = export_service(app).buyer_report(&ctx.user)?;
    HttpResponse::csv(&report)
}

pub fn supplier_research_hub(app: &App, _ctx: &RouteContext<'_>) -> Result<HttpResponse> {
    let links = export_service(app).research_links()?;
    Ok(HttpResponse::html(200, views::research_hub(&links)))
}
