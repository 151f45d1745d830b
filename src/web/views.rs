//! HTML for the admin pages. Markup is deliberately plain; class names
//! follow the marketplace front-end toolkit so the shared stylesheet applies.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::core::models::role::Role;
use crate::core::services::export_service::ResearchLink;
use crate::core::services::moderation_service::PendingUpdate;
use crate::core::services::user_lookup_service::{AccountAction, UserSummary};

pub const NO_ACCOUNT_MESSAGE: &str = "Sorry, we couldn't find an account with that email address";
pub const NO_USERS_MESSAGE: &str = "No users to show";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>{title} - Digital Marketplace admin</title>\
         <link rel=\"stylesheet\" href=\"/admin/static/application.css\"></head>\n\
         <body>\n<main id=\"content\">\n{body}\n</main>\n</body>\n</html>\n",
        title = text(title),
    )
}

fn heading(title: &str) -> String {
    format!(
        "<header class=\"page-heading page-heading-without-breadcrumb\"><h1>{}</h1></header>\n",
        text(title)
    )
}

fn flash_banner(flash: Option<&str>) -> String {
    flash
        .map(|msg| {
            format!(
                "<div class=\"banner-success-without-action\">\
                 <p class=\"banner-message\">{}</p></div>\n",
                text(msg)
            )
        })
        .unwrap_or_default()
}

/// Landing page; the links shown depend on the viewer's role.
pub fn admin_index(role: Role) -> String {
    let mut links: Vec<(&str, &str)> = Vec::new();
    if matches!(role, Role::Admin | Role::AdminCcsCategory) {
        links.push(("/admin/users", "Find a user"));
    }
    if role == Role::AdminCcsCategory {
        links.push(("/admin/services/updates/unapproved", "Review service changes"));
    }
    if role == Role::Admin {
        links.push((
            "/admin/users/download/buyers",
            "Download list of potential user research participants",
        ));
        links.push((
            "/admin/users/download/suppliers",
            "Download lists of potential user research participants",
        ));
    }

    let mut body = heading("Admin");
    body.push_str("<ul class=\"browse-list\">\n");
    for (href, label) in links {
        let _ = writeln!(
            body,
            "<li class=\"browse-list-item\"><a href=\"{}\">{}</a></li>",
            attr(href),
            text(label)
        );
    }
    body.push_str("</ul>");
    layout("Admin", &body)
}

pub fn service_updates(rows: &[PendingUpdate], count_label: &str, flash: Option<&str>) -> String {
    let mut body = flash_banner(flash);
    body.push_str(&heading("Edited services"));
    body.push_str("<table class=\"summary-item-body\">\n");
    if !rows.is_empty() {
        body.push_str(
            "<thead><tr><th>Supplier</th><th>Service ID</th>\
             <th>Edited</th><th>Changes</th></tr></thead>\n",
        );
    }
    body.push_str("<tbody>\n");
    for row in rows {
        let _ = writeln!(
            body,
            "<tr class=\"summary-item-row\"><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"{}\">View changes</a></td></tr>",
            text(&row.supplier_name),
            text(&row.service_id),
            text(&row.edited),
            attr(&row.changes_url),
        );
    }
    body.push_str("</tbody>\n</table>\n");
    let _ = write!(body, "<p class=\"search-summary\">{}</p>", text(count_label));
    layout("Edited services", &body)
}

fn search_form(email: &str) -> String {
    format!(
        "<form action=\"/admin/users\" method=\"get\">\
         <label for=\"email_address\">Email address</label>\
         <input type=\"text\" id=\"email_address\" name=\"email_address\" value=\"{}\">\
         <input type=\"submit\" class=\"button-save\" value=\"Search\"></form>\n",
        attr(email)
    )
}

const USER_TABLE_HEAD: &str = "<thead><tr><th>Name</th><th>Role</th><th>Supplier</th>\
    <th>Last login</th><th>Last password change</th><th>Locked</th><th>Action</th></tr></thead>\n";

/// Lookup result with exactly one account.
pub fn user_found(email: &str, user: &UserSummary) -> String {
    let mut body = heading("Find a user");
    body.push_str(&search_form(email));

    let supplier = match &user.supplier {
        Some((name, href)) => format!("<a href=\"{}\">{}</a>", attr(href), text(name)),
        None => String::new(),
    };
    let button_class = match user.action {
        AccountAction::Unlock => "button-secondary",
        AccountAction::Deactivate => "button-destructive",
    };

    body.push_str("<table class=\"summary-item-body\">\n");
    body.push_str(USER_TABLE_HEAD);
    let _ = writeln!(
        body,
        "<tbody><tr class=\"summary-item-row\">\
         <td><span>{name}</span></td>\
         <td><span>{role}</span></td>\
         <td><span>{supplier}</span></td>\
         <td><span>{login_time}</span><br><span>{login_day}</span></td>\
         <td><span>{pw_time}</span><br><span>{pw_day}</span></td>\
         <td><span>{locked}</span></td>\
         <td><span><form action=\"{action}\" method=\"post\">\
         <input type=\"submit\" class=\"{button_class}\" value=\"{label}\">\
         <input type=\"hidden\" name=\"source\" value=\"{source}\">\
         </form></span></td></tr></tbody>",
        name = text(&user.name),
        role = text(&user.role),
        login_time = text(&user.last_login_time),
        login_day = text(&user.last_login_day),
        pw_time = text(&user.password_changed_time),
        pw_day = text(&user.password_changed_day),
        locked = user.locked_label(),
        action = attr(&user.action.url(user.id)),
        label = user.action.label(),
        source = attr(&user.return_to),
    );
    body.push_str("</table>");
    layout("Find a user", &body)
}

/// Lookup with no email or no match: banner plus the empty-list state.
pub fn user_not_found(email: &str) -> String {
    let mut body = format!(
        "<div class=\"banner-destructive-without-action\">\
         <p class=\"banner-message\">{}</p></div>\n",
        text(NO_ACCOUNT_MESSAGE)
    );
    body.push_str(&heading("Find a user"));
    body.push_str(&search_form(email));
    let _ = write!(
        body,
        "<p class=\"summary-item-no-content\">{}</p>",
        text(NO_USERS_MESSAGE)
    );
    layout("Find a user", &body)
}

pub fn framework_users(framework_name: &str, slug: &str) -> String {
    let title = format!("Download supplier lists for {framework_name}");
    let mut body = heading(&title);
    let _ = write!(
        body,
        "<ul class=\"browse-list\">\
         <li class=\"browse-list-item\"><a href=\"/admin/frameworks/{slug}/users/download\">\
         Suppliers who applied or started an application</a></li>\
         <li class=\"browse-list-item\">\
         <a href=\"/admin/frameworks/{slug}/users/download?on_framework_only=True\">\
         Suppliers on {name}</a></li></ul>",
        slug = attr(slug),
        name = text(framework_name),
    );
    layout(&title, &body)
}

pub fn research_hub(links: &[ResearchLink]) -> String {
    let mut body = heading("Download lists of potential user research participants");
    body.push_str("<ul class=\"browse-list\">\n");
    for link in links {
        let _ = writeln!(
            body,
            "<li class=\"browse-list-item\"><a href=\"{}\">{}</a></li>",
            attr(&link.url),
            text(&link.label)
        );
    }
    body.push_str("</ul>");
    layout("User research participants", &body)
}

/// Minimal page for 403/404/405/410/500.
pub fn error_page(status: u16) -> String {
    let message = match status {
        403 => "You don't have permission to view this page.",
        404 => "Page not found.",
        405 => "That action isn't allowed here.",
        410 => "This change has already been approved.",
        _ => "Sorry, something went wrong. Please try again later.",
    };
    let body = format!("{}<p>{}</p>", heading(&status.to_string()), text(message));
    layout(&status.to_string(), &body)
}
