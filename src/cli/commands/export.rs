use std::path::PathBuf;

use crate::adapters::clock::system_clock::SystemClock;
use crate::cli::{Actor, ExportReport, output};
use crate::core::errors::Result;
use crate::core::models::identity::CurrentUser;
use crate::core::models::report::CsvReport;
use crate::core::services::access_guard::{self, BUYER_EXPORT_ROLES, SUPPLIER_EXPORT_ROLES};
use crate::core::services::export_service::{ExportService, SupplierExportOptions};

/// Execute the `marketplace-admin export` command.
///
/// Applies the same role rules as the web downloads, then writes the
/// report to `--output` or to its own filename in the working directory.
pub fn execute(report: &ExportReport, api_token: Option<&str>) -> Result<()> {
    let actor = match report {
        ExportReport::Buyers { actor } | ExportReport::Suppliers { actor, .. } => actor,
    };
    let user = CurrentUser::new(actor.email.clone(), actor.role);

    // Reject before touching the config or the API.
    match report {
        ExportReport::Buyers { .. } => access_guard::ensure_any_role(&user, BUYER_EXPORT_ROLES)?,
        ExportReport::Suppliers {
            on_framework_only,
            user_research,
            ..
        } => {
            access_guard::ensure_any_role(&user, SUPPLIER_EXPORT_ROLES)?;
            supplier_options(*on_framework_only, *user_research).authorize(&user)?;
        }
    }

    let (_config, api) = super::load_and_connect(api_token)?;
    let service = ExportService {
        api: api.as_ref(),
        clock: &SystemClock,
    };

    let sp = output::spinner("Fetching users from the data API...");
    let csv = match report {
        ExportReport::Buyers { .. } => service.buyer_report(&user),
        ExportReport::Suppliers {
            slug,
            on_framework_only,
            user_research,
            ..
        } => service.supplier_report(
            slug,
            supplier_options(*on_framework_only, *user_research),
            &user,
        ),
    };
    let csv = match csv {
        Ok(csv) => csv,
        Err(e) => {
            sp.finish_and_clear();
            return Err(e);
        }
    };
    output::finish_spinner(sp, &format!("Fetched {} rows", csv.rows.len()));

    let path = write_report(&csv, actor)?;
    output::success(&format!("Wrote {}", path.display()));
    Ok(())
}

fn supplier_options(on_framework_only: bool, user_research: bool) -> SupplierExportOptions {
    SupplierExportOptions {
        on_framework_only,
        user_research_opted_in: user_research,
    }
}

fn write_report(report: &CsvReport, actor: &Actor) -> Result<PathBuf> {
    let path = actor
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&report.filename));
    std::fs::write(&path, report.to_csv()?)?;
    tracing::info!(path = %path.display(), rows = report.rows.len(), "report written");
    Ok(path)
}
