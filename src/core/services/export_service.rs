use chrono::{DateTime, Utc};

use crate::core::errors::{AdminError, Result};
use crate::core::models::framework::Framework;
use crate::core::models::identity::CurrentUser;
use crate::core::models::report::CsvReport;
use crate::core::models::role::Role;
use crate::core::models::supplier_export::SupplierExportRecord;
use crate::core::models::user::User;
use crate::core::traits::clock::Clock;
use crate::core::traits::data_api::DataApiClient;

pub const FULL_SUPPLIER_COLUMNS: &[&str] = &[
    "email address",
    "user_name",
    "supplier_id",
    "declaration_status",
    "application_status",
    "application_result",
    "framework_agreement",
    "variations_agreed",
    "published_service_count",
];
pub const CONTACT_SUPPLIER_COLUMNS: &[&str] = &["email address", "user_name", "supplier_id"];
pub const BUYER_COLUMNS: &[&str] = &["email address", "name"];

/// Query flags accepted by the supplier export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplierExportOptions {
    pub on_framework_only: bool,
    pub user_research_opted_in: bool,
}

impl SupplierExportOptions {
    /// Flags are set only by the literal values `True` or `true`.
    pub fn from_query<'q>(mut lookup: impl FnMut(&str) -> Option<&'q str>) -> Self {
        let flag = |v: Option<&str>| matches!(v, Some("True" | "true"));
        Self {
            on_framework_only: flag(lookup("on_framework_only")),
            user_research_opted_in: flag(lookup("user_research_opted_in")),
        }
    }

    /// Admins may only pull the research-participant list; framework
    /// managers may use every mode.
    pub fn authorize(&self, user: &CurrentUser) -> Result<()> {
        if user.has_role(Role::Admin) && !self.user_research_opted_in {
            return Err(AdminError::denied(
                "admin may only export user research participants",
            ));
        }
        Ok(())
    }
}

/// Export timestamp, e.g. `2016-08-05-at-16-00-00`.
pub fn export_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d-at-%H-%M-%S").to_string()
}

/// A download link on the supplier research hub.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchLink {
    pub label: String,
    pub url: String,
}

/// Builds CSV reports of buyers and framework suppliers.
pub struct ExportService<'a> {
    pub api: &'a dyn DataApiClient,
    pub clock: &'a dyn Clock,
}

impl<'a> ExportService<'a> {
    /// Supplier users for a framework, in API order. An unknown framework
    /// is `NotFound`.
    pub fn supplier_report(
        &self,
        framework_slug: &str,
        options: SupplierExportOptions,
        user: &CurrentUser,
    ) -> Result<CsvReport> {
        options.authorize(user)?;
        self.framework(framework_slug)?;
        let records = self.api.export_users(framework_slug)?;

        let (filename, columns, keep): (String, &[&str], fn(&SupplierExportRecord) -> bool) =
            if options.user_research_opted_in {
                (
                    format!("user-research-suppliers-on-{framework_slug}.csv"),
                    CONTACT_SUPPLIER_COLUMNS,
                    SupplierExportRecord::user_research_opted_in,
                )
            } else if options.on_framework_only {
                (
                    format!("suppliers-on-{framework_slug}.csv"),
                    CONTACT_SUPPLIER_COLUMNS,
                    SupplierExportRecord::application_passed,
                )
            } else {
                (
                    format!("{framework_slug}-suppliers-who-applied-or-started-application.csv"),
                    FULL_SUPPLIER_COLUMNS,
                    |_| true,
                )
            };

        let mut report = CsvReport::new(filename, columns);
        for record in records.iter().filter(|r| keep(r)) {
            report.push_row(columns.iter().map(|c| record.cell(c)).collect());
        }
        tracing::debug!(
            framework_slug,
            rows = report.rows.len(),
            "built supplier report"
        );
        Ok(report)
    }

    /// Buyers sorted by name. Admins get only research opt-ins; framework
    /// managers get everyone.
    pub fn buyer_report(&self, user: &CurrentUser) -> Result<CsvReport> {
        let research_only = user.has_role(Role::Admin);
        let mut buyers: Vec<User> = self
            .api
            .find_users_iter(Role::Buyer)
            .filter(|u| match u {
                Ok(u) => !research_only || u.user_research_opted_in,
                Err(_) => true,
            })
            .collect::<Result<_>>()?;
        buyers.sort_by(|a, b| a.name.cmp(&b.name));

        let prefix = if research_only {
            "user-research-buyers"
        } else {
            "all-buyers"
        };
        let filename = format!("{prefix}-on-{}.csv", export_timestamp(self.clock.now()));

        let mut report = CsvReport::new(filename, BUYER_COLUMNS);
        for buyer in buyers {
            report.push_row(vec![buyer.email_address, buyer.name]);
        }
        Ok(report)
    }

    /// One research-participant link per live framework, by name.
    pub fn research_links(&self) -> Result<Vec<ResearchLink>> {
        let mut live: Vec<Framework> = self
            .api
            .find_frameworks()?
            .into_iter()
            .filter(Framework::is_live)
            .collect();
        live.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(live
            .into_iter()
            .map(|f| ResearchLink {
                label: format!("User research participants on {}", f.name),
                url: format!(
                    "/admin/frameworks/{}/users/download?user_research_opted_in=True",
                    f.slug
                ),
            })
            .collect())
    }

    pub fn framework(&self, slug: &str) -> Result<Framework> {
        self.api
            .get_framework(slug)?
            .ok_or_else(|| AdminError::not_found(format!("framework {slug}")))
    }
}
