use super::loader::Table;
use serde::Deserialize;
use sqlx::query_builder::Separated;
use sqlx::Sqlite;

// Dump CSVs have been seen with both `snake_case` and title-cased headers; unknown columns are
// ignored and missing ones load as NULL.

/// One row of `organizations.csv`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrganizationRecord {
    #[serde(alias = "Name")]
    pub name: Option<String>,

    #[serde(alias = "Industry")]
    pub industry: Option<String>,

    #[serde(alias = "Address")]
    pub address: Option<String>,
}

impl Table for OrganizationRecord {
    const NAME: &'static str = "organizations";
    const COLUMNS: &'static [&'static str] = &["name", "industry", "address"];

    fn bind<'args>(self, mut row: Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.name)
            .push_bind(self.industry)
            .push_bind(self.address);
    }
}

/// One row of `customers.csv`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerRecord {
    #[serde(alias = "Name")]
    pub name: Option<String>,

    #[serde(alias = "Email")]
    pub email: Option<String>,

    #[serde(alias = "Phone")]
    pub phone: Option<String>,

    #[serde(alias = "Address")]
    pub address: Option<String>,

    #[serde(alias = "Organization Id", alias = "organizationId")]
    pub organization_id: Option<String>,
}

impl Table for CustomerRecord {
    const NAME: &'static str = "customers";
    const COLUMNS: &'static [&'static str] =
        &["name", "email", "phone", "address", "organization_id"];

    fn bind<'args>(self, mut row: Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.name)
            .push_bind(self.email)
            .push_bind(self.phone)
            .push_bind(self.address)
            .push_bind(self.organization_id);
    }
}
