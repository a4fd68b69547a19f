//////////////////////////////////////////////////////////////////
// organizations
//////////////////////////////////////////////////////////////////

pub(crate) const DROP_ORGANIZATIONS: &'static str = "
    DROP TABLE IF EXISTS organizations
";

/// `organizations` holds one row per organization in the dump.
pub(crate) const CREATE_ORGANIZATIONS: &'static str = "
    CREATE TABLE organizations (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT,
        industry    TEXT,
        address     TEXT
    )
";

//////////////////////////////////////////////////////////////////
// customers
//////////////////////////////////////////////////////////////////

pub(crate) const DROP_CUSTOMERS: &'static str = "
    DROP TABLE IF EXISTS customers
";

/// `customers.organization_id` refers to an organization by its dump identifier; it is stored
/// as text and not enforced.
pub(crate) const CREATE_CUSTOMERS: &'static str = "
    CREATE TABLE customers (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        name            TEXT,
        email           TEXT,
        phone           TEXT,
        address         TEXT,
        organization_id TEXT
    )
";
