use crate::report::Report;
use schemars::schema::RootSchema;

/// Version of the JSON report layout.
pub const REPORT_VERSION: &str = "0.1.0";

pub fn report_schema() -> RootSchema {
    schemars::schema_for!(Report)
}
