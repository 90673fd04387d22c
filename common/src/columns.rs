//! Tag and column names of the Nessus v2 report schema that the engine relies on.

/// Element that marks one scanned asset.
pub const HOST_TAG: &str = "ReportHost";
/// Attribute of [`HOST_TAG`] holding the asset identifier.
pub const HOST_NAME_ATTR: &str = "name";
/// Identifier used when a host carries no name attribute.
pub const UNKNOWN_HOST: &str = "Unknown";
/// Element whose presence marks a scored finding.
pub const FINDING_ANCHOR: &str = "cvss_base_score";

pub const HOST: &str = "Host";
pub const VULN_ID: &str = "cve";
pub const SEVERITY: &str = "cvss3_base_score";

/// Columns of a converted report, in output order.
pub const REPORT_COLUMNS: [&str; 14] = [
    VULN_ID,
    SEVERITY,
    FINDING_ANCHOR,
    "exploit_available",
    "risk_factor",
    "description",
    "synopsis",
    "solution",
    "cisa-known-exploited",
    "vendor_severity",
    "see_also",
    "rhsa",
    "plugin_output",
    "age_of_vuln",
];

/// Output columns of the convert pipeline, optionally led by [`HOST`].
pub fn report_columns(include_host: bool) -> Vec<String> {
    let host = include_host.then_some(HOST);
    host.into_iter()
        .chain(REPORT_COLUMNS)
        .map(String::from)
        .collect()
}
