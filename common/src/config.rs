/// Runtime options shared by the `convert` and `merge` pipelines.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hides decorative output.
    ///
    /// `1` drops headers and the banner, `2` also drops the run summary.
    pub quiet: u8,
    pub no_banner: bool,
    /// Prepends the `Host` column to the fixed report columns, which keeps
    /// converted reports deduplicable by a later merge.
    pub include_host: bool,
    /// Paints the header and alternating row fills on spreadsheet output.
    pub stripe: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: 0,
            no_banner: false,
            include_host: false,
            stripe: true,
        }
    }
}
