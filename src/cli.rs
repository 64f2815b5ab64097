use clap::Parser;

/// Which view of the report to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Packages,
    Violations,
    Vulnerabilities,
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "packages" | "pkgs" => Ok(Tab::Packages),
            "violations" => Ok(Tab::Violations),
            "vulnerabilities" | "vulns" => Ok(Tab::Vulnerabilities),
            _ => Err(format!(
                "Invalid tab: {}. Please specify 'packages', 'violations' or 'vulnerabilities'",
                s
            )),
        }
    }
}

/// Exclusion-state filter choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludesArg {
    Excluded,
    Included,
}

impl std::str::FromStr for ExcludesArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excluded" => Ok(ExcludesArg::Excluded),
            "included" => Ok(ExcludesArg::Included),
            _ => Err(format!(
                "Invalid excludes filter: {}. Please specify 'excluded' or 'included'",
                s
            )),
        }
    }
}

/// Sortable column choice; validity depends on the selected tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Severity,
    Package,
    Rule,
    Id,
}

impl std::str::FromStr for SortArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "severity" => Ok(SortArg::Severity),
            "package" => Ok(SortArg::Package),
            "rule" => Ok(SortArg::Rule),
            "id" => Ok(SortArg::Id),
            _ => Err(format!(
                "Invalid sort column: {}. Please specify 'severity', 'package', 'rule' or 'id'",
                s
            )),
        }
    }
}

/// View compliance-scan reports in the terminal
#[derive(Parser, Debug)]
#[command(name = "scanview")]
#[command(version)]
#[command(about = "View compliance-scan reports in the terminal", long_about = None)]
pub struct Args {
    /// Path to the scan report (HTML with embedded data block, raw JSON,
    /// or a .gz.b64 payload file)
    pub report: String,

    /// Which view to print: packages, violations or vulnerabilities
    #[arg(short, long, default_value = "violations")]
    pub tab: Tab,

    /// Only rows whose package id contains this text
    #[arg(long)]
    pub package: Option<String>,

    /// Only violations whose rule name contains this text
    #[arg(long)]
    pub rule: Option<String>,

    /// Only violations whose message contains this text
    #[arg(long)]
    pub message: Option<String>,

    /// Only vulnerabilities whose advisory id contains this text
    #[arg(long)]
    pub id: Option<String>,

    /// Only packages with a license containing this text
    #[arg(long)]
    pub license: Option<String>,

    /// Only rows with these severity indices (repeatable)
    #[arg(long = "severity", value_name = "INDEX")]
    pub severities: Vec<u8>,

    /// Only rows whose package is 'excluded' or 'included'
    #[arg(long)]
    pub excludes: Option<ExcludesArg>,

    /// Sort column (default: report order)
    #[arg(long)]
    pub sort: Option<SortArg>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Number of matching rows to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Maximum number of rows to print
    #[arg(long)]
    pub limit: Option<usize>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
