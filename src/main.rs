mod cli;

use std::collections::BTreeSet;
use std::path::Path;
use std::process;

use owo_colors::OwoColorize;
use scanview::prelude::*;

use cli::{Args, ExcludesArg, SortArg, Tab};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!();
        eprintln!("❌ {}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::LoadFailed.as_i32());
    }
}

async fn run() -> Result<()> {
    let args = Args::parse_args();

    // Read the embedded payload and run the load pipeline
    let payload = FileSystemPayloadReader::new().read_payload(Path::new(&args.report))?;
    let use_case = LoadReportUseCase::new(StderrProgressReporter::new());
    let model = use_case.execute(payload).await?;

    // One view, one query
    let queries = ReportQueries::new(&model);
    let page_spec = PageSpec::new(args.offset, args.limit);
    match args.tab {
        Tab::Packages => print_packages(&queries, &args, &page_spec),
        Tab::Violations => print_violations(&model, &queries, &args, &page_spec),
        Tab::Vulnerabilities => print_vulnerabilities(&model, &queries, &args, &page_spec),
    }
}

fn sort_direction(args: &Args) -> SortDirection {
    if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    }
}

fn severity_set(args: &Args) -> Option<BTreeSet<u8>> {
    if args.severities.is_empty() {
        None
    } else {
        Some(args.severities.iter().copied().collect())
    }
}

fn exclusion_state(args: &Args) -> Option<ExclusionState> {
    args.excludes.map(|choice| match choice {
        ExcludesArg::Excluded => ExclusionState::Excluded,
        ExcludesArg::Included => ExclusionState::Included,
    })
}

fn print_violations(
    model: &AggregationModel,
    queries: &ReportQueries,
    args: &Args,
    page_spec: &PageSpec,
) -> Result<()> {
    let sort = match args.sort {
        None => None,
        Some(SortArg::Severity) => Some(ViolationSort::new(
            ViolationSortField::SeverityIndex,
            sort_direction(args),
        )),
        Some(SortArg::Package) => Some(ViolationSort::new(
            ViolationSortField::Package,
            sort_direction(args),
        )),
        Some(SortArg::Rule) => Some(ViolationSort::new(
            ViolationSortField::Rule,
            sort_direction(args),
        )),
        Some(SortArg::Id) => {
            anyhow::bail!("The violations view cannot be sorted by 'id'")
        }
    };
    let filter = ViolationFilter {
        package: args.package.clone(),
        rule: args.rule.clone(),
        message: args.message.clone(),
        severities: severity_set(args),
        exclusion: exclusion_state(args),
    };

    let page = queries.list_rule_violations(&filter, sort.as_ref(), page_spec);

    let package_width = column_width(page.items.iter().map(|v| v.package_label()), 7);
    let rule_width = column_width(page.items.iter().map(|v| v.rule()), 4);
    println!(
        "{:<9} {:<2} {:<package_width$} {:<rule_width$} MESSAGE",
        "SEVERITY", "EX", "PACKAGE", "RULE"
    );
    for violation in &page.items {
        println!(
            "{} {:<2} {:<package_width$} {:<rule_width$} {}",
            violation_severity_cell(violation),
            excludes_cell(model, violation.package()),
            violation.package_label(),
            violation.rule(),
            violation.message()
        );
    }
    print_footer(page.items.len(), page.total_count, args.offset, "violations");
    Ok(())
}

fn print_vulnerabilities(
    model: &AggregationModel,
    queries: &ReportQueries,
    args: &Args,
    page_spec: &PageSpec,
) -> Result<()> {
    let sort = match args.sort {
        None => None,
        Some(SortArg::Severity) => Some(VulnerabilitySort::new(
            VulnerabilitySortField::SeverityIndex,
            sort_direction(args),
        )),
        Some(SortArg::Package) => Some(VulnerabilitySort::new(
            VulnerabilitySortField::Package,
            sort_direction(args),
        )),
        Some(SortArg::Id) => Some(VulnerabilitySort::new(
            VulnerabilitySortField::Id,
            sort_direction(args),
        )),
        Some(SortArg::Rule) => {
            anyhow::bail!("The vulnerabilities view cannot be sorted by 'rule'")
        }
    };
    let filter = VulnerabilityFilter {
        package: args.package.clone(),
        id: args.id.clone(),
        severities: severity_set(args),
        exclusion: exclusion_state(args),
    };

    let page = queries.list_vulnerabilities(&filter, sort.as_ref(), page_spec);

    let id_width = column_width(page.items.iter().map(|v| v.id()), 2);
    let package_width = column_width(page.items.iter().map(|v| v.package_label()), 7);
    println!(
        "{:<9} {:<2} {:<id_width$} {:<package_width$} REFERENCES",
        "SEVERITY", "EX", "ID", "PACKAGE"
    );
    for vulnerability in &page.items {
        let references: Vec<&str> = vulnerability
            .references()
            .iter()
            .map(|reference| reference.url())
            .collect();
        println!(
            "{} {:<2} {:<id_width$} {:<package_width$} {}",
            vulnerability_severity_cell(vulnerability),
            excludes_cell(model, vulnerability.package()),
            vulnerability.id(),
            vulnerability.package_label(),
            references.join(", ")
        );
    }
    print_footer(
        page.items.len(),
        page.total_count,
        args.offset,
        "vulnerabilities",
    );
    Ok(())
}

fn print_packages(queries: &ReportQueries, args: &Args, page_spec: &PageSpec) -> Result<()> {
    let sort = match args.sort {
        None => None,
        Some(SortArg::Id) | Some(SortArg::Package) => Some(PackageSort::new(
            PackageSortField::Id,
            sort_direction(args),
        )),
        Some(other) => anyhow::bail!(
            "The packages view cannot be sorted by '{:?}'",
            other
        ),
    };
    let filter = PackageFilter {
        id: args.package.clone(),
        license: args.license.clone(),
        exclusion: exclusion_state(args),
    };

    let page = queries.list_packages(&filter, sort.as_ref(), page_spec);

    let id_width = column_width(page.items.iter().map(|p| p.id().as_str()), 7);
    println!("{:<2} {:<id_width$} LICENSES", "EX", "PACKAGE");
    for package in &page.items {
        let mut licenses: Vec<&str> = package
            .declared_licenses()
            .iter()
            .chain(package.detected_licenses().iter())
            .map(String::as_str)
            .collect();
        licenses.dedup();
        println!(
            "{:<2} {:<id_width$} {}",
            if package.is_excluded() { "x" } else { " " },
            package.id().as_str(),
            licenses.join(", ")
        );
    }
    print_footer(page.items.len(), page.total_count, args.offset, "packages");
    Ok(())
}

/// Widest value in the column, clamped to keep rows readable
fn column_width<'a>(values: impl Iterator<Item = &'a str>, minimum: usize) -> usize {
    values
        .map(str::len)
        .max()
        .unwrap_or(minimum)
        .clamp(minimum, 60)
}

fn excludes_cell(model: &AggregationModel, handle: PackageHandle) -> &'static str {
    match model.package(handle) {
        Some(package) if package.is_excluded() => "x",
        _ => " ",
    }
}

/// Severity column, padded before coloring so ANSI codes don't break alignment
fn violation_severity_cell(violation: &RuleViolation) -> String {
    if violation.is_resolved() {
        return format!("{:<9}", "RESOLVED").green().to_string();
    }
    let label = format!("{:<9}", violation.severity().label());
    match violation.severity() {
        ViolationSeverity::Error => label.red().to_string(),
        ViolationSeverity::Warning => label.yellow().to_string(),
        ViolationSeverity::Hint => label.blue().to_string(),
    }
}

fn vulnerability_severity_cell(vulnerability: &Vulnerability) -> String {
    if vulnerability.is_resolved() {
        return format!("{:<9}", "RESOLVED").green().to_string();
    }
    let label = format!("{:<9}", vulnerability.severity().label());
    match vulnerability.severity() {
        VulnerabilitySeverity::Critical => label.red().to_string(),
        VulnerabilitySeverity::High => label.yellow().to_string(),
        VulnerabilitySeverity::Medium => label.blue().to_string(),
        VulnerabilitySeverity::Low | VulnerabilitySeverity::Unknown => label,
    }
}

fn print_footer(shown: usize, total: usize, offset: usize, noun: &str) {
    println!();
    if total == 0 {
        println!("No {}", noun);
    } else if shown == 0 {
        println!("0 of {} {}", total, noun);
    } else {
        println!("{}-{} of {} {}", offset + 1, offset + shown, total, noun);
    }
}
