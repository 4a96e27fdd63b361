//! Command implementations
//!
//! Each data command loads the table fresh, builds the chart and renders one
//! view of it. Settings are resolved relative to the table's directory.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, FilterArgs, OutputFormat};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_dir, global_config_path, local_config_path, Settings};
use crate::domain::{describe_filters, OrgChart, StructuralFilter, ViewMode};
use crate::infrastructure::ServiceContainer;
use crate::tree_traits::{node_label, TreeNodeConvert};

/// Execute the CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree {
            file,
            view,
            format,
            filters,
        }) => cmd_tree(file, *view, *format, filters),
        Some(Commands::Summary {
            file,
            format,
            filters,
        }) => cmd_summary(file, *format, filters),
        Some(Commands::Options { file, filters }) => cmd_options(file, filters),
        Some(Commands::Chain { file, id }) => cmd_chain(file, id),
        Some(Commands::Config { command }) => execute_config_command(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| CliError::io("print help", e))?;
            Ok(())
        }
    }
}

fn load_settings(file: &Path) -> CliResult<Settings> {
    Ok(Settings::load(file.parent())?)
}

/// Loaded chart together with the settings that shaped it.
fn load_chart(file: &Path) -> CliResult<(OrgChart, Settings)> {
    let settings = load_settings(file)?;
    let container = ServiceContainer::new(settings.clone());
    let chart = container.chart_service().load(file)?;
    Ok((chart, settings))
}

/// Structural filter with selections that do not fit the levels above them dropped.
///
/// Values found nowhere in the table are kept and yield an empty view.
fn effective_filter(chart: &OrgChart, filters: &FilterArgs) -> StructuralFilter {
    let requested = filters.to_filter();
    let filter = chart.reconcile_filter(&requested);
    if filter != requested {
        output::warning(&"some filter values lie outside the selected levels and were ignored");
        debug!("effective_filter: {:?} -> {:?}", requested, filter);
    }
    filter
}

#[instrument(skip(filters))]
fn cmd_tree(
    file: &Path,
    view: Option<ViewMode>,
    format: OutputFormat,
    filters: &FilterArgs,
) -> CliResult<()> {
    let (chart, settings) = load_chart(file)?;
    let mode = view.unwrap_or(settings.default_view);
    let filter = effective_filter(&chart, filters);
    let forest = chart.view(mode, &filter, filters.query());

    match format {
        OutputFormat::Json => output::info(&serde_json::to_string_pretty(&forest)?),
        OutputFormat::Tree => {
            output::header(&describe_filters(mode, &filter, filters.query()));
            output::info(&forest.as_slice().to_tree_string());
        }
    }
    Ok(())
}

#[instrument(skip(filters))]
fn cmd_summary(file: &Path, format: OutputFormat, filters: &FilterArgs) -> CliResult<()> {
    let (chart, settings) = load_chart(file)?;
    let filter = effective_filter(&chart, filters);
    let summary = chart.summary(&filter, filters.query());

    if format == OutputFormat::Json {
        output::info(&serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::header(&describe_filters(settings.default_view, &filter, filters.query()));
    output::count("Manpower", summary.manpower);
    output::count("Headcount", summary.headcount);
    output::count("Vacant", summary.vacant);
    if !summary.by_title.is_empty() {
        output::header(&"By corporate title");
        for t in &summary.by_title {
            output::count(&t.title, t.total);
        }
    }
    if !summary.vacant_by_title.is_empty() {
        output::header(&"Vacancies by corporate title");
        for t in &summary.vacant_by_title {
            output::count(&t.title, t.total);
        }
    }
    Ok(())
}

fn print_option_list(label: &str, values: &[String]) {
    output::header(&format!("{} ({})", label, values.len()));
    for v in values {
        output::detail(v);
    }
}

#[instrument(skip(filters))]
fn cmd_options(file: &Path, filters: &FilterArgs) -> CliResult<()> {
    let (chart, _) = load_chart(file)?;
    let filter = effective_filter(&chart, filters);
    let options = chart.filter_options(&filter);

    print_option_list("Groups", &options.groups);
    print_option_list("Divisions", &options.divisions);
    print_option_list("Departments", &options.departments);
    print_option_list("Units", &options.units);
    print_option_list("Corporate titles", &options.corporate_titles);
    Ok(())
}

#[instrument]
fn cmd_chain(file: &Path, id: &str) -> CliResult<()> {
    let (chart, _) = load_chart(file)?;
    let chain = chart.chain(id);
    if chain.is_empty() {
        return Err(CliError::InvalidArgs(format!("no node with id '{}'", id)));
    }
    // Top manager first, the requested node last.
    for (depth, node) in chain.iter().rev().enumerate() {
        output::info(&format!("{}{}", "  ".repeat(depth), node_label(node)));
    }
    Ok(())
}

fn execute_config_command(cmd: &ConfigCommands) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show { dir } => {
            let settings = Settings::load(dir.as_deref())?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let status = if path.exists() { "exists" } else { "not found" };
                    output::action("Global", &format!("{} ({})", path.display(), status));
                }
                None => output::action("Global", &"<no config directory>"),
            }
            let local = local_config_path(Path::new("."));
            let status = if local.exists() { "exists" } else { "not found" };
            output::action("Local", &format!("{} ({})", local.display(), status));
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path: PathBuf = if *global {
                let dir = global_config_dir().ok_or_else(|| {
                    CliError::Usage("cannot determine config directory".to_string())
                })?;
                std::fs::create_dir_all(&dir)
                    .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
                dir.join("orgchart.toml")
            } else {
                local_config_path(Path::new("."))
            };

            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartOptions, EmployeeRecord};

    fn chart() -> OrgChart {
        let row = |id: &str, supervisor: &str, levels: [&str; 3]| {
            let [group, division, department] = levels;
            EmployeeRecord {
                employee_id: id.into(),
                name: format!("Person {}", id),
                position: "Analyst".into(),
                supervisor_id: supervisor.into(),
                group: group.into(),
                division: division.into(),
                department: department.into(),
                ..EmployeeRecord::default()
            }
        };
        let records = vec![
            EmployeeRecord {
                position: "CEO".into(),
                ..row("E0", "", ["", "", ""])
            },
            row("E1", "E0", ["Tech", "Platform", "Core"]),
            row("E2", "E0", ["Risk", "Credit", "Scoring"]),
        ];
        OrgChart::from_records(&records, ChartOptions::default())
    }

    #[test]
    fn test_unknown_department_is_kept_and_view_is_empty() {
        // Arrange
        let chart = chart();
        let filters = FilterArgs {
            department: Some("Ghost".into()),
            ..FilterArgs::default()
        };

        // Act
        let filter = effective_filter(&chart, &filters);
        let view = chart.view(ViewMode::Reporting, &filter, filters.query());

        // Assert
        assert_eq!(filter.department.as_deref(), Some("Ghost"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_department_outside_selected_group_is_reset() {
        // Arrange
        let chart = chart();
        let filters = FilterArgs {
            group: Some("Risk".into()),
            department: Some("Core".into()),
            ..FilterArgs::default()
        };

        // Act
        let filter = effective_filter(&chart, &filters);

        // Assert
        assert_eq!(filter.group.as_deref(), Some("Risk"));
        assert_eq!(filter.department, None);
    }
}
