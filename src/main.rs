// ==========================================
// Vegetation Cut - command line entry point
// ==========================================
// Usage:
//   vegetation-cut [--db PATH] [--lang pt-BR|en] [--today YYYY-MM-DD] <command> ...
//
// Commands:
//   priority <file> [--min-days N]
//   history  <file>
//   export   <file> <out.csv> [--min-days N] [--history]
//   template <out.csv>
//   legend
//   config   show | rename <id> <name> | machine <id> <code>
//            | intervals <id> <rainy> <dry> | rainy-months <m,m,...>
//            | color <#RRGGBB> | max-days <n> | areas <n> | reset
//            | snapshot [out.json] | restore <file.json>
// ==========================================

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;

use vegetation_cut::api::{HistoryView, PriorityView};
use vegetation_cut::app::{get_default_db_path, AppState};
use vegetation_cut::domain::types::Machine;
use vegetation_cut::i18n::{
    machine_label, month_label, period_label, set_locale, status_label, t, t_with_args,
    DEFAULT_LOCALE,
};
use vegetation_cut::importer::CutImportReport;
use vegetation_cut::logging;

const USAGE: &str = "usage: vegetation-cut [--db PATH] [--lang pt-BR|en] [--today YYYY-MM-DD] \
<priority|history|export|template|legend|config> ...";

// ==========================================
// Argument handling
// ==========================================

struct GlobalOptions {
    db_path: String,
    today: NaiveDate,
}

/// Remove `--name value` from `args`
fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    match args.iter().position(|a| a == name) {
        None => Ok(None),
        Some(idx) if idx + 1 < args.len() => {
            let value = args.remove(idx + 1);
            args.remove(idx);
            Ok(Some(value))
        }
        Some(_) => bail!("option {} needs a value", name),
    }
}

/// Remove a bare `--name` flag from `args`
fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(idx) => {
            args.remove(idx);
            true
        }
        None => false,
    }
}

fn parse_global_options(args: &mut Vec<String>) -> Result<GlobalOptions> {
    let lang = take_option(args, "--lang")?;
    set_locale(lang.as_deref().unwrap_or(DEFAULT_LOCALE));

    let db_path = take_option(args, "--db")?.unwrap_or_else(get_default_db_path);

    let today = match take_option(args, "--today")? {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --today value '{}'", raw))?,
        None => chrono::Local::now().date_naive(),
    };

    Ok(GlobalOptions { db_path, today })
}

fn parse_min_days(args: &mut Vec<String>) -> Result<i64> {
    match take_option(args, "--min-days")? {
        Some(raw) => raw
            .parse::<i64>()
            .with_context(|| format!("invalid --min-days value '{}'", raw)),
        None => Ok(0),
    }
}

fn arg<'a>(args: &'a [String], idx: usize, what: &str) -> Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument: {}\n{}", what, USAGE))
}

fn parse_u32(raw: &str, what: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .with_context(|| format!("invalid {} '{}'", what, raw))
}

// ==========================================
// Output
// ==========================================

fn print_import_summary(import: &CutImportReport) {
    println!(
        "{}",
        t_with_args(
            "import.summary",
            &[
                ("accepted", &import.accepted_count().to_string()),
                ("dropped", &import.dropped_count().to_string()),
            ],
        )
    );
    for rejection in &import.rejected {
        println!(
            "  {}",
            t_with_args(
                "import.dropped_row",
                &[
                    ("row", &rejection.row_number.to_string()),
                    ("reason", &rejection.reason.to_string()),
                ],
            )
        );
    }
}

fn print_priority_view(view: &PriorityView) {
    let report = &view.report;

    println!(
        "{}",
        t_with_args("common.generated_on", &[("date", &report.generated_on.format("%d/%m/%Y").to_string())])
    );
    println!(
        "{}",
        t_with_args("period.banner", &[("period", &period_label(report.period))])
    );
    print_import_summary(&view.import);
    println!();

    println!(
        "{:<4} {:<28} {:<12} {:>6} {:>6} {:>6} {:<10} {:<10} {:<8}",
        "#",
        t("report.column.area_name"),
        t("report.column.machine"),
        "days",
        "rainy",
        "dry",
        t("report.column.status"),
        t("report.column.cut_month"),
        t("report.column.color"),
    );
    for (rank, row) in report.rows.iter().enumerate() {
        println!(
            "{:<4} {:<28} {:<12} {:>6} {:>6} {:>6} {:<10} {:<10} {:<8}",
            rank + 1,
            row.name,
            machine_label(row.machine),
            row.days_since_cut,
            row.rainy_interval_days,
            row.dry_interval_days,
            status_label(row.status),
            month_label(row.cut_month()),
            row.color,
        );
    }

    println!();
    println!(
        "{}",
        t_with_args(
            "report.summary",
            &[
                ("total", &report.rows.len().to_string()),
                ("overdue", &report.overdue_count().to_string()),
            ],
        )
    );

    if !report.areas_without_cut.is_empty() {
        let names: Vec<&str> = report
            .areas_without_cut
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        println!("{}", t_with_args("report.without_cut", &[("areas", &names.join(", "))]));
    }

    println!();
    println!("{}", t("report.legend_title"));
    for entry in &view.legend {
        println!(
            "  {:>10}  {}",
            t_with_args("report.days", &[("days", &entry.days.to_string())]),
            entry.color
        );
    }
}

fn print_history_view(view: &HistoryView) {
    print_import_summary(&view.import);
    println!();
    for row in &view.report.rows {
        println!(
            "{:<28} {:<10} {:<12} {:>6} {:<10} {:<8}",
            row.name,
            row.cut_date.format("%d/%m/%Y"),
            machine_label(row.machine),
            row.days_since_cut,
            status_label(row.status),
            period_label(row.period),
        );
    }
}

// ==========================================
// Commands
// ==========================================

fn run_config(state: &AppState, args: &[String]) -> Result<()> {
    let api = &state.config_api;
    let action = args.first().map(String::as_str).unwrap_or("show");

    match action {
        "show" => {
            let config = api.get_config()?;
            for area in &config.areas {
                println!(
                    "{:>3}  {:<28} {:<12} {:>4} {:>4}",
                    area.id,
                    area.name,
                    machine_label(area.machine),
                    area.rainy_season_interval_days,
                    area.dry_season_interval_days,
                );
            }
            let months: Vec<String> = config
                .calendar
                .rainy_months
                .iter()
                .map(|m| month_label(*m))
                .collect();
            println!();
            println!("{}: {}", period_label(vegetation_cut::Period::Rainy), months.join(", "));
            println!("max_days: {}", config.scale.max_days);
            println!("default_color: {}", config.scale.default_color);
        }
        "rename" => {
            let id = parse_u32(arg(args, 1, "area id")?, "area id")?;
            let name = args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();
            let area = api.rename_area(id, &name)?;
            println!("{} → {}", area.id, area.name);
        }
        "machine" => {
            let id = parse_u32(arg(args, 1, "area id")?, "area id")?;
            let machine = arg(args, 2, "machine")?
                .parse::<Machine>()
                .map_err(|e| anyhow!(e))?;
            let area = api.set_machine(id, machine)?;
            println!("{} → {}", area.id, machine_label(area.machine));
        }
        "intervals" => {
            let id = parse_u32(arg(args, 1, "area id")?, "area id")?;
            let rainy = parse_u32(arg(args, 2, "rainy interval")?, "rainy interval")?;
            let dry = parse_u32(arg(args, 3, "dry interval")?, "dry interval")?;
            let area = api.set_intervals(id, rainy, dry)?;
            println!(
                "{} → {}/{}",
                area.id, area.rainy_season_interval_days, area.dry_season_interval_days
            );
        }
        "rainy-months" => {
            let raw = args.get(1).map(String::as_str).unwrap_or("");
            let months = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_u32(s, "month"))
                .collect::<Result<Vec<_>>>()?;
            api.set_rainy_months(&months)?;
        }
        "color" => {
            api.set_default_color(arg(args, 1, "color")?)?;
        }
        "max-days" => {
            api.set_max_days(parse_u32(arg(args, 1, "max days")?, "max days")?)?;
        }
        "areas" => {
            let config = api.set_area_count(parse_u32(arg(args, 1, "area count")?, "area count")?)?;
            println!("{}", config.area_count());
        }
        "reset" => {
            api.reset_to_defaults()?;
        }
        "snapshot" => {
            let snapshot = api.export_snapshot()?;
            match args.get(1) {
                Some(out) => std::fs::write(out, snapshot)
                    .with_context(|| format!("could not write {}", out))?,
                None => println!("{}", snapshot),
            }
        }
        "restore" => {
            let path = arg(args, 1, "snapshot file")?;
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path))?;
            let restored = api.import_snapshot(&json)?;
            println!("{}", restored);
        }
        other => bail!("unknown config action '{}'\n{}", other, USAGE),
    }

    println!("{}", t("common.success"));
    Ok(())
}

fn run(mut args: Vec<String>) -> Result<()> {
    let options = parse_global_options(&mut args)?;
    let min_days = parse_min_days(&mut args)?;
    let history = take_flag(&mut args, "--history");

    let command = match args.first() {
        Some(c) => c.clone(),
        None => bail!(USAGE),
    };
    let rest = &args[1..];

    let state = AppState::new(options.db_path)?;
    let dashboard = &state.dashboard_api;

    match command.as_str() {
        "priority" => {
            let input = arg(rest, 0, "input file")?;
            let view = dashboard.priority_view(Path::new(input), options.today, min_days)?;
            print_priority_view(&view);
        }
        "history" => {
            let input = arg(rest, 0, "input file")?;
            let view = dashboard.history_view(Path::new(input), options.today)?;
            print_history_view(&view);
        }
        "export" => {
            let input = Path::new(arg(rest, 0, "input file")?);
            let output = Path::new(arg(rest, 1, "output file")?);
            if history {
                let view = dashboard.export_history_report(input, output, options.today)?;
                print_import_summary(&view.import);
            } else {
                let view =
                    dashboard.export_priority_report(input, output, options.today, min_days)?;
                print_import_summary(&view.import);
            }
            println!("{}", output.display());
        }
        "template" => {
            let output = arg(rest, 0, "output file")?;
            let rows = dashboard.write_template(Path::new(output))?;
            println!("{} ({})", output, rows);
        }
        "legend" => {
            for entry in dashboard.legend()? {
                println!("{:>4}  {}", entry.days, entry.color);
            }
        }
        "config" => run_config(&state, rest)?,
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }

    Ok(())
}

fn main() -> Result<()> {
    logging::init();

    tracing::debug!(
        app = vegetation_cut::APP_NAME,
        version = vegetation_cut::VERSION,
        "starting"
    );

    run(std::env::args().skip(1).collect())
}
