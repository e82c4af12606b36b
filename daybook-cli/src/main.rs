use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use daybook_core::{
    parse_instant, parse_zone, records_in_month, summarize_month, DateGrouper, LocaleId,
    YearMonth,
};
use daybook_export::{export_to_file, ExportFormat, LedgerView};
use daybook_ingest::{load_snapshot, raw_rows};
use env_logger::Env;
use log::debug;
use std::path::PathBuf;

mod config;
mod render;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "daybook", version, about = "Day-grouped views and exports of a personal-finance ledger")]
struct Cli {
    /// Config file (default: ~/.daybook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Backend snapshot: JSON dump of transactions, categories, income, payment_methods
    #[arg(long)]
    input: PathBuf,

    /// Reference instant for "today"/"yesterday" labels (default: now)
    #[arg(long)]
    now: Option<String>,

    /// Label language: es | en (default from config)
    #[arg(long)]
    locale: Option<LocaleId>,

    /// IANA time zone for calendar days (default from config)
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every transaction grouped by calendar day, newest first
    Group {
        #[command(flatten)]
        view: ViewArgs,

        /// Read rows untyped so a malformed record is reported by position
        #[arg(long)]
        raw: bool,
    },

    /// Print one month of transactions grouped by day
    Month {
        #[command(flatten)]
        view: ViewArgs,

        /// YYYY-MM (default: the month containing --now)
        #[arg(long)]
        month: Option<YearMonth>,
    },

    /// Print income, expenses and per-category totals for a month
    Summary {
        #[command(flatten)]
        view: ViewArgs,

        /// YYYY-MM (default: the month containing --now)
        #[arg(long)]
        month: Option<YearMonth>,
    },

    /// Export transactions to CSV or JSON
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// csv | grouped-csv | json (default from config)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Only export this month (YYYY-MM)
        #[arg(long)]
        month: Option<YearMonth>,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

/// Settings after merging command-line flags over the config file.
struct Settings {
    locale: LocaleId,
    zone: Tz,
    now: DateTime<Tz>,
}

impl Settings {
    fn resolve(view: &ViewArgs, cfg: &Config) -> Result<Self> {
        let locale = view.locale.unwrap_or(cfg.display.locale);
        let tz = view.tz.as_deref().unwrap_or(&cfg.display.timezone);
        let zone = parse_zone(tz)?;
        let now = match view.now.as_deref() {
            Some(s) => parse_instant(s, &zone).context("--now")?,
            None => Utc::now().with_timezone(&zone),
        };
        debug!("locale={locale} zone={zone} now={now}");
        Ok(Self { locale, zone, now })
    }

    fn grouper(&self) -> DateGrouper<LocaleId> {
        DateGrouper::new(self.locale, self.zone)
    }

    fn month_or_current(&self, month: Option<YearMonth>) -> YearMonth {
        month.unwrap_or_else(|| YearMonth::containing(self.now.date_naive()))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Group { view, raw } => {
            let settings = Settings::resolve(&view, &cfg)?;
            let grouper = settings.grouper();
            if raw {
                let rows = raw_rows(&view.input, "transactions")?;
                let groups = grouper.group_by_date(&rows, &settings.now)?;
                print!("{}", render::render_groups(&groups, render::describe_row));
            } else {
                let snapshot = load_snapshot(&view.input)?;
                let groups = grouper.group_by_date(&snapshot.transactions, &settings.now)?;
                print!(
                    "{}",
                    render::render_groups(&groups, |t| render::describe_transaction(&snapshot, t))
                );
            }
        }

        Command::Month { view, month } => {
            let settings = Settings::resolve(&view, &cfg)?;
            let month = settings.month_or_current(month);
            let snapshot = load_snapshot(&view.input)?;

            let in_month = records_in_month(&snapshot.transactions, month, &settings.zone)?;
            let groups = settings.grouper().group_by_date(&in_month, &settings.now)?;

            println!(
                "# {}  (prev {} | next {})\n",
                month.label(&settings.locale),
                month.prev(),
                month.next()
            );
            if groups.is_empty() {
                println!("(no transactions)");
            }
            print!(
                "{}",
                render::render_groups(&groups, |t| render::describe_transaction(&snapshot, t))
            );
        }

        Command::Summary { view, month } => {
            let settings = Settings::resolve(&view, &cfg)?;
            let month = settings.month_or_current(month);
            let snapshot = load_snapshot(&view.input)?;

            let summary = summarize_month(
                &snapshot.transactions,
                &snapshot.income,
                &snapshot.categories,
                month,
                &settings.zone,
            )?;
            print!(
                "{}",
                render::render_summary(
                    &summary,
                    &settings.locale,
                    render::uncategorized_label(settings.locale)
                )
            );
        }

        Command::Export {
            view,
            out,
            format,
            month,
        } => {
            let settings = Settings::resolve(&view, &cfg)?;
            let snapshot = load_snapshot(&view.input)?;
            let grouper = settings.grouper();
            let ledger = LedgerView::new(&snapshot, &grouper, settings.now).with_month(month);

            let format = format.unwrap_or(cfg.export.default_format);
            let rows = export_to_file(&out, format, &ledger)?;
            println!("Wrote {} transactions to {} ({})", rows, out.display(), format);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}
