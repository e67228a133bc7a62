//! Subcommands of the `koltseg` binary.
use std::{path::PathBuf, process::ExitCode};

use chrono::Utc;
use clap::{Args, Subcommand};
use engine::{
    BarChart, EntryStore, ExpenseDraft, FileKeyValue, KeyedEntryStore, SummaryView,
    chart::SvgSurface,
};

use crate::{BoxError, settings::Settings};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new expense.
    Add(AddArgs),
    /// List every recorded expense.
    List,
    /// Print totals, entry count, largest expense and per-category totals.
    Stats,
    /// Draw the per-category bar chart as an SVG file.
    Chart(ChartArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    date: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    amount: String,
    #[arg(long)]
    label: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Payment method: cash, card, transfer or any other tag.
    #[arg(long)]
    payment: Option<String>,
    /// Confirm that the data was checked.
    #[arg(long)]
    confirm: bool,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[arg(long, default_value = "chart.svg")]
    out: PathBuf,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
}

pub fn run(command: Command, settings: &Settings) -> Result<ExitCode, BoxError> {
    let mut store = KeyedEntryStore::with_key(
        FileKeyValue::new(&settings.store.path),
        settings.store.key.as_str(),
    );

    match command {
        Command::Add(args) => Ok(if add(&mut store, args)? {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }),
        Command::List => {
            for entry in store.load_all() {
                println!("{entry}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Stats => {
            print!("{}", stats_report(&store));
            Ok(ExitCode::SUCCESS)
        }
        Command::Chart(args) => chart(&store, args, settings),
    }
}

/// Validates and stores a new entry. Returns `false` when the input was
/// rejected; the field messages are already printed.
fn add(store: &mut impl EntryStore, args: AddArgs) -> Result<bool, BoxError> {
    let draft = ExpenseDraft {
        date: args.date,
        category: args.category,
        amount: args.amount,
        label: args.label,
        notes: args.notes,
        payment: args.payment,
        confirmed: args.confirm,
    };

    let entry = match draft.validate(Utc::now()) {
        Ok(entry) => entry,
        Err(errors) => {
            tracing::info!("form validation: {} field(s) rejected", errors.0.len());
            for err in errors.iter() {
                eprintln!("{}: {}", err.field.label(), err.message);
            }
            return Ok(false);
        }
    };

    tracing::debug!(?entry, "saving expense");
    store.append(entry)?;
    println!("Költség rögzítve.");
    Ok(true)
}

fn stats_report(store: &impl EntryStore) -> String {
    let (summary, totals) = engine::aggregate(store);
    let view = SummaryView::new(&summary, &totals);

    let mut out = format!(
        "Összes költés: {}\nTételek száma: {}\nLegnagyobb tétel: {}\n",
        view.total, view.count, view.max
    );
    if !view.categories.is_empty() {
        out.push_str("Kategóriák:\n");
        for line in &view.categories {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn chart(
    store: &impl EntryStore,
    args: ChartArgs,
    settings: &Settings,
) -> Result<ExitCode, BoxError> {
    let width = args.width.unwrap_or(settings.chart.width);
    let height = args.height.unwrap_or(settings.chart.height);

    let (_, totals) = engine::aggregate(store);
    let mut surface = SvgSurface::new(width, height);
    BarChart::default().render(&mut surface, &totals);
    surface.write_to(&args.out)?;

    tracing::info!(path = %args.out.display(), categories = totals.len(), "chart written");
    println!("{}", args.out.display());
    Ok(ExitCode::SUCCESS)
}
