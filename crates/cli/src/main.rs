use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use obgyn_core::config::{id_strategy_from_env_value, store_source_from_env_value};
use obgyn_core::constants::{EMPTY_PLACEHOLDER, ID_STRATEGY_ENV, STORE_PATH_ENV};
use obgyn_core::derive::{bmi, estimated_delivery_date, gestational_age};
use obgyn_core::directory::{Directory, DirectoryAction, StatusFilter};
use obgyn_core::editors::anc::{AncAction, AncEditor};
use obgyn_core::editors::Edit;
use obgyn_core::fields::anc::AncField;
use obgyn_core::fields::entries::{
    FollowUpTestField, FollowUpVisitField, PastPregnancyField, VisitRecordField,
};
use obgyn_core::fields::gyne::GyneField;
use obgyn_core::fields::history::MedicalHistoryField;
use obgyn_core::fields::profile::ProfileField;
use obgyn_core::{
    Component, Context, CoreConfig, FieldSelector, IdStrategy, InMemoryStore, Lookup,
    PatientStore, StoreSource,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "obgyn")]
#[command(about = "Obstetrics and gynecology patient records CLI")]
struct Cli {
    /// YAML patient store (overrides OBGYN_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Id strategy for new entries: random or sequential (overrides OBGYN_ID_STRATEGY)
    #[arg(long, global = true)]
    ids: Option<IdStrategy>,
    /// Date to treat as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List patients in the directory
    List {
        /// Match against name, UHID or mobile number
        #[arg(long, default_value = "")]
        query: String,
        /// all, active, delivered or closed
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show a patient's record
    Show {
        /// Patient UHID
        uhid: String,
    },
    /// Compute BMI from height (cm) and weight (kg)
    Bmi { height: f64, weight: f64 },
    /// Compute the estimated delivery date from an LMP
    Edd { lmp: NaiveDate },
    /// Compute gestational age from an LMP
    Ga {
        lmp: NaiveDate,
        /// Date to compute the age on (default: today)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// List the editable field paths of a record kind
    Fields {
        /// anc, gyne, profile, medical-history, follow-up-visit, follow-up-test,
        /// past-pregnancy or visit
        record: String,
    },
    /// Start an ANC case, apply field edits and print the case as YAML
    Anc {
        /// Patient UHID whose name and age start the case
        #[arg(long)]
        patient: Option<String>,
        /// Field edit as path=value, e.g. bookingVisit.weight=56
        #[arg(long = "set", value_name = "PATH=VALUE")]
        edits: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("obgyn=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.store, cli.ids)?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    tracing::debug!(
        store = %config.store_source(),
        ids = %config.id_strategy(),
        %today,
        "configuration resolved"
    );

    match cli.command {
        Some(Commands::List { query, status }) => {
            let store = InMemoryStore::open(config.store_source())?;
            let mut ctx = Context::from_config(&config, today);
            let directory = Directory::new(store.list_summaries(), today)
                .reduce(DirectoryAction::Search(query), &mut ctx)?
                .reduce(DirectoryAction::SetStatus(status), &mut ctx)?;
            let view = directory.view();

            if view.is_empty() {
                println!("No patients found.");
            }
            for row in &view.rows {
                println!(
                    "{:<12} {:<18} {:>3}F {:<4} {:<10} GA {:<6} EDD {:<10} {:<9} {}",
                    row.uhid,
                    row.name,
                    row.age,
                    row.blood_group,
                    row.mobile,
                    row.weeks_pregnant
                        .map_or(EMPTY_PLACEHOLDER.to_string(), |w| format!("{w}w")),
                    date_or_placeholder(row.edd),
                    row.status.as_str(),
                    if row.high_risk { "HIGH RISK" } else { "" },
                );
            }
            println!("{} of {} patients", view.rows.len(), view.total);
        }
        Some(Commands::Show { uhid }) => {
            let store = InMemoryStore::open(config.store_source())?;
            match store.get_by_identifier(&uhid) {
                Lookup::Found(record) => print!("{}", serde_yaml::to_string(record)?),
                Lookup::NotFound => eprintln!(
                    "Patient {} data not available. Only patients with a full record can be opened.",
                    uhid.trim()
                ),
            }
        }
        Some(Commands::Bmi { height, weight }) => match bmi(height, weight) {
            Some(value) => println!("BMI: {value:.1}"),
            None => eprintln!("Height and weight must both be positive"),
        },
        Some(Commands::Edd { lmp }) => match estimated_delivery_date(lmp) {
            Some(edd) => println!("EDD: {edd}"),
            None => eprintln!("EDD is out of the supported date range"),
        },
        Some(Commands::Ga { lmp, on }) => {
            let on = on.unwrap_or(today);
            match gestational_age(lmp, on) {
                Some(age) => println!("Gestational age on {on}: {age}"),
                None => eprintln!("{on} is before the LMP {lmp}"),
            }
        }
        Some(Commands::Fields { record }) => {
            let fields = field_listing(&record)
                .with_context(|| format!("unknown record kind '{record}'"))?;
            for (path, kind) in fields {
                println!("{path:<40} {kind}");
            }
        }
        Some(Commands::Anc { patient, edits }) => {
            let (name, age) = match patient {
                Some(uhid) => {
                    let store = InMemoryStore::open(config.store_source())?;
                    let summary = store
                        .list_summaries()
                        .iter()
                        .find(|s| s.uhid.as_str() == uhid.trim())
                        .with_context(|| format!("no patient with UHID '{uhid}'"))?;
                    (summary.name.to_string(), summary.age)
                }
                None => ("Patient".to_string(), 0),
            };

            let mut ctx = Context::from_config(&config, today);
            let mut editor = AncEditor::new(name, age, today).reduce(AncAction::NewCase, &mut ctx)?;
            for edit in edits {
                let (path, raw) = edit
                    .split_once('=')
                    .with_context(|| format!("edit '{edit}' must look like path=value"))?;
                editor = editor.reduce(AncAction::Edit(Edit::input(path, raw)), &mut ctx)?;
            }
            let editor = editor.reduce(AncAction::Save, &mut ctx)?;
            if let Some(case) = editor.case() {
                print!("{}", serde_yaml::to_string(case)?);
            }
        }
        None => {
            println!("Use 'obgyn --help' for commands");
        }
    }

    Ok(())
}

/// Environment values, overridden by command-line flags.
fn resolve_config(
    store: Option<PathBuf>,
    ids: Option<IdStrategy>,
) -> anyhow::Result<CoreConfig> {
    let store_source = match store {
        Some(path) => StoreSource::File(path),
        None => store_source_from_env_value(std::env::var(STORE_PATH_ENV).ok()),
    };
    let id_strategy = match ids {
        Some(strategy) => strategy,
        None => id_strategy_from_env_value(std::env::var(ID_STRATEGY_ENV).ok())?,
    };
    Ok(CoreConfig::new(store_source, id_strategy)?)
}

fn date_or_placeholder(date: Option<NaiveDate>) -> String {
    date.map_or(EMPTY_PLACEHOLDER.to_string(), |d| d.to_string())
}

fn listing<F: FieldSelector>() -> Vec<(String, String)> {
    F::all()
        .into_iter()
        .map(|field| (field.to_string(), field.kind().to_string()))
        .collect()
}

fn field_listing(record: &str) -> Option<Vec<(String, String)>> {
    let fields = match record.trim() {
        "anc" => listing::<AncField>(),
        "gyne" => listing::<GyneField>(),
        "profile" => listing::<ProfileField>(),
        "medical-history" => listing::<MedicalHistoryField>(),
        "follow-up-visit" => listing::<FollowUpVisitField>(),
        "follow-up-test" => listing::<FollowUpTestField>(),
        "past-pregnancy" => listing::<PastPregnancyField>(),
        "visit" => listing::<VisitRecordField>(),
        _ => return None,
    };
    Some(fields)
}
