use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use poolstat::compiler::{compile_incidence_sql, BodyEncoding};
use poolstat::config::{self, Settings};
use poolstat::filter::{FilterEdit, FilterState, Gender};
use poolstat::geo::{CbsaId, StateSelection};
use poolstat::interpreter::{format_population, Estimate, GaugeState};
use poolstat::narrative::{build_prompt, narrate, HttpNarrator, NarrativeError, NarrativeSource};
use poolstat::plan::Source;
use poolstat::Session;
use tracing::warn;

mod logging;

#[derive(Parser)]
#[command(name = "poolstat")]
#[command(about = "Estimate how many people match a set of partner preferences")]
#[command(version)]
struct Cli {
    /// Settings file (YAML)
    #[arg(long, global = true)]
    settings: Option<String>,

    /// Parquet file to query, overriding the settings file
    #[arg(long, global = true)]
    data: Option<String>,

    /// Body-type encoding of the dataset, overriding the settings file
    #[arg(long, global = true, value_enum)]
    body_encoding: Option<EncodingArg>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL a filter compiles to
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Estimate the matching population, live or simulated
    Estimate {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the gauge state as JSON
        #[arg(long)]
        json: bool,
    },
    /// List metro options for a state
    Metros {
        /// State abbreviation, or US for all
        #[arg(long, default_value = "US")]
        state: String,
    },
    /// Show the data source schema and a few rows
    Inspect,
    /// Ask for a one-line commentary on the odds
    Narrate {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the prompt instead of sending it
        #[arg(long)]
        prompt_only: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
    Flags,
    Derived,
}

impl From<EncodingArg> for BodyEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Flags => BodyEncoding::CategoricalFlags,
            EncodingArg::Derived => BodyEncoding::DerivedThreshold,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

/// Filter selection: a JSON snapshot, then individual edits on top of it
#[derive(Args)]
struct FilterArgs {
    /// FilterState JSON file (camelCase fields, missing fields default)
    #[arg(long)]
    filters: Option<String>,

    /// State abbreviation, or US for national
    #[arg(long)]
    state: Option<String>,

    /// Metro (CBSA) id
    #[arg(long)]
    metro: Option<String>,

    #[arg(long, value_enum)]
    gender: Option<GenderArg>,

    /// Age range, e.g. 25-40
    #[arg(long, value_parser = parse_range)]
    age: Option<(i64, i64)>,

    /// Income range in thousands, e.g. 100-500
    #[arg(long, value_parser = parse_range)]
    income: Option<(i64, i64)>,

    /// Height range in inches, e.g. 66-90
    #[arg(long, value_parser = parse_range)]
    height: Option<(i64, i64)>,

    /// Accept people who have kids
    #[arg(long)]
    kids_ok: bool,

    /// Exclude married people
    #[arg(long)]
    unmarried: bool,

    /// Apply the six feet, six figures, six pack preset
    #[arg(long)]
    sixes: bool,
}

fn parse_range(raw: &str) -> Result<(i64, i64), String> {
    let (low, high) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected LOW-HIGH, got '{}'", raw))?;
    let parse = |s: &str| s.trim().parse::<i64>().map_err(|e| format!("'{}': {}", s, e));
    Ok((parse(low)?, parse(high)?))
}

impl FilterArgs {
    fn resolve(&self) -> anyhow::Result<FilterState> {
        let mut filters = match &self.filters {
            Some(path) => {
                let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path))?
            }
            None => FilterState::default(),
        };

        // Gender first: it resets the height range
        if let Some(gender) = self.gender {
            let gender = match gender {
                GenderArg::Male => Gender::Male,
                GenderArg::Female => Gender::Female,
            };
            filters = filters.apply(FilterEdit::SetGender(gender))?;
        }
        if let Some(state) = &self.state {
            filters = filters.apply(FilterEdit::SetState(StateSelection::parse(state)?))?;
        }
        if let Some(metro) = &self.metro {
            filters = filters.apply(FilterEdit::SetMetro(Some(CbsaId::parse(metro)?)))?;
        }
        if let Some((low, high)) = self.age {
            filters = filters.apply(FilterEdit::SetAgeRange(low, high))?;
        }
        if let Some((low, high)) = self.income {
            filters = filters.apply(FilterEdit::SetIncomeRange(low, high))?;
        }
        if let Some((low, high)) = self.height {
            filters = filters.apply(FilterEdit::SetHeightRange(low, high))?;
        }
        if self.kids_ok {
            filters = filters.apply(FilterEdit::SetExcludePeopleWithKids(false))?;
        }
        if self.unmarried {
            filters = filters.apply(FilterEdit::SetIncludeMarried(false))?;
        }
        if self.sixes {
            filters = filters.apply(FilterEdit::ApplySixesPreset)?;
        }
        Ok(filters)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&logging::LogConfig::from_verbosity(cli.verbose));

    let settings = load_settings(&cli)?;

    match cli.command {
        Commands::Query { filters } => handle_query(&settings, &filters.resolve()?),
        Commands::Estimate { filters, json } => handle_estimate(settings, filters.resolve()?, json).await,
        Commands::Metros { state } => handle_metros(settings, &state).await,
        Commands::Inspect => handle_inspect(settings).await,
        Commands::Narrate { filters, prompt_only } => {
            handle_narrate(&settings, &filters.resolve()?, prompt_only).await
        }
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => config::parse_file(path)?,
        None => Settings::default(),
    };
    if let Some(data) = &cli.data {
        settings.source.path = Some(data.clone());
    }
    if let Some(encoding) = cli.body_encoding {
        settings.body_encoding = encoding.into();
    }
    Ok(settings)
}

/// Handle the 'query' subcommand - compile only, no connection
fn handle_query(settings: &Settings, filters: &FilterState) -> anyhow::Result<()> {
    let source = Source::table(settings.source.table.as_str())?;
    println!("{}", compile_incidence_sql(filters, &source, &settings.compile_options()));
    Ok(())
}

/// Handle the 'estimate' subcommand
async fn handle_estimate(settings: Settings, filters: FilterState, json: bool) -> anyhow::Result<()> {
    let mut session = Session::start(settings).await;
    if let Some(banner) = session.banner() {
        eprintln!("! {}", banner);
    }
    session.set_filters(filters)?;

    let gauge = session
        .refresh()
        .await
        .cloned()
        .context("no reading was produced")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&gauge)?);
    } else {
        match &gauge {
            GaugeState::Ready(reading) => {
                print_estimate("Match", &reading.primary);
                if let Some(benchmark) = &reading.benchmark {
                    print_estimate("Nationwide", benchmark);
                }
            }
            GaugeState::Failed { message } => println!("Error: {}", message),
        }
    }

    session.shutdown().await?;
    Ok(())
}

fn print_estimate(label: &str, estimate: &Estimate) {
    println!("{:<11} {}", format!("{}:", label), estimate);
    let mut tier = format!("{:?}", estimate.scarcity());
    if estimate.is_unicorn() {
        tier.push_str(" (unicorn territory)");
    }
    println!("{:<11} {}", "Rarity:", tier);
}

/// Handle the 'metros' subcommand
async fn handle_metros(settings: Settings, state: &str) -> anyhow::Result<()> {
    let mut session = Session::start(settings).await;
    session.edit(FilterEdit::SetState(StateSelection::parse(state)?))?;

    for option in session.metro_options() {
        match option.total_population {
            Some(pop) => println!("{:>6}  {}  ({})", option.id.0, option.label, format_population(pop.round() as u64)),
            None => println!("{:>6}  {}", option.id.0, option.label),
        }
    }

    session.shutdown().await?;
    Ok(())
}

/// Handle the 'inspect' subcommand
async fn handle_inspect(settings: Settings) -> anyhow::Result<()> {
    let session = Session::start(settings).await;
    match session.inspect().await? {
        Some(inspection) => println!("{}", serde_json::to_string_pretty(&inspection)?),
        None => println!("No live data source; estimates are simulated."),
    }
    session.shutdown().await?;
    Ok(())
}

/// Handle the 'narrate' subcommand
async fn handle_narrate(settings: &Settings, filters: &FilterState, prompt_only: bool) -> anyhow::Result<()> {
    if prompt_only {
        println!("{}", build_prompt(filters));
        return Ok(());
    }

    let narrator = match HttpNarrator::from_settings(&settings.narrative) {
        Ok(narrator) => Some(narrator),
        Err(NarrativeError::MissingApiKey(var)) => {
            warn!("{} is not set", var);
            None
        }
        Err(e) => return Err(e.into()),
    };
    let source = narrator.as_ref().map(|n| n as &dyn NarrativeSource);
    println!("{}", narrate(source, filters).await);
    Ok(())
}
