mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fat_distribution_sim::config::ModelConfig;
use fat_distribution_sim::error::InputError;
use fat_distribution_sim::model::{region_ranges, DistributionModel, ImpactModel};
use fat_distribution_sim::sampling::random_reading;
use fat_distribution_sim::{estimate, validate_baseline, Gender, HormoneReading};

#[derive(Parser)]
#[command(name = "fat-sim", about = "Hormone to body fat distribution simulator")]
struct Cli {
    /// Model config file (defaults to $FAT_SIM_CONFIG_PATH or config/model.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Regional fat distribution for one archetype
    Distribution(DistributionArgs),
    /// Estimated monthly change in total body fat
    Impact(ImpactArgs),
    /// Distribution, gauges and impact for both archetypes
    Estimate(EstimateArgs),
    /// Reachable range of every region for one archetype
    Ranges(RangesArgs),
    /// Estimate for a random reading
    Random(RandomArgs),
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Clone, Default)]
struct HormoneArgs {
    #[arg(long)]
    insulin: Option<f64>,
    #[arg(long)]
    cortisol: Option<f64>,
    #[arg(long)]
    testosterone: Option<f64>,
    #[arg(long)]
    estrogen: Option<f64>,
}

impl HormoneArgs {
    fn to_reading(&self) -> Result<HormoneReading, InputError> {
        let reading = HormoneReading {
            insulin: self.insulin,
            cortisol: self.cortisol,
            testosterone: self.testosterone,
            estrogen: self.estrogen,
        };
        reading.validate()?;
        Ok(reading)
    }
}

#[derive(Args, Debug, Clone)]
struct DistributionArgs {
    #[command(flatten)]
    hormones: HormoneArgs,
    /// "female" selects the female archetype; anything else is male
    #[arg(long, default_value = "male")]
    gender: String,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ImpactArgs {
    #[command(flatten)]
    hormones: HormoneArgs,
    /// Starting body fat percentage (defaults to the config value)
    #[arg(long)]
    baseline: Option<f64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct EstimateArgs {
    #[command(flatten)]
    hormones: HormoneArgs,
    #[arg(long)]
    baseline: Option<f64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct RangesArgs {
    /// "female" selects the female archetype; anything else is male
    #[arg(long, default_value = "male")]
    gender: String,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct RandomArgs {
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    baseline: Option<f64>,
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective config
    Show,
    /// Write the default config file
    Init {
        #[arg(long, default_value = "config/model.toml")]
        path: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = ModelConfig::load(cli.config)?;
    debug!(path = ?config_path, policy = %config.distribution.policy, "loaded config");

    let command = cli
        .command
        .unwrap_or(Command::Estimate(EstimateArgs::default()));

    match command {
        Command::Distribution(args) => run_distribution(args, &config),
        Command::Impact(args) => run_impact(args, &config),
        Command::Estimate(args) => {
            let hormones = args.hormones.to_reading()?;
            run_estimate(hormones, args.baseline, args.json, &config)
        }
        Command::Ranges(args) => run_ranges(args, &config),
        Command::Random(args) => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let hormones = random_reading(&mut rng);
            run_estimate(hormones, args.baseline, args.json, &config)
        }
        Command::Config(ConfigCommand::Show) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Config(ConfigCommand::Init { path, force }) => init_config(&path, force),
    }
}

fn run_distribution(args: DistributionArgs, config: &ModelConfig) -> Result<()> {
    let hormones = args.hormones.to_reading()?;
    let model = DistributionModel::new(config.distribution.to_policy());
    let result = model.compute(&hormones, Gender::parse(&args.gender));

    if args.json {
        return report::print_json(&result);
    }
    report::print_distribution(&result);
    Ok(())
}

fn run_impact(args: ImpactArgs, config: &ModelConfig) -> Result<()> {
    let hormones = args.hormones.to_reading()?;
    let baseline = resolve_baseline(args.baseline, config)?;
    let result = ImpactModel::default().compute(&hormones, baseline);

    if args.json {
        return report::print_json(&result);
    }
    report::print_impact(&result, baseline);
    Ok(())
}

fn run_estimate(
    hormones: HormoneReading,
    baseline: Option<f64>,
    json: bool,
    config: &ModelConfig,
) -> Result<()> {
    let baseline = resolve_baseline(baseline, config)?;
    let estimates: Vec<_> = Gender::ALL
        .iter()
        .map(|gender| estimate(&hormones, *gender, baseline, config))
        .collect();

    if json {
        return report::print_json(&estimates);
    }
    report::print_estimates(&estimates, baseline);
    Ok(())
}

fn run_ranges(args: RangesArgs, config: &ModelConfig) -> Result<()> {
    let gender = Gender::parse(&args.gender);
    let model = DistributionModel::new(config.distribution.to_policy());
    let ranges = region_ranges(&model, gender);

    if args.json {
        return report::print_json(&ranges);
    }
    report::print_ranges(gender, &ranges);
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (pass --force to overwrite)",
            path.display()
        );
    }
    ModelConfig::default()
        .write(path)
        .with_context(|| format!("initializing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn resolve_baseline(arg: Option<f64>, config: &ModelConfig) -> Result<f64, InputError> {
    validate_baseline(arg.unwrap_or(config.impact.baseline_percent))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fat_distribution_sim=warn,fat_sim=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
