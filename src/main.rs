use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;

use transition_engine::calculators::atar::{
    convert_to_rank, scale_and_aggregate, ConversionTable, ScalingTable, SubjectScore,
};
use transition_engine::calculators::rent_assistance::{
    HouseholdType, RentAssistanceEngine, RentAssistanceInput, RentPaymentKind,
};
use transition_engine::calculators::student_payment::{ApplicantProfile, LivingSituation};
use transition_engine::calculators::{AssessmentError, AssessmentService, HousingCosts};
use transition_engine::config::AppConfig;
use transition_engine::error::AppError;
use transition_engine::policy::{PaymentPolicy, PolicyYear, RentAssistancePolicy};
use transition_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "transition-engine",
    about = "Run the student transition portal's payment, rent-assistance, and score calculators",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess a payment (and optionally rent assistance) from a profile file
    Assess(AssessArgs),
    /// Calculate rent assistance alone from an input file
    Rent(RentArgs),
    /// Scale subject scores and convert the aggregate to a final rank
    Atar(AtarArgs),
    /// Run a built-in end-to-end sample (default command)
    Demo,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Applicant profile JSON
    #[arg(long)]
    profile: PathBuf,
    /// Optional housing costs JSON to chain a rent-assistance estimate
    #[arg(long)]
    housing: Option<PathBuf>,
    /// Override the configured policy year
    #[arg(long)]
    policy_year: Option<u16>,
    /// Payment policy table JSON, replacing the built-in table
    #[arg(long)]
    payment_policy: Option<PathBuf>,
    /// Rent-assistance policy table JSON, replacing the built-in table
    #[arg(long)]
    rent_policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RentArgs {
    /// Rent-assistance input JSON
    #[arg(long)]
    input: PathBuf,
    /// Override the configured policy year
    #[arg(long)]
    policy_year: Option<u16>,
    /// Rent-assistance policy table JSON, replacing the built-in table
    #[arg(long)]
    rent_policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AtarArgs {
    /// Subject scores JSON (array of {code, name, units, raw_mark})
    #[arg(long)]
    scores: PathBuf,
    /// Per-subject scaling table JSON
    #[arg(long)]
    scaling: PathBuf,
    /// Aggregate-to-rank conversion table JSON
    #[arg(long)]
    conversion: PathBuf,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Demo) {
        Command::Assess(args) => run_assess(&config, args),
        Command::Rent(args) => run_rent(&config, args),
        Command::Atar(args) => run_atar(args),
        Command::Demo => run_demo(&config),
    }
}

fn run_assess(config: &AppConfig, args: AssessArgs) -> Result<(), AppError> {
    let year = args.policy_year.map(PolicyYear).unwrap_or(config.policy_year);
    let payment_policy = match args.payment_policy {
        Some(path) => read_json::<PaymentPolicy>(&path)?,
        None => PaymentPolicy::for_year(year).ok_or(AppError::UnsupportedPolicyYear(year))?,
    };
    let rent_policy = match args.rent_policy {
        Some(path) => read_json::<RentAssistancePolicy>(&path)?,
        None => {
            RentAssistancePolicy::for_year(year).ok_or(AppError::UnsupportedPolicyYear(year))?
        }
    };

    let service = AssessmentService::new(payment_policy, rent_policy)?;
    let profile: ApplicantProfile = read_json(&args.profile)?;
    let housing: Option<HousingCosts> = match args.housing {
        Some(path) => Some(read_json(&path)?),
        None => None,
    };

    info!(year = %year, "assessing profile");
    let assessment = service.assess(&profile, housing.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

fn run_rent(config: &AppConfig, args: RentArgs) -> Result<(), AppError> {
    let year = args.policy_year.map(PolicyYear).unwrap_or(config.policy_year);
    let policy = match args.rent_policy {
        Some(path) => read_json::<RentAssistancePolicy>(&path)?,
        None => {
            RentAssistancePolicy::for_year(year).ok_or(AppError::UnsupportedPolicyYear(year))?
        }
    };

    let engine = RentAssistanceEngine::new(policy)?;
    let input: RentAssistanceInput = read_json(&args.input)?;

    info!(year = %year, "calculating rent assistance");
    let result = engine.calculate(&input).map_err(AssessmentError::from)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_atar(args: AtarArgs) -> Result<(), AppError> {
    let scores: Vec<SubjectScore> = read_json(&args.scores)?;
    let scaling: ScalingTable = read_json(&args.scaling)?;
    let conversion: ConversionTable = read_json(&args.conversion)?;

    info!(subjects = scores.len(), "scaling subject scores");
    let outcome = scale_and_aggregate(&scores, &scaling)?;
    let rank = convert_to_rank(outcome.aggregate, &conversion);

    let payload = serde_json::json!({
        "aggregate": outcome.aggregate,
        "rank": rank,
        "subjects": outcome.subjects,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run_demo(config: &AppConfig) -> Result<(), AppError> {
    let year = config.policy_year;
    let payment_policy =
        PaymentPolicy::for_year(year).ok_or(AppError::UnsupportedPolicyYear(year))?;
    let rent_policy =
        RentAssistancePolicy::for_year(year).ok_or(AppError::UnsupportedPolicyYear(year))?;
    let service = AssessmentService::new(payment_policy, rent_policy)?;

    info!(?config.environment, year = %year, "transition engine demo");

    let profile = ApplicantProfile {
        age: 19,
        full_time_study: true,
        concessional_study_load: false,
        declared_independent: false,
        independence_ground: None,
        parental_income: Some(68_000.0),
        siblings_on_payment: 1,
        personal_income: Some(420.0),
        income_bank_credit: None,
        personal_assets: None,
        homeowner: false,
        living_situation: LivingSituation::Renting,
        has_dependent_children: false,
        partnered: false,
    };
    let housing = HousingCosts {
        fortnightly_rent: 460.0,
        payment_kind: RentPaymentKind::Rent,
        household: HouseholdType::SingleSharer,
    };

    let assessment = service.assess(&profile, Some(&housing))?;

    println!("Student payment estimate ({year} tables)");
    for step in &assessment.payment.breakdown {
        println!("- {step}");
    }

    if let Some(rent) = &assessment.rent_assistance {
        println!("\nRent assistance");
        println!(
            "- eligible rent ${:.2} against a ${:.2} threshold",
            rent.eligible_rent, rent.threshold
        );
        println!(
            "- payable ${:.2} per fortnight (cap ${:.2})",
            rent.fortnightly_amount, rent.max_rate
        );
        for warning in &rent.warnings {
            println!("- note: {warning}");
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
