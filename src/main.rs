use chrono::Local;
use clap::{Args, Parser, Subcommand};
use relai_onboarding::config::AppConfig;
use relai_onboarding::error::AppError;
use relai_onboarding::onboarding::{
    display_field, render_timestamp, save_short_form_draft, submit_project, AdminConsole,
    AdminFilter, BasicsPatch, FormWizard, ReportFilter, SecondaryPatch, ShortFormRecord,
    SubmissionStats, SubmissionStatus, SubmissionStore,
};
use relai_onboarding::storage::FileStore;
use relai_onboarding::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Relai Onboarding Portal",
    about = "Drive the agent onboarding flows from the command line",
    version
)]
struct Cli {
    /// Override the configured storage file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed a sample agent session, submission, and draft for demos
    Demo,
    /// Print the logged-in agent's submissions and summary counts
    Report(ReportArgs),
    /// Admin console operations over the shared collection
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ReportArgs {
    /// Free-text filter over project and builder names
    #[arg(long, default_value = "")]
    query: String,
    /// Exact submission date filter (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    date: String,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List submissions across all agents
    List {
        /// Free-text filter over project, agent, and builder names
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Move a submission to a review state
    SetStatus {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: SubmissionStatus,
    },
}

fn parse_status(value: &str) -> Result<SubmissionStatus, String> {
    match value.to_ascii_lowercase().as_str() {
        "pending" => Ok(SubmissionStatus::Pending),
        "approved" => Ok(SubmissionStatus::Approved),
        "rejected" => Ok(SubmissionStatus::Rejected),
        other => Err(format!(
            "unknown status '{other}', expected pending, approved, or rejected"
        )),
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let path = cli.storage.unwrap_or(config.storage.path);
    let store = SubmissionStore::new(FileStore::new(&path));
    info!(path = %path.display(), "using file-backed storage");

    match cli.command {
        Command::Demo => run_demo(&store),
        Command::Report(args) => run_report(&store, args),
        Command::Admin { command } => run_admin(&store, command),
    }
}

fn run_demo(store: &SubmissionStore<FileStore>) -> Result<(), AppError> {
    let now = Local::now();
    let session = match store.load_session()? {
        Some(session) => session,
        None => relai_onboarding::onboarding::login(store, "John Smith", "john@example.com", now)?,
    };
    info!(agent = %session.name, "agent session ready");

    let mut wizard = FormWizard::new();
    wizard.update_basics(BasicsPatch {
        project_name: Some("Cloud 9 Residency".to_string()),
        builder_name: Some("Urban Rise Builders".to_string()),
        rera_number: Some("P024000001XX".to_string()),
        project_type: Some("gated".to_string()),
        number_of_floors: Some("30".to_string()),
        flats_per_floor: Some("10".to_string()),
        open_space: Some("70".to_string()),
        ..BasicsPatch::default()
    });
    wizard.update_secondary(SecondaryPatch {
        commission_type: Some("commission".to_string()),
        commission_percentage: Some("2.5".to_string()),
        confirmation_person_name: Some("Rajesh Kumar".to_string()),
        confirmation_person_contact: Some("+91 98765 43210".to_string()),
        ..SecondaryPatch::default()
    });
    wizard.set_unit_enabled("2BHK", true);
    wizard.set_unit_size("2BHK", 0, "1250");
    wizard.set_unit_parking("2BHK", 0, "1");

    let record = submit_project(store, &session, &wizard, now, None)?;
    info!(id = record.id, project = %record.project_name, "submission recorded");

    let draft = save_short_form_draft(
        store,
        &session,
        ShortFormRecord {
            project_name: "Green Valley Heights".to_string(),
            builder_name: "Metro Builders".to_string(),
            commission_type: "cutoff".to_string(),
            cutoff_their_price: "7000".to_string(),
            cutoff_relai_price: "6800".to_string(),
            ..ShortFormRecord::default()
        },
        now,
    )?;
    info!(id = draft.id, project = %draft.project_name, "short-form draft saved");

    println!("Seeded agent '{}' with one submission and one draft.", session.name);
    Ok(())
}

fn run_report(store: &SubmissionStore<FileStore>, args: ReportArgs) -> Result<(), AppError> {
    let Some(session) = store.load_session()? else {
        println!("No agent session found; run the demo command first.");
        return Ok(());
    };

    let mut records = store.submissions(&session.id)?;
    let stats = SubmissionStats::compute(&records, Local::now().date_naive());
    println!(
        "{} — total {}, submitted {}, drafts {}, this week {}",
        session.name, stats.total, stats.submitted, stats.drafts, stats.this_week
    );

    let filter = ReportFilter {
        query: args.query,
        date: args.date,
    };
    relai_onboarding::onboarding::sort_recent_first(&mut records);
    let offset_minutes = Local::now().offset().local_minus_utc() / 60;
    for record in records.iter().filter(|record| filter.matches(record)) {
        let details = record.canonical_details();
        println!(
            "  [{}] {} by {} — {} ({}) RERA {}",
            record.status.label(),
            record.project_name,
            record.builder_name,
            render_timestamp(&record.date, &record.time, offset_minutes),
            record.submission_type.label(),
            display_field(&details.rera_number),
        );
    }

    let drafts = store.drafts(&session.id)?;
    for draft in &drafts {
        println!("  [Draft] {} by {}", draft.project_name, draft.builder_name);
    }
    Ok(())
}

fn run_admin(store: &SubmissionStore<FileStore>, command: AdminCommand) -> Result<(), AppError> {
    let console = AdminConsole::new(store.clone());
    match command {
        AdminCommand::List { query } => {
            let stats = console.stats()?;
            println!(
                "total {}, pending {}, approved {}, rejected {}",
                stats.total, stats.pending, stats.approved, stats.rejected
            );
            let filter = AdminFilter {
                query,
                ..AdminFilter::default()
            };
            for record in console.submissions(&filter)? {
                println!(
                    "  #{} [{}] {} — {} ({}), submitted {}",
                    record.id,
                    record.status.label(),
                    record.project_name,
                    record.builder_name,
                    record.agent_name,
                    record.submitted_date,
                );
            }
        }
        AdminCommand::SetStatus { id, status } => {
            console.set_status(id, status)?;
            info!(id, status = status.label(), "submission status updated");
            println!("Submission {id} is now {}.", status.label());
        }
    }
    Ok(())
}
