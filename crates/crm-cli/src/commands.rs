//! Subcommands

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use crm_advisor::{Advisor, BusinessContext};
use crm_auth::{CurrentActor, RouteGuard, SessionState};
use crm_core::config::{AppConfig, RouteGuardMode};
use crm_core::types::{format_amount, today, Amount};
use crm_models::ModulePatch;
use crm_services::candidates::{ApproveCandidateService, RejectCandidateService};
use crm_services::catalog::CatalogService;
use crm_services::dashboard::DashboardMetrics;
use crm_services::follow_ups::{is_follow_up_approaching, is_follow_up_due, is_overdue, leads_owned_by};
use crm_services::notifications::NotificationService;
use crm_services::session::{landing_route, login};
use crm_services::{ServiceContext, ServiceResult};
use crm_store::AppStore;

#[derive(Debug, Parser)]
#[command(name = "crm", version, about = "Agency CRM dashboard core")]
pub struct Cli {
    /// Phone number to sign in with
    #[arg(long, global = true, env = "CRM_PHONE", default_value = "")]
    phone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sidebar entries for the signed-in user, and where a path lands
    Nav {
        /// Location to resolve against the route guard
        #[arg(long)]
        path: Option<String>,

        /// Use the per-route checks of the legacy dashboard
        #[arg(long)]
        legacy: bool,
    },

    /// Follow-ups due, overdue or approaching for the signed-in user
    FollowUps {
        /// Also push reminder notifications for them
        #[arg(long)]
        notify: bool,

        /// List every lead rather than only the user's own
        #[arg(long)]
        all: bool,
    },

    /// Review pending applicants
    Candidates {
        #[command(subcommand)]
        action: CandidateAction,
    },

    /// Quotation-module catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Ask the strategy advisor a question about the business
    Ask { question: String },

    /// Generate marketing creatives for a brief
    Creatives {
        brief: String,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Dashboard figures as JSON
    Dashboard,
}

#[derive(Debug, Subcommand)]
enum CandidateAction {
    List,
    Approve { id: String },
    Reject { id: String },
}

#[derive(Debug, Subcommand)]
enum CatalogAction {
    List,
    Add(ModuleArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: ModuleFields,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
struct ModuleArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    price: Amount,
}

#[derive(Debug, Args)]
struct ModuleFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<Amount>,
}

impl From<ModuleFields> for ModulePatch {
    fn from(fields: ModuleFields) -> Self {
        ModulePatch {
            name: fields.name,
            description: fields.description,
            price: fields.price,
        }
    }
}

pub async fn run(cli: Cli, mut store: AppStore, config: &AppConfig) -> Result<()> {
    let actor = sign_in(&store, &cli.phone)?;
    let currency = config.instance.currency.as_str();

    match cli.command {
        Command::Nav { path, legacy } => {
            let mode = if legacy { RouteGuardMode::Legacy } else { config.policy.route_guard };
            nav(&store, &cli.phone, &actor, RouteGuard::new(mode), path.as_deref());
        }
        Command::FollowUps { notify, all } => {
            follow_ups(&mut store, &actor, config.policy.follow_up_horizon_days, notify, all)?;
        }
        Command::Candidates { action } => candidates(&mut store, &actor, action)?,
        Command::Catalog { action } => catalog(&mut store, &actor, action, currency)?,
        Command::Ask { question } => {
            let advisor = Advisor::from_config(&config.advisor);
            let metrics = metrics(&store, &actor);
            let context = BusinessContext::for_actor(
                &config.instance.app_title,
                currency,
                &actor,
                store.snapshot(),
                &metrics,
            );
            println!("{}", advisor.ask(&context, &question).await);
        }
        Command::Creatives { brief, out_dir } => {
            let advisor = Advisor::from_config(&config.advisor);
            let creatives = advisor.creatives(&brief).await;
            if creatives.is_empty() {
                println!("No creatives generated.");
            }
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            for (index, creative) in creatives.iter().enumerate() {
                let extension = image_extension(&creative.mime_type);
                let file = out_dir.join(format!("creative-{}.{extension}", index + 1));
                std::fs::write(&file, &creative.bytes).with_context(|| format!("writing {}", file.display()))?;
                println!("{}", file.display());
            }
        }
        Command::Dashboard => {
            println!("{}", serde_json::to_string_pretty(&metrics(&store, &actor))?);
        }
    }
    Ok(())
}

fn sign_in(store: &AppStore, phone: &str) -> Result<CurrentActor> {
    match login(store, phone) {
        SessionState::Authenticated(actor) => Ok(actor),
        SessionState::PendingApproval { name, .. } => {
            bail!("{name}, your application is awaiting administrator approval")
        }
        SessionState::Anonymous => bail!("no user or applicant with phone {:?}", phone.trim()),
    }
}

/// Value of a successful call, or its error messages
fn finish<T>(mut result: ServiceResult<T>) -> Result<T> {
    if result.is_failure() {
        bail!(result.full_messages().join("; "));
    }
    result.take_result().ok_or_else(|| anyhow!("service returned no result"))
}

/// File extension for an image MIME type
fn image_extension(mime_type: &str) -> &'static str {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/avif" => "avif",
        "image/heic" => "heic",
        _ => "bin",
    }
}

fn metrics(store: &AppStore, actor: &CurrentActor) -> DashboardMetrics {
    DashboardMetrics::compute(store.snapshot(), actor, today(), store.commission_rate())
}

fn nav(store: &AppStore, phone: &str, actor: &CurrentActor, guard: RouteGuard, path: Option<&str>) {
    println!("{} ({})", actor.name, actor.role);
    for entry in actor.navigation() {
        println!("  {:<16} {}", entry.label, entry.path);
    }
    if let Some(path) = path {
        let session = login(store, phone);
        if let Some(route) = landing_route(&session, &guard, path) {
            println!("{path} -> {}", route.path());
        }
    }
}

fn follow_ups(store: &mut AppStore, actor: &CurrentActor, horizon_days: i64, notify: bool, all: bool) -> Result<()> {
    let today = today();
    let snapshot = store.snapshot().clone();
    let leads: Vec<_> = if all {
        snapshot.leads().iter().collect()
    } else {
        leads_owned_by(snapshot.leads(), actor).collect()
    };

    for lead in leads {
        let state = if is_overdue(lead, today) && !lead.is_closed() {
            "overdue"
        } else if is_follow_up_due(lead, today) {
            "due"
        } else if is_follow_up_approaching(lead, today, horizon_days) {
            "approaching"
        } else {
            continue;
        };
        if let Some(date) = lead.next_follow_up {
            println!("{state:<12} {date}  {} ({})", lead.name, lead.company);
        }
    }

    if notify {
        let added = finish(NotificationService::new(ServiceContext::on(actor, today)).sync_follow_ups(store, horizon_days))?;
        println!("{added} reminder(s) added");
    }
    Ok(())
}

fn candidates(store: &mut AppStore, actor: &CurrentActor, action: CandidateAction) -> Result<()> {
    let ctx = ServiceContext::new(actor);
    match action {
        CandidateAction::List => {
            for candidate in store.snapshot().candidates() {
                println!("{:<20} {:<24} {}", candidate.id, candidate.name, candidate.phone);
            }
        }
        CandidateAction::Approve { id } => match finish(ApproveCandidateService::new(ctx).call(store, &id))? {
            Some(user) => println!("{} joined as {} ({})", user.name, user.role, user.id),
            None => println!("No pending candidate {id}"),
        },
        CandidateAction::Reject { id } => match finish(RejectCandidateService::new(ctx).call(store, &id))? {
            Some(candidate) => println!("Rejected {}", candidate.name),
            None => println!("No pending candidate {id}"),
        },
    }
    Ok(())
}

fn catalog(store: &mut AppStore, actor: &CurrentActor, action: CatalogAction, currency: &str) -> Result<()> {
    let service = CatalogService::new(ServiceContext::new(actor));
    match action {
        CatalogAction::List => {
            for module in store.snapshot().modules() {
                println!(
                    "{:<14} {:<26} {:>12}",
                    module.id,
                    module.name,
                    format_amount(module.price, currency)
                );
            }
        }
        CatalogAction::Add(args) => {
            let module = finish(service.add_module(store, &args.name, &args.description, args.price))?;
            println!("Added {} ({})", module.name, module.id);
        }
        CatalogAction::Update { id, fields } => {
            match finish(service.update_module(store, &id, &fields.into()))? {
                Some(module) => println!("Updated {} to {}", module.id, format_amount(module.price, currency)),
                None => println!("No module {id}"),
            }
        }
        CatalogAction::Delete { id } => {
            if finish(service.delete_module(store, &id))? {
                println!("Deleted {id}");
            } else {
                println!("No module {id}");
            }
        }
    }
    Ok(())
}
