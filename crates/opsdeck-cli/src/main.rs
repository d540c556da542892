use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use opsdeck_core::auth::{guard_route, Guard, SharedAuthStore};
use opsdeck_core::db::{FinanceDb, ProjectDb, TaskDb, UserDb};
use opsdeck_core::models::{
    NewProject, NewTask, NewTransaction, ProjectPatch, TaskPatch, TransactionPatch,
};
use opsdeck_core::remote::HttpDocumentStore;
use opsdeck_core::store::Shared;
use opsdeck_core::CoreConfig;

#[derive(Parser)]
#[command(name = "opsdeck")]
#[command(about = "CLI for the opsdeck project-management backend")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON config file (endpoint, database and collection ids)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks
    ListTasks,

    /// List the tasks belonging to one project
    ListProjectTasks {
        project_id: String,
    },

    /// Create a task
    AddTask {
        title: String,
        /// Owning project id
        project: String,
        #[arg(long)]
        due_date: Option<String>,
        /// low | medium | high
        #[arg(long)]
        priority: Option<String>,
        /// todo | in_progress | completed
        #[arg(long)]
        status: Option<String>,
        /// Assignee user id (repeatable)
        #[arg(long = "assignee")]
        assignees: Vec<String>,
        #[arg(long)]
        parent: Option<String>,
    },

    /// Update a task's mutable fields
    UpdateTask {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Flip a task's completion flag
    ToggleTask {
        task_id: String,
    },

    DeleteTask {
        task_id: String,
    },

    /// List all projects with task statistics
    ListProjects,

    /// Show one project with its tasks and statistics
    ShowProject {
        project_id: String,
    },

    AddProject {
        title: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        status: Option<String>,
    },

    UpdateProject {
        project_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        status: Option<String>,
    },

    DeleteProject {
        project_id: String,
    },

    /// List the finance ledger
    ListTransactions,

    AddTransaction {
        title: String,
        amount: f64,
        /// Owning project id
        project: String,
        #[arg(long)]
        description: Option<String>,
        /// internal | external
        #[arg(long)]
        kind: Option<String>,
        /// debit | credit
        #[arg(long)]
        direction: Option<String>,
        /// Associated user id (repeatable)
        #[arg(long = "user")]
        users: Vec<String>,
    },

    UpdateTransaction {
        transaction_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        direction: Option<String>,
    },

    DeleteTransaction {
        transaction_id: String,
    },

    /// List members, optionally filtered by name substring
    ListUsers {
        #[arg(long)]
        search: Option<String>,
    },

    /// Look up a member by auth correlation id
    FindUser {
        correlation_id: String,
    },

    /// Check the current auth session
    Session,
}

#[tokio::main]
async fn main() {
    opsdeck_core::tracing_setup::init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let client = Arc::new(HttpDocumentStore::new(&config));
    let pretty = cli.pretty;

    let task_store = Shared::default();
    let tasks = TaskDb::new(
        Arc::clone(&client),
        config.collections.tasks.clone(),
        task_store.clone(),
    );
    let projects = ProjectDb::new(
        Arc::clone(&client),
        config.collections.projects.clone(),
        config.collections.tasks.clone(),
        Shared::default(),
        task_store.clone(),
    );
    let finance = FinanceDb::new(
        Arc::clone(&client),
        config.collections.finances.clone(),
        Shared::default(),
    );
    let users = UserDb::new(
        Arc::clone(&client),
        config.collections.users.clone(),
        Shared::default(),
    );

    match cli.command {
        Commands::ListTasks => print_json(&tasks.list().await?, pretty)?,
        Commands::ListProjectTasks { project_id } => {
            print_json(&tasks.list_for_project(&project_id).await?, pretty)?
        }
        Commands::AddTask {
            title,
            project,
            due_date,
            priority,
            status,
            assignees,
            parent,
        } => {
            let mut new_task = NewTask::new(title, project);
            if let Some(due_date) = due_date {
                new_task.due_date = due_date;
            }
            if let Some(priority) = priority {
                new_task.priority = priority.parse()?;
            }
            if let Some(status) = status {
                new_task.status = status.parse()?;
            }
            new_task.assigned_to = assignees;
            new_task.parent_task_id = parent;
            print_json(&tasks.create(new_task).await?, pretty)?;
        }
        Commands::UpdateTask {
            task_id,
            title,
            status,
            priority,
            completed,
        } => {
            let patch = TaskPatch {
                title,
                status: status.map(|raw| raw.parse()).transpose()?,
                priority: priority.map(|raw| raw.parse()).transpose()?,
                completed,
                ..TaskPatch::default()
            };
            print_json(&tasks.update(&task_id, patch).await?, pretty)?;
        }
        Commands::ToggleTask { task_id } => {
            let task = tasks.get(&task_id).await?;
            print_json(&tasks.toggle_completion(&task).await?, pretty)?;
        }
        Commands::DeleteTask { task_id } => {
            tasks.delete(&task_id).await?;
            print_json(&serde_json::json!({ "deleted": task_id }), pretty)?;
        }

        Commands::ListProjects => print_json(&projects.list().await?, pretty)?,
        Commands::ShowProject { project_id } => {
            let project = projects.get(&project_id).await?;
            let project_tasks = task_store.read(|store| store.tasks.clone());
            print_json(
                &serde_json::json!({ "project": project, "tasks": project_tasks }),
                pretty,
            )?;
        }
        Commands::AddProject {
            title,
            category,
            description,
            due_date,
            start_date,
            budget,
            status,
        } => {
            let mut new_project = NewProject::new(title);
            new_project.category = category.unwrap_or_default();
            new_project.description = description.unwrap_or_default();
            new_project.due_date = due_date.unwrap_or_default();
            new_project.start_date = start_date.unwrap_or_default();
            new_project.budget = budget.unwrap_or(0.0);
            new_project.status = status.unwrap_or_default();
            print_json(&projects.create(new_project).await?, pretty)?;
        }
        Commands::UpdateProject {
            project_id,
            title,
            category,
            description,
            due_date,
            start_date,
            budget,
            status,
        } => {
            let patch = ProjectPatch {
                title,
                category,
                description,
                due_date,
                start_date,
                budget,
                status,
            };
            print_json(&projects.update(&project_id, patch).await?, pretty)?;
        }
        Commands::DeleteProject { project_id } => {
            projects.delete(&project_id).await?;
            print_json(&serde_json::json!({ "deleted": project_id }), pretty)?;
        }

        Commands::ListTransactions => print_json(&finance.list().await?, pretty)?,
        Commands::AddTransaction {
            title,
            amount,
            project,
            description,
            kind,
            direction,
            users: transaction_users,
        } => {
            let mut new_transaction = NewTransaction::new(title, amount, project);
            new_transaction.description = description.unwrap_or_default();
            if let Some(kind) = kind {
                new_transaction.kind = kind.parse()?;
            }
            if let Some(direction) = direction {
                new_transaction.debit_credit = direction.parse()?;
            }
            new_transaction.users = transaction_users;
            print_json(&finance.create(new_transaction).await?, pretty)?;
        }
        Commands::UpdateTransaction {
            transaction_id,
            title,
            amount,
            description,
            kind,
            direction,
        } => {
            let patch = TransactionPatch {
                title,
                amount,
                description,
                kind: kind.map(|raw| raw.parse()).transpose()?,
                debit_credit: direction.map(|raw| raw.parse()).transpose()?,
                ..TransactionPatch::default()
            };
            print_json(&finance.update(&transaction_id, patch).await?, pretty)?;
        }
        Commands::DeleteTransaction { transaction_id } => {
            finance.delete(&transaction_id).await?;
            print_json(&serde_json::json!({ "deleted": transaction_id }), pretty)?;
        }

        Commands::ListUsers { search } => {
            users.list().await?;
            if let Some(term) = search {
                users.store().update(|store| store.filter_users(&term));
            }
            let listed = users.store().read(|store| store.filtered_users.clone());
            print_json(&listed, pretty)?;
        }
        Commands::FindUser { correlation_id } => {
            match users.get_by_correlation_id(&correlation_id).await? {
                Some(user) => print_json(&user, pretty)?,
                None => {
                    eprintln!("No user with correlation id {correlation_id}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Session => {
            let auth = SharedAuthStore::default();
            match guard_route(client.as_ref(), &auth, "/").await {
                Guard::Proceed => print_json(
                    &serde_json::json!({
                        "authenticated": true,
                        "session_id": auth.read(|store| store.session_id.clone()),
                        "user_id": auth.read(|store| store.user_id.clone()),
                    }),
                    pretty,
                )?,
                Guard::RedirectToLogin => {
                    print_json(&serde_json::json!({ "authenticated": false }), pretty)?;
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Config priority: --config file > environment > default location.
fn load_config(cli: &Cli) -> Result<CoreConfig> {
    if let Some(path) = &cli.config {
        return CoreConfig::load(path);
    }
    if let Ok(config) = CoreConfig::from_env() {
        return Ok(config);
    }
    if let Some(path) = CoreConfig::default_path() {
        if path.exists() {
            return CoreConfig::load(&path);
        }
    }
    anyhow::bail!("no configuration found; set OPSDECK_* variables or pass --config")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
