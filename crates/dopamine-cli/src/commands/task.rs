use chrono::Local;
use clap::Subcommand;
use dopamine_core::TaskService;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a pending task
    Create {
        user_id: u64,
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List tasks, optionally for one user
    List {
        #[arg(long)]
        user: Option<u64>,
    },
    /// Show one task
    Show { id: u64 },
    /// Mark a task completed
    Complete { id: u64 },
    /// Delete a task
    Delete { id: u64 },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = TaskService::new(super::open_stores()?);

    match action {
        TaskAction::Create {
            user_id,
            title,
            description,
        } => {
            let task = service.create(user_id, &title, description)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { user } => {
            let tasks = service.list(user)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Show { id } => {
            let task = service.get(id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Complete { id } => {
            let task = service.complete(id, Local::now())?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            service.delete(id)?;
            println!("Deleted task {id}");
        }
    }
    Ok(())
}
