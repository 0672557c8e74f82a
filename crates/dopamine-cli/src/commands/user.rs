use chrono::Local;
use clap::Subcommand;
use dopamine_core::UserService;

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user
    Create {
        username: String,
        #[arg(long)]
        profile_pic: Option<String>,
    },
    /// List all users
    List,
    /// Show one user
    Show { id: u64 },
    /// Record a streak visit and print updated counters
    Visit { id: u64 },
    /// Record a plain login (no visit counting)
    Login { id: u64 },
    /// Delete a user
    Delete { id: u64 },
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = UserService::new(super::open_stores()?);

    match action {
        UserAction::Create {
            username,
            profile_pic,
        } => {
            let user = service.create(&username, profile_pic)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserAction::List => {
            let users = service.list()?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        UserAction::Show { id } => {
            let user = service.get(id)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserAction::Visit { id } => {
            let stats = service.record_streak_visit(id, Local::now())?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        UserAction::Login { id } => {
            let user = service.record_login(id, Local::now())?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserAction::Delete { id } => {
            service.delete(id)?;
            println!("Deleted user {id}");
        }
    }
    Ok(())
}
