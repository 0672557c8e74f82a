use clap::Subcommand;
use dopamine_core::{Achievement, AchievementService};

#[derive(Subcommand)]
pub enum AchievementAction {
    /// Create a streak achievement (complete at the target streak)
    CreateStreak {
        user_id: u64,
        title: String,
        description: String,
        #[arg(long)]
        required: u32,
    },
    /// Create a total-tasks achievement (complete at the target count)
    CreateTotalTasks {
        user_id: u64,
        title: String,
        description: String,
        #[arg(long)]
        required: u64,
    },
    /// List achievements, optionally for one user
    List {
        #[arg(long)]
        user: Option<u64>,
    },
    /// Show one achievement
    Show { id: u64 },
}

pub fn run(action: AchievementAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = AchievementService::new(super::open_stores()?);

    match action {
        AchievementAction::CreateStreak {
            user_id,
            title,
            description,
            required,
        } => {
            let achievement =
                service.create(Achievement::streak(user_id, title, description, required))?;
            println!("{}", serde_json::to_string_pretty(&achievement)?);
        }
        AchievementAction::CreateTotalTasks {
            user_id,
            title,
            description,
            required,
        } => {
            let achievement =
                service.create(Achievement::total_tasks(user_id, title, description, required))?;
            println!("{}", serde_json::to_string_pretty(&achievement)?);
        }
        AchievementAction::List { user } => {
            let achievements = service.list(user)?;
            println!("{}", serde_json::to_string_pretty(&achievements)?);
        }
        AchievementAction::Show { id } => {
            let achievement = service.get(id)?;
            println!("{}", serde_json::to_string_pretty(&achievement)?);
        }
    }
    Ok(())
}
