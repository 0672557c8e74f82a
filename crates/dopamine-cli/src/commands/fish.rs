use chrono::Local;
use clap::Subcommand;
use dopamine_core::FishService;

#[derive(Subcommand)]
pub enum FishAction {
    /// Create a fish for a user
    Create {
        user_id: u64,
        name: String,
        category: String,
    },
    /// List a user's fish
    List { user_id: u64 },
    /// Show one fish
    Show { id: u64 },
    /// Feed one fish
    Feed { id: u64 },
    /// Feed every living fish a user owns
    FeedAll { user_id: u64 },
    /// Run the daily vitality sweep for a user's fish
    DailyCheck { user_id: u64 },
    /// Credit completed tasks to a fish
    CompleteTask {
        id: u64,
        #[arg(long, default_value_t = 1)]
        num: u64,
    },
    /// Credit a completed achievement to a fish
    CompleteAchievement { id: u64 },
}

pub fn run(action: FishAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = FishService::new(super::open_stores()?);

    match action {
        FishAction::Create {
            user_id,
            name,
            category,
        } => {
            let fish = service.create(user_id, &name, &category)?;
            println!("{}", serde_json::to_string_pretty(&fish)?);
        }
        FishAction::List { user_id } => {
            let fishes = service.list(user_id)?;
            println!("{}", serde_json::to_string_pretty(&fishes)?);
        }
        FishAction::Show { id } => {
            let fish = service.get(id)?;
            println!("{}", serde_json::to_string_pretty(&fish)?);
        }
        FishAction::Feed { id } => {
            let (fish, outcome) = service.feed(id, Local::now())?;
            println!("{}", outcome.message());
            println!("{}", serde_json::to_string_pretty(&fish)?);
        }
        FishAction::FeedAll { user_id } => {
            let summary = service.feed_all(user_id, Local::now())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        FishAction::DailyCheck { user_id } => {
            let summary = service.daily_check(user_id, Local::now())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        FishAction::CompleteTask { id, num } => {
            let fish = service.complete_tasks(id, num)?;
            println!("{}", serde_json::to_string_pretty(&fish)?);
        }
        FishAction::CompleteAchievement { id } => {
            let fish = service.complete_achievement(id)?;
            println!("{}", serde_json::to_string_pretty(&fish)?);
        }
    }
    Ok(())
}
