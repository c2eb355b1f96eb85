//! Operator tooling: reference data and account administration, applied
//! directly against the database.

use std::error::Error;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use engine::{PolicyType, UserRole};
use migration::MigratorTrait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter,
};

#[derive(Parser, Debug)]
#[command(name = "kitobzor_admin")]
#[command(about = "Admin utilities for Kitobzor (reference data, accounts)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./kitobzor.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Region(Region),
    District(District),
    Category(Category),
    SubCategory(SubCategory),
    Banner(Banner),
    Faq(Faq),
    Policy(Policy),
    User(User),
}

#[derive(Args, Debug)]
struct Region {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct District {
    #[arg(long)]
    region_id: i64,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Category {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct SubCategory {
    #[arg(long)]
    category_id: i64,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Banner {
    #[arg(long)]
    picture: String,
    #[arg(long)]
    title: Option<String>,
    /// Banners are hidden until activated.
    #[arg(long)]
    activate: bool,
}

#[derive(Args, Debug)]
struct Faq {
    #[arg(long)]
    question: String,
    #[arg(long)]
    answer: String,
}

#[derive(Args, Debug)]
struct Policy {
    /// One of: public, bookshop, library.
    #[arg(long)]
    policy_type: String,
    #[arg(long)]
    content: String,
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    SetRole(SetRoleArgs),
    Deactivate(DeactivateArgs),
}

#[derive(Args, Debug)]
struct SetRoleArgs {
    #[arg(long)]
    telegram_id: String,
    /// One of: superadmin, admin, simple, premium, publisher, library,
    /// bookshop.
    #[arg(long)]
    role: String,
}

#[derive(Args, Debug)]
struct DeactivateArgs {
    #[arg(long)]
    telegram_id: String,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn find_user(
    db: &DatabaseConnection,
    telegram_id: &str,
) -> Result<engine::users::Model, Box<dyn Error + Send + Sync>> {
    let user = engine::users::Entity::find()
        .filter(engine::users::Column::TelegramId.eq(telegram_id))
        .one(db)
        .await?;
    match user {
        Some(user) => Ok(user),
        None => {
            eprintln!("user not found: {telegram_id}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::Region(args) => {
            let region = engine::regions::ActiveModel {
                name: Set(args.name.clone()),
                ..Default::default()
            };
            let region = engine::regions::Entity::insert(region)
                .exec(&db)
                .await?;
            println!("created region: {} ({})", args.name, region.last_insert_id);
        }
        Command::District(args) => {
            if engine::regions::Entity::find_by_id(args.region_id)
                .one(&db)
                .await?
                .is_none()
            {
                eprintln!("region not found: {}", args.region_id);
                std::process::exit(1);
            }
            let district = engine::districts::ActiveModel {
                name: Set(args.name.clone()),
                region_id: Set(args.region_id),
                ..Default::default()
            };
            let district = engine::districts::Entity::insert(district).exec(&db).await?;
            println!(
                "created district: {} ({})",
                args.name, district.last_insert_id
            );
        }
        Command::Category(args) => {
            let category = engine::categories::ActiveModel {
                name: Set(args.name.clone()),
                ..Default::default()
            };
            let category = engine::categories::Entity::insert(category).exec(&db).await?;
            println!(
                "created category: {} ({})",
                args.name, category.last_insert_id
            );
        }
        Command::SubCategory(args) => {
            if engine::categories::Entity::find_by_id(args.category_id)
                .one(&db)
                .await?
                .is_none()
            {
                eprintln!("category not found: {}", args.category_id);
                std::process::exit(1);
            }
            let sub_category = engine::sub_categories::ActiveModel {
                name: Set(args.name.clone()),
                category_id: Set(args.category_id),
                ..Default::default()
            };
            let sub_category = engine::sub_categories::Entity::insert(sub_category)
                .exec(&db)
                .await?;
            println!(
                "created sub-category: {} ({})",
                args.name, sub_category.last_insert_id
            );
        }
        Command::Banner(args) => {
            let banner = engine::banners::ActiveModel {
                picture: Set(args.picture),
                title: Set(args.title),
                is_active: Set(args.activate),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            let banner = engine::banners::Entity::insert(banner).exec(&db).await?;
            println!("created banner: {}", banner.last_insert_id);
        }
        Command::Faq(args) => {
            let faq = engine::faqs::ActiveModel {
                question: Set(args.question),
                answer: Set(args.answer),
                is_active: Set(true),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            let faq = engine::faqs::Entity::insert(faq).exec(&db).await?;
            println!("created faq: {}", faq.last_insert_id);
        }
        Command::Policy(args) => {
            let policy_type = match PolicyType::try_from(args.policy_type.as_str()) {
                Ok(policy_type) => policy_type,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };
            let policy = engine::privacy_policies::ActiveModel {
                policy_type: Set(policy_type.as_str().to_string()),
                content: Set(args.content),
                is_active: Set(true),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            let policy = engine::privacy_policies::Entity::insert(policy)
                .exec(&db)
                .await?;
            println!("created privacy policy: {}", policy.last_insert_id);
        }
        Command::User(User {
            command: UserCommand::SetRole(args),
        }) => {
            let role = match UserRole::try_from(args.role.as_str()) {
                Ok(role) => role,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };
            let user = find_user(&db, &args.telegram_id).await?;
            let mut active: engine::users::ActiveModel = user.into();
            active.role = Set(role.as_str().to_string());
            active.updated_at = Set(Utc::now());
            engine::users::Entity::update(active).exec(&db).await?;
            println!("updated role for {}: {}", args.telegram_id, role.as_str());
        }
        Command::User(User {
            command: UserCommand::Deactivate(args),
        }) => {
            let user = find_user(&db, &args.telegram_id).await?;
            let mut active: engine::users::ActiveModel = user.into();
            active.is_active = Set(false);
            active.updated_at = Set(Utc::now());
            engine::users::Entity::update(active).exec(&db).await?;
            println!("deactivated user: {}", args.telegram_id);
        }
    }

    Ok(())
}
