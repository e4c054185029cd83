use clap::Args;
use devroster::config::{level_variable, AppConfig};
use devroster::developers::{
    CreateDeveloperRequest, DeveloperLevel, DeveloperLifecycleService, DeveloperSkillType,
    DeveloperStore, EditDeveloperRequest, InMemoryDeveloperStore, LevelPolicy, MemberId,
    SqliteDeveloperStore,
};
use devroster::error::AppError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Member id of the scripted developer
    #[arg(long, default_value = "a")]
    pub(crate) member_id: String,
    /// Run against this SQLite file instead of an in-memory store
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LevelsArgs {
    /// Emit the table as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelRow {
    level: DeveloperLevel,
    description: &'static str,
    min_experience_years: u32,
    max_experience_years: u32,
}

fn level_rows(policy: &LevelPolicy) -> Vec<LevelRow> {
    policy
        .entries()
        .into_iter()
        .map(|(level, bounds)| LevelRow {
            level,
            description: level.description(),
            min_experience_years: bounds.min(),
            max_experience_years: bounds.max(),
        })
        .collect()
}

fn level_table_json(policy: &LevelPolicy) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&level_rows(policy))?)
}

fn override_variables(level: DeveloperLevel) -> String {
    match level {
        DeveloperLevel::New => "fixed".to_string(),
        _ => format!(
            "{} / {}",
            level_variable(level, "MIN"),
            level_variable(level, "MAX")
        ),
    }
}

pub(crate) fn print_level_policy(args: LevelsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    if args.json {
        println!("{}", level_table_json(&config.levels)?);
        return Ok(());
    }

    println!("{:<8} {:>5} {:>5}  {:<36} Override", "Level", "Min", "Max", "Description");
    for row in level_rows(&config.levels) {
        println!(
            "{:<8} {:>5} {:>5}  {:<36} {}",
            row.level.as_str(),
            row.min_experience_years,
            row.max_experience_years,
            row.description,
            override_variables(row.level),
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let member_id = MemberId::new(args.member_id);

    match args.database {
        Some(path) => {
            let store = SqliteDeveloperStore::open(&path)?;
            println!("Developer roster demo (sqlite: {})", path.display());
            walk_lifecycle(store, config.levels, &member_id);
        }
        None => {
            println!("Developer roster demo (in-memory store)");
            walk_lifecycle(InMemoryDeveloperStore::new(), config.levels, &member_id);
        }
    }
    Ok(())
}

fn walk_lifecycle<S>(store: S, levels: LevelPolicy, member_id: &MemberId)
where
    S: DeveloperStore + 'static,
{
    let service = DeveloperLifecycleService::new(Arc::new(store), levels);

    println!("\n1. Hire {member_id} as a JUNIOR front-end developer with 7 years");
    let request = CreateDeveloperRequest {
        developer_level: DeveloperLevel::Junior,
        developer_skill_type: DeveloperSkillType::FrontEnd,
        experience_years: 7,
        member_id: member_id.clone(),
        name: "jimmy".to_string(),
        age: 28,
    };
    match service.create_developer(request.clone()) {
        Ok(created) => print_payload("  Created", &created),
        Err(err) => println!("  Create rejected: {err}"),
    }

    println!("\n2. Submit the same member id again");
    match service.create_developer(request) {
        Ok(_) => println!("  Unexpectedly accepted a duplicate"),
        Err(err) => println!("  Rejected as expected: {err}"),
    }

    println!("\n3. Claim NEW level with 3 years of experience");
    let mismatched = EditDeveloperRequest {
        developer_level: DeveloperLevel::New,
        developer_skill_type: DeveloperSkillType::BackEnd,
        experience_years: 3,
    };
    match service.edit_developer(member_id, mismatched) {
        Ok(_) => println!("  Unexpectedly accepted"),
        Err(err) => println!("  Rejected as expected: {err}"),
    }

    println!("\n4. Move to FULL_STACK, promoted to SENIOR with 12 years");
    let promotion = EditDeveloperRequest {
        developer_level: DeveloperLevel::Senior,
        developer_skill_type: DeveloperSkillType::FullStack,
        experience_years: 12,
    };
    match service.edit_developer(member_id, promotion) {
        Ok(detail) => print_payload("  Detail", &detail),
        Err(err) => println!("  Edit rejected: {err}"),
    }

    println!("\n5. Retire {member_id}");
    match service.delete_developer(member_id) {
        Ok(detail) => print_payload("  Detail", &detail),
        Err(err) => println!("  Retirement failed: {err}"),
    }

    match service.get_all_developers() {
        Ok(employed) => println!("\nEmployed developers remaining: {}", employed.len()),
        Err(err) => println!("\nEmployed listing unavailable: {err}"),
    }
    match service.get_retired_developers() {
        Ok(retired) => print_payload("Retirement audit trail", &retired),
        Err(err) => println!("Retirement audit trail unavailable: {err}"),
    }
}

fn print_payload<T: Serialize>(label: &str, payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(json) => println!("{label}:\n{json}"),
        Err(err) => println!("{label} unavailable: {err}"),
    }
}
