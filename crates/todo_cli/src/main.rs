//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire config, logging, storage and the to-do service end to end.
//! - Print the demo owner's lists deterministically for local sanity checks.
//!
//! Usage: `todo_cli [--seed] [owner]` (owner defaults to `fred`). Storage and
//! logging follow the `TODOAPP_*` environment variables.
//!
//! The demo fixture replaces the owner's items, so it is installed only into
//! an in-memory database or when `--seed` is passed.

use log::{error, info};
use std::error::Error;
use std::process::ExitCode;
use todo_core::fixture::install_fixture;
use todo_core::{
    CollectingNotifier, CoreConfig, CurrentUser, SqliteToDoItemRepository, SystemClock, ToDoItem,
    ToDoItemService,
};

const DEFAULT_OWNER: &str = "fred";
const SEED_FLAG: &str = "--seed";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    owner: String,
    seed: bool,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut owner = None;
        let mut seed = false;
        for arg in args {
            if arg == SEED_FLAG {
                seed = true;
            } else if arg.starts_with("--") {
                return Err(format!("unknown flag `{arg}`"));
            } else if owner.is_none() {
                owner = Some(arg);
            } else {
                return Err(format!("unexpected argument `{arg}`"));
            }
        }
        Ok(Self {
            owner: owner.unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            seed,
        })
    }
}

fn should_seed(config: &CoreConfig, args: &CliArgs) -> bool {
    args.seed || config.db_path.is_none()
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env();
    config.init_logging()?;

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let owner = CurrentUser::new(args.owner.as_str())?;

    let conn = config.open_db()?;
    let repo = SqliteToDoItemRepository::try_new(&conn)?;
    if should_seed(&config, &args) {
        install_fixture(&repo, &owner, &SystemClock)?;
    } else {
        info!("event=fixture_install module=cli status=skipped reason=persistent_db");
    }

    let notices = CollectingNotifier::new();
    let service = ToDoItemService::new(repo, &notices);

    println!("todo_core version={}", todo_core::core_version());
    print_section("not yet complete", &service.not_yet_complete(&owner)?);
    print_section("complete", &service.complete(&owner)?);
    for notice in notices.take() {
        println!("notice: {}", notice.message);
    }
    Ok(())
}

fn print_section(title: &str, items: &[ToDoItem]) {
    println!("{title} ({}):", items.len());
    for item in items {
        let due = item
            .due_by
            .map_or_else(|| "-".to_string(), |date| date.to_string());
        let subcategory = item
            .subcategory
            .map_or_else(|| "-".to_string(), |value| value.to_string());
        println!(
            "  [{}] {} ({}/{}) due={due}",
            if item.complete { "x" } else { " " },
            item.description,
            item.category,
            subcategory
        );
    }
}
