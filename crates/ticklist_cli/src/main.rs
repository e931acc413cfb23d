//! Command-line front end for the task list core.
//!
//! # Responsibility
//! - Map shell commands onto the core controller's entry points.
//! - Drive the confirm/deny protocol through stdin prompts.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use ticklist_core::{
    App, Category, CategoryFilter, ListView, SqliteStorage, SubmitOutcome, Task, TaskForm, TaskId,
};

const USAGE: &str = "usage: ticklist <command> [args]

commands:
  add <title> [--category work|personal|other] [--due YYYY-MM-DD]
  list [--category work|personal|other] [--search TEXT]
  edit <id-prefix> [--title TEXT] [--category ...] [--due YYYY-MM-DD|none]
  done <id-prefix>
  rm <id-prefix>
  clear

The database path is taken from $TICKLIST_DB (default ./ticklist.db).";

fn main() {
    if let Some(log_dir) = std::env::var_os("TICKLIST_LOG_DIR") {
        let log_dir = log_dir.to_string_lossy().to_string();
        if let Err(err) = ticklist_core::init_logging(ticklist_core::default_log_level(), &log_dir)
        {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(message) = run(&args) {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let Some(command) = args.first() else {
        return Err(USAGE.to_string());
    };

    let db_path =
        std::env::var("TICKLIST_DB").unwrap_or_else(|_| "ticklist.db".to_string());
    let storage =
        SqliteStorage::open(&db_path).map_err(|err| format!("cannot open `{db_path}`: {err}"))?;
    let mut app = App::new(storage);

    match command.as_str() {
        "add" => cmd_add(&mut app, &args[1..]),
        "list" => cmd_list(&mut app, &args[1..]),
        "edit" => cmd_edit(&mut app, &args[1..]),
        "done" => cmd_done(&mut app, &args[1..]),
        "rm" => cmd_rm(&mut app, &args[1..]),
        "clear" => cmd_clear(&mut app),
        "help" | "--help" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n{USAGE}")),
    }
}

fn cmd_add(app: &mut App<SqliteStorage>, args: &[String]) -> Result<(), String> {
    let (positional, options) = split_options(args)?;
    let title = positional
        .first()
        .ok_or_else(|| "add requires a title".to_string())?;
    let category = match options.iter().find(|(name, _)| name == "category") {
        Some((_, value)) => parse_category(value)?,
        None => Category::Other,
    };
    let due_date = match options.iter().find(|(name, _)| name == "due") {
        Some((_, value)) => Some(parse_date(value)?),
        None => None,
    };

    let outcome = app
        .submit(TaskForm {
            title: title.clone(),
            category,
            due_date,
        })
        .map_err(|err| err.to_string())?;
    if let SubmitOutcome::Created(id) = outcome {
        println!("added {}", short_id(id));
    }
    Ok(())
}

fn cmd_list(app: &mut App<SqliteStorage>, args: &[String]) -> Result<(), String> {
    let (_, options) = split_options(args)?;
    if let Some((_, value)) = options.iter().find(|(name, _)| name == "category") {
        app.set_filter(CategoryFilter::Only(parse_category(value)?));
    }
    if let Some((_, value)) = options.iter().find(|(name, _)| name == "search") {
        app.set_search(value.clone());
    }

    match app.view() {
        ListView::Empty => println!("No tasks yet."),
        ListView::Tasks(tasks) => {
            for task in tasks {
                print_task(task);
            }
        }
    }
    Ok(())
}

fn cmd_edit(app: &mut App<SqliteStorage>, args: &[String]) -> Result<(), String> {
    let (positional, options) = split_options(args)?;
    let id = resolve_id(app, positional.first().map(String::as_str))?;
    let Some(mut form) = app.request_edit(id) else {
        return Err(format!("no task matches {}", short_id(id)));
    };
    for (name, value) in &options {
        match name.as_str() {
            "title" => form.title = value.clone(),
            "category" => form.category = parse_category(value)?,
            "due" => {
                form.due_date = if value == "none" {
                    None
                } else {
                    Some(parse_date(value)?)
                };
            }
            other => return Err(format!("unknown option --{other}")),
        }
    }

    match app.submit(form) {
        Ok(SubmitOutcome::Updated(id)) => {
            println!("updated {}", short_id(id));
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(err) => {
            app.cancel_edit();
            Err(err.to_string())
        }
    }
}

fn cmd_done(app: &mut App<SqliteStorage>, args: &[String]) -> Result<(), String> {
    let id = resolve_id(app, args.first().map(String::as_str))?;
    app.request_toggle(id);
    Ok(())
}

fn cmd_rm(app: &mut App<SqliteStorage>, args: &[String]) -> Result<(), String> {
    let id = resolve_id(app, args.first().map(String::as_str))?;
    app.request_delete(id);
    if prompt_yes_no("Delete this task? [y/N] ")? {
        app.confirm();
        println!("deleted {}", short_id(id));
    } else {
        app.deny();
    }
    Ok(())
}

fn cmd_clear(app: &mut App<SqliteStorage>) -> Result<(), String> {
    app.request_clear_all();
    if prompt_yes_no("Clear ALL tasks? This cannot be undone. [y/N] ")? {
        app.confirm();
        println!("cleared");
    } else {
        app.deny();
    }
    Ok(())
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    let due = task
        .due_date
        .map(|date| format!(" due {date}"))
        .unwrap_or_default();
    println!(
        "[{mark}] {}  {}  ({}){due}",
        short_id(task.id),
        task.title,
        task.category
    );
}

/// Resolves a task by unique id prefix.
fn resolve_id(app: &App<SqliteStorage>, prefix: Option<&str>) -> Result<TaskId, String> {
    let prefix = prefix.ok_or_else(|| "an id prefix is required".to_string())?;
    let matches: Vec<TaskId> = app
        .store()
        .tasks()
        .iter()
        .filter(|task| task.id.to_string().starts_with(prefix))
        .map(|task| task.id)
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("no task id starts with `{prefix}`")),
        _ => Err(format!("id prefix `{prefix}` is ambiguous")),
    }
}

fn short_id(id: TaskId) -> String {
    id.to_string()[..8].to_string()
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        format!("unknown category `{value}`; expected work, personal or other")
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}

/// Splits `--name value` options from positional arguments.
fn split_options(args: &[String]) -> Result<(Vec<String>, Vec<(String, String)>), String> {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(name) = arg.strip_prefix("--") {
            let value = iter
                .next()
                .ok_or_else(|| format!("option --{name} requires a value"))?;
            options.push((name.to_string(), value.clone()));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, options))
}

fn prompt_yes_no(question: &str) -> Result<bool, String> {
    print!("{question}");
    io::stdout().flush().map_err(|err| err.to_string())?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| err.to_string())?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
