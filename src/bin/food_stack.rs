// Food stack command-line front end
//
// Purpose: browse the catalog, edit the persisted stack and export it
// Usage: cargo run --bin food-stack -- <command>

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use food_stack_builder::browse::{CategoryFilter, SortKey};
use food_stack_builder::report::write_export;
use food_stack_builder::utils::display::{category_label, format_multiplier, format_score};
use food_stack_builder::{Catalog, Config, ExportError, FileStore, Session, StackChange};

#[derive(Parser)]
#[command(
    name = "food-stack",
    about = "Build and export an anti-inflammatory food stack"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Catalog directory (foods.json, synergies.json, templates.json)
    #[arg(long, global = true, env = "FOOD_STACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory holding the saved stack
    #[arg(long, global = true, env = "FOOD_STACK_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(long, global = true, env = "FOOD_STACK_EXPORT_DIR")]
    export_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog foods
    Browse {
        /// Category id, or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Case-insensitive text matched against name and description
        #[arg(long, default_value = "")]
        search: String,

        /// "antiInflammatory" (highest first) or "name"
        #[arg(long, default_value_t = SortKey::AntiInflammatory)]
        sort: SortKey,
    },

    /// List catalog categories
    Categories,

    /// Show the detail card for one food
    Show { food_id: String },

    /// Add foods to the stack
    Add {
        #[arg(required = true)]
        food_ids: Vec<String>,
    },

    /// Remove a food from the stack
    Remove { food_id: String },

    /// Set the serving multiplier of a stacked food (0.5 to 5)
    Multiplier { food_id: String, value: f64 },

    /// Remove every food from the stack
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List diet templates
    Templates,

    /// Replace the stack with a template's foods
    Apply {
        template_id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show the stack with its summary
    Stack,

    /// Show synergies between stacked foods
    Synergies,

    /// Export the stack as a dated text file
    Export {
        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "food_stack_builder=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.state_dir {
        config.state_dir = dir;
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    config.log();

    let catalog = Catalog::load_dir(&config.data_dir);
    let mut session = Session::open(catalog, Box::new(FileStore::new(&config.state_dir)));

    match cli.command {
        Command::Browse {
            category,
            search,
            sort,
        } => {
            session.set_category(CategoryFilter::parse(&category));
            session.set_search(&search);
            session.set_sort(sort);
            print_browse(&session);
        }
        Command::Categories => {
            println!("all");
            for category in session.catalog().categories() {
                println!("{}", category);
            }
        }
        Command::Show { food_id } => match session.food_card(&food_id) {
            Some(card) => print!("{}", card),
            None => bail!("Unknown food '{}'", food_id),
        },
        Command::Add { food_ids } => {
            for food_id in food_ids {
                match session.add_item(&food_id) {
                    Some(_) => println!("Added {}", food_id),
                    None if session.is_in_stack(&food_id) => {
                        println!("{} is already in your stack", food_id)
                    }
                    None => println!("Unknown food '{}'", food_id),
                }
            }
        }
        Command::Remove { food_id } => match session.remove_item(&food_id) {
            Some(_) => println!("Removed {}", food_id),
            None => println!("{} is not in your stack", food_id),
        },
        Command::Multiplier { food_id, value } => {
            match session.set_multiplier(&food_id, value) {
                Some(_) => println!("{} set to {}x", food_id, format_multiplier(value)),
                None if !session.is_in_stack(&food_id) => {
                    println!("{} is not in your stack", food_id)
                }
                None => println!("Multiplier must be between 0.5 and 5"),
            }
        }
        Command::Clear { yes } => {
            if session.clear_all(|prompt| yes || confirm(prompt)).is_some() {
                println!("Stack cleared");
            }
        }
        Command::Templates => print_templates(&session),
        Command::Apply { template_id, yes } => {
            if session.catalog().template(&template_id).is_none() {
                bail!("Unknown template '{}'", template_id);
            }
            if let Some(StackChange::TemplateApplied { replacement, .. }) =
                session.apply_template(&template_id, |prompt| yes || confirm(prompt))
            {
                println!("Stack now has {} foods", replacement.applied.len());
                if !replacement.skipped.is_empty() {
                    println!("Not in catalog: {}", replacement.skipped.join(", "));
                }
            }
        }
        Command::Stack => print_stack(&session),
        Command::Synergies => print_synergies(&session),
        Command::Export { stdout } => {
            let today = Local::now().date_naive();
            let text = match session.export(today) {
                Ok(text) => text,
                Err(ExportError::EmptyStack) => {
                    println!("Your food stack is empty!");
                    return Ok(());
                }
            };
            if stdout {
                print!("{}", text);
            } else {
                let path = write_export(&config.export_dir, today, &text)?;
                println!("Exported to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but "y"/"yes" declines.
fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_browse(session: &Session) {
    let foods = session.display_list();
    if foods.is_empty() {
        println!("No foods match.");
        return;
    }
    for food in foods {
        let marker = if session.is_in_stack(&food.id) { "*" } else { " " };
        println!(
            "{} {:<24} {:<18} {}",
            marker,
            food.name,
            category_label(&food.category),
            format_score(food.anti_inflammatory)
        );
    }
}

fn print_templates(session: &Session) {
    for preview in session.template_previews() {
        println!("{} ({})", preview.name, preview.id);
        if !preview.description.is_empty() {
            println!("  {}", preview.description);
        }
        let mut foods = preview.preview_names.join(", ");
        if preview.more > 0 {
            foods.push_str(&format!(" +{} more", preview.more));
        }
        println!("  Foods: {} ({} total)", foods, preview.food_count);
        println!(
            "  Avg anti-inflammatory: {}",
            format_score(preview.avg_anti_inflammatory)
        );
        if let Some(popularity) = preview.popularity {
            println!("  Popularity: {:.0}%", popularity);
        }
    }
}

fn print_stack(session: &Session) {
    let stack = session.stack();
    if stack.is_empty() {
        println!("Your food stack is empty!");
        return;
    }

    for entry in stack.entries() {
        let name = session
            .catalog()
            .food(&entry.food_id)
            .map(|f| f.name.as_str())
            .unwrap_or(entry.food_id.as_str());
        println!("{} x{}", name, format_multiplier(entry.multiplier));
    }

    let summary = session.summary();
    println!();
    println!("Total foods: {}", summary.total_foods);
    println!(
        "Avg anti-inflammatory: {}",
        format_score(summary.avg_anti_inflammatory)
    );
    println!("Avg evidence: {}", format_score(summary.avg_evidence));
    println!("Daily cost: {}", summary.daily_cost);
}

fn print_synergies(session: &Session) {
    let synergies = session.synergies();
    if synergies.is_empty() {
        println!("No synergies between your stacked foods.");
        return;
    }
    for m in synergies {
        println!("{}", m.title());
        println!("  {}", m.synergy.description);
        if let Some(recommendation) = &m.synergy.recommendation {
            println!("  Recommendation: {}", recommendation);
        }
    }
}
