//! CLI entry point for prompt-keybind-engine
//!
//! Provides command-line interface for checking keymap conflicts and
//! listing shortcuts with platform key symbols.

use clap::{Parser, Subcommand};
use colored::*;
use prompt_keybind_engine::core::{ConflictDetector, ShortcutCatalog};
use prompt_keybind_engine::core::types::Context;
use prompt_keybind_engine::platform::{Platform, PlatformAdapter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "prompt-keybind-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a keymap for conflicts
    Check {
        /// Path to a keymap file (defaults to the built-in keymap)
        #[arg(short, long)]
        keymap: Option<PathBuf>,
    },

    /// List all shortcuts with platform key symbols
    List {
        /// Path to a keymap file (defaults to the built-in keymap)
        #[arg(short, long)]
        keymap: Option<PathBuf>,

        /// Render for a specific platform (darwin, win32, linux)
        #[arg(short, long)]
        platform: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { keymap } => check_keymap(keymap.as_deref())?,
        Commands::List { keymap, platform } => list_shortcuts(keymap.as_deref(), platform)?,
    }

    Ok(())
}

/// Load the catalog from a file, or fall back to the built-in keymap
fn load_catalog(keymap_path: Option<&Path>) -> anyhow::Result<(ShortcutCatalog, String)> {
    match keymap_path {
        Some(path) => {
            // Expand tilde in path
            let expanded = shellexpand::tilde(
                path.to_str()
                    .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
            );
            let path = Path::new(expanded.as_ref());

            let catalog = ShortcutCatalog::from_path(path)?;
            Ok((catalog, path.display().to_string()))
        }
        None => Ok((ShortcutCatalog::load_default()?, "built-in keymap".to_string())),
    }
}

/// Check a keymap for conflicting shortcut definitions
fn check_keymap(keymap_path: Option<&Path>) -> anyhow::Result<()> {
    let (catalog, source) = load_catalog(keymap_path)?;

    println!("{} Checking keymap: {}", "→".cyan(), source);
    println!("{} Found {} shortcut definitions\n", "✓".green(), catalog.len());

    // Build conflict detector
    let mut detector = ConflictDetector::new();
    for def in catalog.definitions() {
        detector.add_definition(def.clone());
    }

    // Intentional shadows are informational, not errors
    let shadows = detector.find_shadows();
    if !shadows.is_empty() {
        println!("{} {} intentional shadow(s):", "ℹ".blue(), shadows.len());
        for shadow in &shadows {
            println!(
                "  {} shadows {} on {} while {} is active",
                shadow.shadowing.id.cyan(),
                shadow.shadowed.id.cyan(),
                format!("{}", shadow.combination).magenta(),
                shadow.shadowing.context,
            );
        }
        println!();
    }

    // Find conflicts
    let conflicts = detector.find_conflicts();

    if conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No conflicts detected!".bold());
    } else {
        println!(
            "{} Found {} conflict{}:\n",
            "✗".red().bold(),
            conflicts.len(),
            if conflicts.len() == 1 { "" } else { "s" }
        );

        for (i, conflict) in conflicts.iter().enumerate() {
            println!(
                "{} {} in {} context",
                format!("Conflict {}", i + 1).yellow().bold(),
                format!("{}", conflict.combination).cyan(),
                conflict.context,
            );

            for (idx, def) in conflict.conflicting_definitions.iter().enumerate() {
                println!(
                    "  {} {} → {}",
                    format!("{}.", idx + 1).dimmed(),
                    def.id.magenta(),
                    def.action,
                );
            }
            println!();
        }

        println!("{}", "⚠ Only one of these can ever fire at runtime!".yellow());
        std::process::exit(1);
    }

    Ok(())
}

/// List all shortcuts grouped by context
fn list_shortcuts(keymap_path: Option<&Path>, platform: Option<String>) -> anyhow::Result<()> {
    let (catalog, source) = load_catalog(keymap_path)?;

    let adapter = match platform {
        Some(name) => {
            let platform = Platform::parse(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown platform: {}", name))?;
            PlatformAdapter::with_platform(platform)
        }
        None => PlatformAdapter::new(),
    };

    println!(
        "{}",
        format!("Shortcuts from: {} ({})\n", source, adapter.platform()).bold()
    );

    let total = catalog.len();

    // Display each context group in diagnostic priority order
    let mut contexts = Context::ALL;
    contexts.sort_by_key(|c| c.priority());

    for context in contexts {
        let defs = catalog.for_context(context);
        if defs.is_empty() {
            continue;
        }

        println!("{}", format!("[{}]", context).bold());

        for def in defs {
            let combo = adapter.format_key_combo(&def.combination).cyan().bold();
            let description = def.description().green();

            println!(
                "  {:<16} {} {} {}",
                combo,
                description,
                format!("({})", def.priority).dimmed(),
                if def.customizable { "" } else { "🔒" },
            );
        }
        println!();
    }

    println!("{} Total: {} shortcuts", "✓".green(), total);

    Ok(())
}
