//! Interactive seed import

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use is_terminal::IsTerminal;

use crate::config::Config;
use crate::knowledge::{Catalog, ImportFlow, ImportPlan, Importer};
use crate::store::{DocumentStore, open_store};

/// Maximum slugs listed in the confirmation summary
const PREVIEW_LIMIT: usize = 10;

pub async fn run(config: &Config, yes: bool, dry_run: bool) -> Result<()> {
    let store = open_store(config).await?;
    let catalog = Catalog::embedded()?;
    let mut importer = Importer::new(store, catalog);

    let plan = importer.refresh().await?;
    print_plan(&plan, importer.catalog().len());

    if plan.is_empty() {
        println!("{}", "Nothing to import: the store already has every catalog document.".green());
        return Ok(());
    }
    if dry_run {
        println!("{}", "Dry run: nothing written.".dimmed());
        return Ok(());
    }
    if !yes && !std::io::stdin().is_terminal() {
        anyhow::bail!("Refusing to import without confirmation on a non-interactive terminal; pass --yes");
    }

    importer.open()?;
    run_dialog(&mut importer, yes).await
}

/// Drive the confirmation dialog until the import is written or cancelled
async fn run_dialog<S: DocumentStore>(importer: &mut Importer<S>, yes: bool) -> Result<()> {
    while importer.flow().can_submit() {
        if let Some(error) = failure_notice(importer.flow(), yes) {
            eprintln!("{} {}", "Import failed:".red().bold(), error);
        }
        let prompt = match importer.flow() {
            ImportFlow::Failed { .. } => {
                format!("Retry importing {} documents?", importer.flow().pending().len())
            }
            _ => format!("Import {} documents?", importer.flow().pending().len()),
        };

        // --yes confirms the first attempt only; retries always ask
        let first_attempt = matches!(importer.flow(), ImportFlow::Confirming { .. });
        let proceed = if yes && first_attempt {
            true
        } else if yes {
            false
        } else {
            Confirm::new().with_prompt(prompt).default(false).interact()?
        };

        if !proceed {
            let failed = importer.flow().error().map(str::to_string);
            importer.cancel()?;
            return match failed {
                Some(error) if yes => anyhow::bail!("Import failed: {}", error),
                _ => {
                    println!("{}", "Import cancelled.".yellow());
                    Ok(())
                }
            };
        }

        match importer.confirm().await {
            Ok(_) => {
                let imported = importer.acknowledge()?;
                println!("{} {} documents", "Imported".green().bold(), imported);
                return Ok(());
            }
            Err(e) => log::debug!("Import attempt failed: {:#}", e),
        }
    }

    anyhow::bail!("Import dialog is not open (state: {})", importer.flow().label())
}

/// Error to show above the retry prompt. With --yes there is no prompt: the
/// dialog cancels and the error is returned to the caller instead.
fn failure_notice(flow: &ImportFlow, yes: bool) -> Option<&str> {
    if yes {
        return None;
    }
    flow.error()
}

fn print_plan(plan: &ImportPlan, catalog_len: usize) {
    println!(
        "Catalog: {} documents, {} already present, {} to import",
        catalog_len,
        plan.already_present.len(),
        plan.len().to_string().cyan()
    );

    for slug in plan.slugs().iter().take(PREVIEW_LIMIT) {
        println!("  + {}", slug);
    }
    if plan.len() > PREVIEW_LIMIT {
        println!("  ... and {} more", plan.len() - PREVIEW_LIMIT);
    }
}
