//! The interactive integration setup flow.
//!
//! Walks the user through one session: authenticate (or reuse the stored
//! session), fetch the catalog, pick integrations, complete any required
//! authentication flows, and install the generated skills into the local
//! database.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use skillbridge_catalog::{
    ActivationState, CatalogClient, Endpoints, IntegrationActivator, Tool,
};
use skillbridge_codegen::catalog_to_skills;
use skillbridge_store::{
    Database, SessionBootstrap, SessionStore, SkillStore, UserSession, plan_bootstrap,
};

/// File name of the skill database, stored next to the session file.
const SKILL_DB_FILE_NAME: &str = "skills.db";

/// Where the skill database lives for a given session store.
pub fn skill_db_path(store: &SessionStore) -> PathBuf {
    match store.path().parent() {
        Some(dir) => dir.join(SKILL_DB_FILE_NAME),
        None => PathBuf::from(SKILL_DB_FILE_NAME),
    }
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// Run the full interactive setup against the given deployment.
pub async fn run_setup(endpoints: Endpoints) -> Result<()> {
    print_banner();

    let client = CatalogClient::new(endpoints);
    let session_store = SessionStore::open_default().context("failed to locate session file")?;

    // 1. Session bootstrap — reuse the stored credential when present.
    bootstrap_session(&client, &session_store).await?;

    // 2. Skill database.
    let db_path = skill_db_path(&session_store);
    let db = Database::open_and_migrate(db_path.clone())
        .await
        .context("failed to open skill database")?;
    let skill_store = SkillStore::new(db);
    println!("  {} Skill database ready", "✔".green());

    // 3. Catalog fetch and skill generation.
    let pb = spinner("Fetching integration catalog...");
    let catalog = client.list_tools().await?;
    pb.finish_and_clear();

    if catalog.tools.is_empty() {
        println!("  No integrations are currently available.");
        return Ok(());
    }

    let skills_by_tool = catalog_to_skills(&catalog, &client)?;
    info!(tools = skills_by_tool.len(), "catalog transformed to skills");
    println!(
        "  {} {} integrations available",
        "✔".green(),
        skills_by_tool.len()
    );

    // 4. Selection.
    let names: Vec<String> = skills_by_tool.keys().cloned().collect();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let selected = select_integrations(&mut stdin.lock(), &mut stdout.lock(), &names)?;

    if selected.is_empty() {
        println!("  Nothing selected, nothing to do.");
        return Ok(());
    }

    // 5. Activation — drive each selected integration to Ready.
    println!();
    println!(
        "{}",
        format!("> Setting up {} integrations...", selected.len()).green()
    );

    let tools_by_name: HashMap<&str, &Tool> =
        catalog.tools.iter().map(|t| (t.name.as_str(), t)).collect();
    let activator = IntegrationActivator::new(&client);

    for name in &selected {
        let tool = tools_by_name
            .get(name.as_str())
            .copied()
            .with_context(|| format!("integration `{name}` disappeared from the catalog"))?;

        let mut wait_spinner = None;
        let state = activator
            .activate(tool, |auth_url| {
                println!(
                    "  {} {} requires authentication. Visit this URL to continue:",
                    "⚠".yellow(),
                    name.bold()
                );
                println!("    {auth_url}");
                wait_spinner = Some(spinner("Waiting for authentication to complete..."));
            })
            .await?;

        match wait_spinner.take() {
            Some(pb) => {
                pb.finish_and_clear();
                println!("  {} {} authenticated successfully", "✔".green(), name);
            }
            None => println!("  {} {} already authenticated", "✔".green(), name),
        }
        debug_assert_eq!(state, ActivationState::Ready);
    }

    // 6. Install the generated skills for the selected integrations.
    let pb = spinner("Installing skills...");
    let mut installed = 0usize;
    for name in &selected {
        for skill in &skills_by_tool[name] {
            skill_store.upsert(skill).await?;
            installed += 1;
        }
    }
    pb.finish_and_clear();
    info!(installed, "skills installed");

    println!(
        "  {} {installed} skills installed across {} integrations",
        "✔".green(),
        selected.len()
    );
    println!();
    println!("{}", "> All skills installed successfully!".green());
    Ok(())
}

/// Reuse the persisted session, or identify this device and persist the
/// resulting credential.
async fn bootstrap_session(client: &CatalogClient, store: &SessionStore) -> Result<()> {
    let pb = spinner("Authenticating you...");

    match plan_bootstrap(store.load().context("failed to read session file")?) {
        SessionBootstrap::Reused(_) => {
            pb.finish_and_clear();
            println!("  {} Session restored", "✔".green());
        }
        SessionBootstrap::NeedsIdentify { fingerprint } => {
            let token = client.identify_user(&fingerprint).await?;
            store
                .save(&UserSession {
                    user_id: Some(token.0),
                    device_fingerprint: fingerprint,
                })
                .context("failed to persist session")?;
            pb.finish_and_clear();
            println!("  {} Authenticated", "✔".green());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Ask the user which integrations to enable.
///
/// Reads one line: comma-separated 1-based numbers, or empty/`all` for
/// everything.
fn select_integrations(
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    names: &[String],
) -> Result<Vec<String>> {
    writeln!(out)?;
    writeln!(out, "> Which integrations do you want to enable?")?;
    writeln!(out)?;
    for (i, name) in names.iter().enumerate() {
        writeln!(out, "    ({}) {}", i + 1, name)?;
    }
    writeln!(out)?;
    write!(
        out,
        "  Enter numbers separated by commas, or press Enter for all: "
    )?;
    out.flush()?;

    let mut line = String::new();
    stdin.read_line(&mut line)?;

    let indices = parse_selection(&line, names.len());
    Ok(indices.into_iter().map(|i| names[i].clone()).collect())
}

/// Parse a selection line into 0-based indices.
///
/// Empty input or `all` selects everything. Out-of-range and non-numeric
/// entries are ignored; duplicates keep their first position.
fn parse_selection(input: &str, count: usize) -> Vec<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return (0..count).collect();
    }

    let mut indices = Vec::new();
    for part in trimmed.split(',') {
        if let Ok(n) = part.trim().parse::<usize>()
            && (1..=count).contains(&n)
            && !indices.contains(&(n - 1))
        {
            indices.push(n - 1);
        }
    }
    indices
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn print_banner() {
    println!();
    println!("  ┌────────────────────────────────────────────┐");
    println!("  │                                            │");
    println!("  │   {}                              │", "skillbridge".bold());
    println!("  │                                            │");
    println!("  │   Plug tool-platform integrations into     │");
    println!("  │   your agent's skill store.                │");
    println!("  │                                            │");
    println!("  └────────────────────────────────────────────┘");
    println!();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn names() -> Vec<String> {
        vec!["github".to_string(), "slack".to_string(), "linear".to_string()]
    }

    #[test]
    fn parse_selection_empty_selects_all() {
        assert_eq!(parse_selection("\n", 3), vec![0, 1, 2]);
        assert_eq!(parse_selection("  ", 3), vec![0, 1, 2]);
    }

    #[test]
    fn parse_selection_all_keyword() {
        assert_eq!(parse_selection("all\n", 3), vec![0, 1, 2]);
        assert_eq!(parse_selection("ALL", 3), vec![0, 1, 2]);
    }

    #[test]
    fn parse_selection_numbers() {
        assert_eq!(parse_selection("1,3\n", 3), vec![0, 2]);
        assert_eq!(parse_selection(" 2 , 1 ", 3), vec![1, 0]);
    }

    #[test]
    fn parse_selection_ignores_junk_and_out_of_range() {
        assert_eq!(parse_selection("0,4,x,2", 3), vec![1]);
    }

    #[test]
    fn parse_selection_deduplicates() {
        assert_eq!(parse_selection("2,2,2", 3), vec![1]);
    }

    #[test]
    fn select_integrations_maps_numbers_to_names() {
        let mut input = Cursor::new(b"1,3\n".to_vec());
        let mut output = Vec::new();

        let selected = select_integrations(&mut input, &mut output, &names()).unwrap();
        assert_eq!(selected, vec!["github".to_string(), "linear".to_string()]);

        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.contains("(1) github"));
        assert!(prompt.contains("(3) linear"));
    }

    #[test]
    fn select_integrations_empty_line_selects_all() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut output = Vec::new();

        let selected = select_integrations(&mut input, &mut output, &names()).unwrap();
        assert_eq!(selected, names());
    }

    #[test]
    fn skill_db_path_sits_next_to_session_file() {
        let store = SessionStore::new("/tmp/skillbridge-test");
        assert_eq!(
            skill_db_path(&store),
            PathBuf::from("/tmp/skillbridge-test/skills.db")
        );
    }
}
