//! Command dispatch: wires parsed arguments to application services.

use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::SessionOutcome;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, RenderStyle, Settings};
use crate::domain::Tree;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

const SESSION_PROMPT: &str = "tree>";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Diff {
            first,
            second,
            delimiter,
            json,
        }) => cmd_diff(&container, first, second, delimiter.as_deref(), *json),
        Some(Commands::Session { tree_path }) => cmd_session(&container, tree_path.as_deref()),
        Some(Commands::Render { file, style }) => cmd_render(&container, file, *style),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "treediff", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `treediff --help`".to_string(),
        )),
    }
}

#[instrument(skip(container))]
fn cmd_diff(
    container: &ServiceContainer,
    first: &Path,
    second: &Path,
    delimiter: Option<&str>,
    json: bool,
) -> CliResult<()> {
    let script = container.diff.diff_files(first, second)?;
    if json {
        output::info(&serde_json::to_string_pretty(&script)?);
    } else {
        let delimiter = delimiter.unwrap_or(container.settings.delimiter.as_str());
        output::info(&script.join(delimiter));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_render(container: &ServiceContainer, file: &Path, style: Option<RenderStyle>) -> CliResult<()> {
    let tree = container.diff.read_tree(file)?;
    let style = style.unwrap_or(container.settings.render_style);
    output::info(&render(&tree, style));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_session(container: &ServiceContainer, tree_path: Option<&Path>) -> CliResult<()> {
    let mut tree = container
        .store
        .load_or_new(tree_path, container.settings.default_root)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    run_session(container, &mut tree, stdin.lock(), interactive)
}

/// Read commands from `input` until `EXIT` or end of input.
///
/// Refusals and unknown commands are reported and the loop continues.
pub fn run_session<R: BufRead>(
    container: &ServiceContainer,
    tree: &mut Tree,
    input: R,
    interactive: bool,
) -> CliResult<()> {
    let style = container.settings.render_style;
    output::info(&render(tree, style));

    let mut lines = input.lines();
    loop {
        if interactive {
            output::prompt(SESSION_PROMPT);
        }
        let Some(line) = lines.next() else {
            debug!("end of input");
            break;
        };
        let line = line.map_err(|e| InfraError::io("read session input", e))?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = container.session.execute_line(tree, &line)?;
        match &outcome {
            SessionOutcome::Refused(_) | SessionOutcome::Unrecognized(_) => {
                output::warning(&outcome)
            }
            SessionOutcome::Saved(_) => output::success(&outcome),
            SessionOutcome::Applied(_) | SessionOutcome::Exit => {}
        }
        if outcome.shows_tree() {
            output::info(&render(tree, style));
        }
        if !outcome.is_continue() {
            break;
        }
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if container.fs.exists(&path) {
                    "exists"
                } else {
                    "not found"
                };
                output::action("global", &format!("{} ({})", path.display(), state));
            }
            None => output::warning("no home directory, global config unavailable"),
        },
        ConfigCommands::Init => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("no home directory, cannot place global config".to_string())
            })?;
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|()| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

/// Render `tree` in the requested style, without a trailing newline.
pub fn render(tree: &Tree, style: RenderStyle) -> String {
    match style {
        RenderStyle::Indent => tree.to_string(),
        RenderStyle::Tree => tree.to_termtree().to_string().trim_end().to_string(),
    }
}
