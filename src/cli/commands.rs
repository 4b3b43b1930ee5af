use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{Action, Outcome, Script, ScriptFormat, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{NodeFactory, OutlineOptions};
use crate::infrastructure::{InfraError, TerminalFactory};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show {
            script,
            format,
            placement,
        }) => cmd_show(script, (*format).into(), *placement),
        Some(Commands::Play {
            script,
            format,
            steps,
            interactive,
            show_hidden,
            placement,
        }) => cmd_play(
            script,
            (*format).into(),
            PlayFlags {
                steps: *steps,
                interactive: *interactive,
                show_hidden: *show_hidden,
                placement: *placement,
            },
        ),
        Some(Commands::Config { command }) => cmd_config(command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `steptree --help`".into(),
        )),
    }
}

#[derive(Debug, Clone, Copy)]
struct PlayFlags {
    steps: usize,
    interactive: bool,
    show_hidden: bool,
    placement: bool,
}

/// Settings for a script: global config plus the script directory's local config.
fn settings_for(script: &Path) -> CliResult<Settings> {
    Ok(Settings::load(script.parent())?)
}

fn open_session(
    script: &Path,
    format: ScriptFormat,
    settings: &Settings,
) -> CliResult<Session<TerminalFactory>> {
    let script = Script::load(script, format)?;
    let factory = TerminalFactory::new(settings.canvas.clone());
    Ok(Session::replay(&script, factory)?)
}

#[instrument]
fn cmd_show(script: &Path, format: ScriptFormat, placement: bool) -> CliResult<()> {
    let settings = settings_for(script)?;
    let session = open_session(script, format, &settings)?;
    let mut options = settings.outline_options();
    options.show_placement |= placement;
    output::frame(&session, &options);
    Ok(())
}

#[instrument]
fn cmd_play(script: &Path, format: ScriptFormat, flags: PlayFlags) -> CliResult<()> {
    let settings = settings_for(script)?;
    let mut session = open_session(script, format, &settings)?;
    let mut options = settings.outline_options();
    options.show_hidden |= flags.show_hidden;
    options.show_placement |= flags.placement;

    if !settings.play.start_revealed {
        session.rewind();
    }
    let revealed = session.advance(flags.steps);
    debug!(requested = flags.steps, revealed, "initial steps taken");
    output::frame(&session, &options);

    if flags.interactive {
        let stdin = io::stdin();
        let show_prompt = stdin.is_terminal();
        run_interactive(&mut session, stdin.lock(), &options, show_prompt)?;
    }
    Ok(())
}

/// Apply one action per input line, redrawing after each, until quit or EOF.
///
/// Unknown actions are reported and skipped. Returns the outcomes in order.
pub fn run_interactive<F: NodeFactory, R: BufRead>(
    session: &mut Session<F>,
    input: R,
    options: &OutlineOptions,
    show_prompt: bool,
) -> CliResult<Vec<Outcome>> {
    let mut outcomes = Vec::new();
    if show_prompt {
        output::prompt(">");
    }
    for line in input.lines() {
        let line = line.map_err(|e| InfraError::io("read action", e))?;
        if !line.trim().is_empty() {
            match line.parse::<Action>() {
                Ok(action) => {
                    let outcome = session.apply(action);
                    outcomes.push(outcome);
                    if outcome == Outcome::Quit {
                        break;
                    }
                    output::action("step", &output::describe_outcome(session, outcome));
                    output::frame(session, options);
                }
                Err(e) => output::warning(&e),
            }
        }
        if show_prompt {
            output::prompt(">");
        }
    }
    Ok(outcomes)
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show { dir } => {
            let settings = Settings::load(dir.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&format!("{}\n", path.display())),
            None => output::warning("no config directory for this platform"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
