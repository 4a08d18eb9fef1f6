mod console;
mod debug_report;

use console::ConsoleTranscript;
use scoresight_assistant::{
    DialogueController, Engine, NoDelay, RngSource, RuleBook, TurnError, respond_verbose_with,
};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const RULES_ENV: &str = "SCORESIGHT_RULES";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoresight_assistant=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let loaded;
    let engine = match &config.rules {
        Some(path) => match load_engine(path) {
            Ok(engine) => {
                loaded = engine;
                &loaded
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        },
        None => Engine::builtin(),
    };

    let result = if config.explain { explain(&config, engine) } else { chat(&config, engine).await };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    input: Option<String>,
    rules: Option<PathBuf>,
    seed: Option<u64>,
    instant: bool,
    explain: bool,
    html: bool,
    color: bool,
}

impl CliConfig {
    fn random(&self) -> RngSource {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        }
    }
}

fn load_engine(path: &Path) -> Result<Engine, String> {
    let book = RuleBook::from_path(path).map_err(|err| format!("error: {err}"))?;
    Engine::compile(&book).map_err(|err| format!("error: {}: {err}", path.display()))
}

/// Print the cascade trace for each non-blank line of input.
fn explain(config: &CliConfig, engine: &Engine) -> Result<(), String> {
    let input = match &config.input {
        Some(value) => value.clone(),
        None => read_stdin_input()?,
    };
    let mut rng = config.random();
    let mut explained = 0;
    for line in input.lines() {
        if let Some(details) = respond_verbose_with(line, engine, &mut rng) {
            debug_report::print_run(&details, config.color);
            explained += 1;
        }
    }
    if explained == 0 {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }
    Ok(())
}

/// Run a conversation: one turn for a message given on the command line,
/// otherwise one turn per line of stdin until EOF or Ctrl-C.
async fn chat(config: &CliConfig, engine: &Engine) -> Result<(), String> {
    let interactive = config.input.is_none() && io::stdin().is_terminal();
    let transcript = Arc::new(ConsoleTranscript::new(config.color, io::stdout().is_terminal(), !interactive));
    let mut controller = DialogueController::new(engine, Arc::clone(&transcript)).with_random(config.random());
    if config.instant {
        controller = controller.with_delay(NoDelay);
    }

    match &config.input {
        Some(text) => {
            run_turn(&controller, text).await.map_err(|err| format!("error: {err}"))?;
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                if interactive {
                    print!("> ");
                    let _ = io::stdout().flush();
                }
                let line = tokio::select! {
                    line = lines.next_line() => line.map_err(|err| format!("error: failed to read stdin: {err}"))?,
                    _ = tokio::signal::ctrl_c() => None,
                };
                let Some(line) = line else { break };
                let interrupted = run_turn(&controller, &line).await.map_err(|err| format!("error: {err}"))?;
                if interrupted {
                    break;
                }
            }
            if interactive {
                println!();
            }
        }
    }

    controller.close();
    if config.html {
        print!("{}", transcript.record().render_html());
    }
    Ok(())
}

/// Submit one message and wait for its reply. Ctrl-C while the assistant is
/// typing closes the chat; returns whether that happened.
async fn run_turn(controller: &DialogueController<'_, ConsoleTranscript>, text: &str) -> Result<bool, TurnError> {
    let Some(turn) = controller.submit(text) else {
        return Ok(false);
    };
    let finish = turn.finish();
    tokio::pin!(finish);
    tokio::select! {
        turn = &mut finish => {
            turn?;
            Ok(false)
        }
        _ = tokio::signal::ctrl_c() => {
            controller.close();
            finish.await?;
            Ok(true)
        }
    }
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut rules: Option<PathBuf> = std::env::var_os(RULES_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
    let mut seed: Option<u64> = None;
    let mut instant = false;
    let mut explain = false;
    let mut html = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("scoresight-assistant {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--instant" => instant = true,
            "--explain" => explain = true,
            "--html" => html = true,
            "--rules" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a value".to_string())?;
                rules = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = args.next().ok_or_else(|| "error: --seed expects a value".to_string())?;
                seed = Some(parse_seed(&value)?);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--rules=") => {
                rules = Some(PathBuf::from(arg.trim_start_matches("--rules=")));
            }
            _ if arg.starts_with("--seed=") => {
                seed = Some(parse_seed(arg.trim_start_matches("--seed="))?);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                input = Some(std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" "));
                break;
            }
        }
    }

    if input.as_deref().is_some_and(|text| text.trim().is_empty()) {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, rules, seed, instant, explain, html, color })
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value.parse().map_err(|_| format!("error: invalid --seed '{value}' (expected an unsigned integer)"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "scoresight-assistant {version}

Rule-based ScoreSight chat assistant.

Usage:
  scoresight-assistant [OPTIONS] [--] <message...>
  scoresight-assistant [OPTIONS]            (chat over stdin, one message per line)

Options:
  --rules <path>             Load reply tables from a JSON rule book instead of
                             the built-in ones.
  --seed <u64>               Seed reply selection and typing delays.
  --instant                  Reply without the simulated typing delay.
  --explain                  Print how each message went through the cascade
                             instead of chatting.
  --html                     Print the transcript as chat markup on exit.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {rules_env}           Rule book path used when --rules is not given.
  RUST_LOG                   Log filter (default: scoresight_assistant=warn).

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments, rule book or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        rules_env = RULES_ENV,
    )
}
