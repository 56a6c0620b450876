#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for playing, solving and sharing Kitten Rescue puzzles.

mod options;
mod render;
mod setup_transfer;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use kitten_rescue_core::{Command, Difficulty, Event, FieldSize, GameSetup, TurnMove};
use kitten_rescue_system_generation::{generate_setup, GenerationOptions};
use kitten_rescue_system_hint::get_best_next_move;
use kitten_rescue_system_par::{calculate_par, solve_setup, ParInfo, ParOptions};
use kitten_rescue_world::{self as world, query, GameState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::{
    options::{parse_difficulty, parse_field_size, CliConfig},
    render::{legend, render_board},
    setup_transfer::{decode_setup, encode_setup},
};

#[derive(Debug, Parser)]
#[command(name = "kitten-rescue")]
#[command(about = "Reunite the mother cat with her kittens")]
struct Cli {
    /// TOML file with generation options and glyph overrides.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output, including solver statistics.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Play a game interactively on the terminal.
    Play {
        #[command(flatten)]
        setup: SetupArgs,
    },
    /// Compute the par and shortest solutions of a setup.
    Solve {
        #[command(flatten)]
        setup: SetupArgs,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate a random setup and print its code.
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Suggest the next move after the given moves.
    Hint {
        #[command(flatten)]
        setup: SetupArgs,
        /// Moves already played (up, down, left, right, meow).
        moves: Vec<TurnMove>,
    },
    /// Draw a setup.
    Show {
        #[command(flatten)]
        setup: SetupArgs,
    },
}

#[derive(Debug, Args)]
struct SetupArgs {
    /// Setup code to load instead of generating a fresh setup.
    #[arg(long)]
    code: Option<String>,
    #[command(flatten)]
    generation: GenerationArgs,
}

#[derive(Debug, Args)]
struct GenerationArgs {
    /// Seed for the random number generator; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Board size: 3, 4 or 5.
    #[arg(long, value_parser = parse_field_size)]
    size: Option<FieldSize>,
    /// Required difficulty: easy, medium, hard or extreme.
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,
    /// Keep every shortest solution instead of the first one found.
    #[arg(long)]
    all_solutions: bool,
}

impl GenerationArgs {
    fn options(&self, base: GenerationOptions) -> GenerationOptions {
        GenerationOptions {
            field_size: self.size.unwrap_or(base.field_size),
            difficulty: self.difficulty.or(base.difficulty),
            return_all_solutions: self.all_solutions || base.return_all_solutions,
            ..base
        }
    }

    fn rng(&self) -> (u64, ChaCha8Rng) {
        let seed = self.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "seeding random number generator");
        (seed, ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Summary printed by `solve` and `generate`.
#[derive(Debug, Serialize)]
struct SetupReport {
    code: String,
    field_size: u8,
    par: usize,
    difficulty: Difficulty,
    solutions: Vec<Vec<String>>,
    seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fell_back: Option<bool>,
}

impl SetupReport {
    fn new(setup: &GameSetup, par_info: &ParInfo, seed: u64) -> Self {
        Self {
            code: encode_setup(setup),
            field_size: setup.field_size().get(),
            par: par_info.par,
            difficulty: par_info.difficulty,
            solutions: par_info
                .possible_solutions
                .iter()
                .map(|solution| solution.iter().map(ToString::to_string).collect())
                .collect(),
            seed,
            attempts: None,
            fell_back: None,
        }
    }

    fn print(&self, json: bool) -> Result<()> {
        let mut stdout = io::stdout().lock();
        if json {
            let rendered =
                serde_json::to_string_pretty(self).context("failed to serialise report")?;
            writeln!(stdout, "{rendered}")?;
            return Ok(());
        }

        writeln!(stdout, "code:       {}", self.code)?;
        writeln!(stdout, "board:      {0}x{0}", self.field_size)?;
        writeln!(stdout, "par:        {}", self.par)?;
        writeln!(stdout, "difficulty: {}", self.difficulty)?;
        if let (Some(attempts), Some(fell_back)) = (self.attempts, self.fell_back) {
            let note = if fell_back { " (fallback)" } else { "" };
            writeln!(stdout, "attempts:   {attempts}{note}")?;
        }
        for solution in &self.solutions {
            writeln!(stdout, "solution:   {}", solution.join(" "))?;
        }
        Ok(())
    }
}

/// Entry point for the Kitten Rescue command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        CliCommand::Play { setup } => {
            let (setup, _) = resolve_setup(&setup, &config.generation);
            play(setup, &config)
        }
        CliCommand::Solve { setup, json } => {
            let options = par_options(&setup.generation, &config.generation);
            let (setup, seed) = resolve_setup(&setup, &config.generation);
            let par_info = calculate_par(&setup, &options, &mut ChaCha8Rng::seed_from_u64(seed));
            SetupReport::new(&setup, &par_info, seed).print(json)
        }
        CliCommand::Generate { generation, json } => {
            let options = generation.options(config.generation);
            let (seed, mut rng) = generation.rng();
            let generated = generate_setup(&options, &mut rng);
            let mut report = SetupReport::new(&generated.setup, &generated.par_info, seed);
            report.attempts = Some(generated.attempts);
            report.fell_back = Some(generated.fell_back);
            report.print(json)?;
            if !json {
                show(&generated.setup, &config)?;
            }
            Ok(())
        }
        CliCommand::Hint { setup, moves } => {
            let (setup, _) = resolve_setup(&setup, &config.generation);
            hint(setup, &moves)
        }
        CliCommand::Show { setup } => {
            let (setup, _) = resolve_setup(&setup, &config.generation);
            writeln!(io::stdout(), "{}", encode_setup(&setup))?;
            show(&setup, &config)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn par_options(args: &GenerationArgs, base: &GenerationOptions) -> ParOptions {
    ParOptions {
        return_all_solutions: args.all_solutions || base.return_all_solutions,
        ..ParOptions::default()
    }
}

/// Loads the setup named by `--code`, or generates one when no usable code was
/// given. The returned setup always carries solver output.
fn resolve_setup(args: &SetupArgs, base: &GenerationOptions) -> (GameSetup, u64) {
    let options = args.generation.options(*base);
    let (seed, mut rng) = args.generation.rng();

    if let Some(code) = &args.code {
        match decode_setup(code) {
            Ok(setup) => {
                let par_options = par_options(&args.generation, base);
                return (solve_setup(&setup, &par_options, &mut rng), seed);
            }
            Err(error) => {
                tracing::warn!(%error, "could not decode setup code; generating a fresh setup");
            }
        }
    }

    (generate_setup(&options, &mut rng).setup, seed)
}

fn show(setup: &GameSetup, config: &CliConfig) -> Result<()> {
    let representations = config.glyphs.apply(Default::default());
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render_board(&setup.initial_view(), &representations))?;
    writeln!(stdout, "{}", legend(&representations))?;
    Ok(())
}

fn hint(setup: GameSetup, moves: &[TurnMove]) -> Result<()> {
    let mut state = GameState::new(setup);
    for (index, turn_move) in moves.iter().enumerate() {
        let mut events = Vec::new();
        world::apply(
            &mut state,
            Command::SubmitMove {
                turn_move: *turn_move,
            },
            &mut events,
        );
        world::apply(&mut state, Command::CommitTurn, &mut events);
        for event in events {
            if let Event::MoveRejected { reason, .. } = event {
                bail!("move {} ({turn_move}) was rejected: {reason}", index + 1);
            }
        }
    }

    let mut stdout = io::stdout().lock();
    match get_best_next_move(query::setup(&state), query::moves(&state)) {
        Some(turn_move) => writeln!(stdout, "{turn_move}")?,
        None => writeln!(stdout, "no hint available")?,
    }
    Ok(())
}

fn play(setup: GameSetup, config: &CliConfig) -> Result<()> {
    let representations = config.glyphs.apply(Default::default());
    let mut state = GameState::new(setup).with_representations(representations);
    let mut stdout = io::stdout().lock();
    let mut lines = io::stdin().lock().lines();
    let mut events = Vec::new();

    writeln!(stdout, "code: {}", encode_setup(query::setup(&state)))?;
    writeln!(stdout, "{}", legend(query::representations(&state)))?;
    writeln!(
        stdout,
        "moves: up/w, down/s, left/a, right/r, meow/m; also hint, retry, quit"
    )?;
    world::apply(&mut state, Command::Retry, &mut events);
    report_events(&mut stdout, &events)?;
    draw(&mut stdout, &state)?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        let command = match line.trim() {
            "" => continue,
            "quit" | "q" => break,
            "retry" => Command::Retry,
            "hint" | "h" => {
                match get_best_next_move(query::setup(&state), query::moves(&state)) {
                    Some(turn_move) => writeln!(stdout, "try {turn_move}")?,
                    None => writeln!(stdout, "no hint available")?,
                }
                continue;
            }
            input => match input.parse::<TurnMove>() {
                Ok(turn_move) => Command::SubmitMove { turn_move },
                Err(error) => {
                    writeln!(stdout, "{error}")?;
                    continue;
                }
            },
        };

        events.clear();
        world::apply(&mut state, command, &mut events);
        if query::is_turn_in_progress(&state) {
            world::apply(&mut state, Command::CommitTurn, &mut events);
        }
        report_events(&mut stdout, &events)?;
        draw(&mut stdout, &state)?;
    }

    Ok(())
}

fn draw(out: &mut impl Write, state: &GameState) -> Result<()> {
    let view = query::view(state);
    write!(
        out,
        "{}",
        render_board(&view, query::representations(state))
    )?;
    writeln!(out, "moves {}/{}", query::moves(state).len(), query::par(state))?;
    Ok(())
}

fn report_events(out: &mut impl Write, events: &[Event]) -> Result<()> {
    for event in events {
        match event {
            Event::GameStarted { field_size, par } => {
                writeln!(out, "new {field_size} game, par {par}")?;
            }
            Event::MoveRejected { turn_move, reason } => {
                writeln!(out, "cannot {turn_move}: {reason}")?;
            }
            Event::GameWon { move_count } => {
                writeln!(out, "all kittens are home after {move_count} moves")?;
            }
            Event::GameLost { move_count } => {
                writeln!(out, "out of moves after {move_count}; type retry to try again")?;
            }
            Event::TurnResolved { .. } | Event::TurnCommitted { .. } => {}
        }
    }
    Ok(())
}
