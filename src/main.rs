//! Bloodline Ascension - Entry Point
//!
//! Runs a headless session: a simple autopilot plays the player's side
//! and the combat log is streamed to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use bloodline::combat::{AttackTier, Combatant};
use bloodline::config::GameConfig;
use bloodline::data::export_default_data;
use bloodline::entities::{Role, StatType};
use bloodline::game::{Game, Phase, PlayerAction};
use bloodline::progression::SkillTarget;

/// Safety cap on autopilot steps
const MAX_TURNS: usize = 20_000;

/// Retreat from regular fights below this health fraction
const FLEE_THRESHOLD: f32 = 0.2;

/// Turn-based dungeon crawler, played by an autopilot
#[derive(Parser, Debug)]
#[command(name = "bloodline")]
#[command(author, version, about = "Bloodline Ascension - descend and survive", long_about = None)]
struct Args {
    /// Character name
    #[arg(short = 'n', long = "name", default_value = "")]
    name: String,

    /// Bloodline (hunter/vampire)
    #[arg(short = 'r', long = "role", default_value = "hunter")]
    role: String,

    /// RNG seed for a reproducible run
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Stop after clearing this many floors
    #[arg(short = 'f', long = "floors", default_value_t = 3)]
    floors: u32,

    /// Game configuration file (RON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Directory with enemies.ron / floors.ron overrides
    #[arg(short = 'd', long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Write the built-in data files to this directory and exit
    #[arg(long = "export-data")]
    export_data: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long = "json")]
    json: bool,

    /// Don't stream the combat log
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")
    )
    .init();

    log::info!("Starting Bloodline Ascension v{}", env!("CARGO_PKG_VERSION"));

    if let Some(dir) = &args.export_data {
        export_default_data(dir)
            .with_context(|| format!("failed to export data to {}", dir.display()))?;
        println!("Wrote default data to {}", dir.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.data_dir.is_some() {
        config.data_dir = args.data_dir.clone();
    }

    let role: Role = args.role.parse()?;
    if args.floors == 0 {
        bail!("--floors must be at least 1");
    }

    let mut game = Game::new(config);
    game.update_name(args.name.clone());
    game.update_role(role);
    game.start_from_selection();

    let outcome = run_autopilot(&mut game, &args, &mut io::stdout().lock());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    } else if let Some(player) = game.player() {
        println!();
        println!("{} the {} - Floor {}", player.name, player.display_role(), game.floor());
        println!("{}", player.display_stats());
    }

    outcome?;
    log::info!("Bloodline Ascension shut down cleanly");
    Ok(())
}

/// Main game loop
fn run_autopilot(game: &mut Game, args: &Args, out: &mut impl Write) -> Result<()> {
    let delay = game.config().enemy_turn_delay();
    let mut printed = 0;
    let mut outcome = Ok(());

    for _ in 0..MAX_TURNS {
        let keep_going = match game.phase() {
            Phase::GameOver => false,
            Phase::EnemyTurn => {
                game.update(delay);
                true
            }
            Phase::PlayerTurn => match take_turn(game) {
                Ok(()) => true,
                Err(e) => {
                    outcome = Err(e);
                    false
                }
            },
            Phase::Idle => explore(game, args.floors),
        };

        if !args.quiet {
            for entry in game.log().since(printed) {
                writeln!(out, "{}", entry.text)?;
            }
        }
        printed = game.log().len();

        if !keep_going {
            return outcome;
        }
    }

    log::warn!("Autopilot stopped after {} steps", MAX_TURNS);
    Ok(())
}

/// Between battles: descend when the floor is clear, otherwise look for a fight.
/// False once the run should stop.
fn explore(game: &mut Game, floors: u32) -> bool {
    spend_stat_points(game);
    if game.can_advance_floor() {
        let floor = game.floor();
        if floor >= floors {
            return false;
        }
        game.process_player_action(PlayerAction::AdvanceFloor);
        // Unchanged when the deepest floor is behind us
        game.floor() != floor
    } else {
        game.process_player_action(PlayerAction::NextBattle);
        if game.current_enemy().is_none() && !game.can_advance_floor() {
            log::error!("No encounter could be started on floor {}", game.floor());
            return false;
        }
        true
    }
}

/// Pick the player's move for this turn
fn take_turn(game: &mut Game) -> Result<()> {
    let (Some(player), Some(enemy)) = (game.player(), game.current_enemy()) else {
        return Ok(());
    };

    if player.health_fraction() < FLEE_THRESHOLD && !game.is_boss_encounter() && game.can_afford(PlayerAction::Flee) {
        game.process_player_action(PlayerAction::Flee);
        return Ok(());
    }

    // Strongest affordable skill aimed at the enemy, unless a heavy attack would finish it
    let finisher = enemy.current_health <= player.attack(AttackTier::Heavy);
    let skill = player
        .learned_skills()
        .iter()
        .filter(|s| s.effect.is_offensive() && s.target == SkillTarget::Enemy)
        .filter(|s| player.can_afford(s.cost))
        .max_by_key(|s| s.power)
        .map(|s| s.id.clone());

    match skill {
        Some(id) if !finisher => game.process_player_skill(&id),
        _ => {
            let affordable = AttackTier::ALL
                .iter()
                .rev()
                .copied()
                .find(|tier| game.can_afford(PlayerAction::Attack(*tier)));
            let Some(tier) = affordable else {
                bail!(
                    "{} has {} stamina, not enough for any attack",
                    player.name,
                    player.stamina().current
                );
            };
            game.process_player_action(PlayerAction::Attack(tier));
        }
    }
    Ok(())
}

/// Spread unspent points over health, attack and defense
fn spend_stat_points(game: &mut Game) {
    let Some(player) = game.player() else {
        return;
    };
    let health_stat = match player.role() {
        Role::Hunter => StatType::Vitality,
        Role::Vampire => StatType::BloodPotency,
    };
    let rotation = [health_stat, StatType::AttackPower, StatType::DefenseRating];
    let points = player.stat_points() as usize;

    for stat in rotation.iter().cycle().take(points) {
        if let Err(e) = game.allocate_stat_point(*stat) {
            log::warn!("Autopilot could not allocate {}: {}", stat.name(), e);
            break;
        }
    }
}
