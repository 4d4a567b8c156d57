//! Operator console for the live match dashboard.
//!
//! One subcommand per operator action, JSON documents under `--data-dir`.
//! Every command runs through the same action controller the dashboard
//! uses, so validation, snapshots, undo and persistence behave identically
//! here.

mod score_clicks;
mod source;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use md_core::{
    seed, Action, ActionController, CancelReason, CardKind, EventType, FormationKind, FsStore,
    GoalAngle, GoalDetails, MatchEvent, PersistenceService, PlayerStatus, RosterSource, Team,
    TeamSide, ThemeMode,
};
use score_clicks::{TapIntent, TapTracker, DOUBLE_TAP_WINDOW_MS};
use source::FileRosterSource;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "md_cli")]
#[command(about = "Operator console for the live match dashboard", long_about = None)]
struct Cli {
    /// Directory holding the match documents
    #[arg(long, global = true, default_value = "matchdesk-data")]
    data_dir: PathBuf,

    /// Display clock (MM:SS), the minute stamp for generated events
    #[arg(long, global = true)]
    clock: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the data directory with the demo derby
    Init {
        /// Reseed even when documents already exist
        #[arg(long, default_value = "false")]
        force: bool,
    },

    /// Print the scoreboard, lineups and recent events
    Status,

    /// Record a goal
    Goal {
        #[arg(long)]
        side: SideArg,

        /// Scorer's player id (a conceding-side player for an own goal)
        #[arg(long)]
        scorer: String,

        /// The scorer put it past their own keeper
        #[arg(long, default_value = "false")]
        own_goal: bool,

        /// Shot placement, if the commentator called one
        #[arg(long)]
        angle: Option<AngleArg>,

        /// Exact degrees for the precise-angle prompt
        #[arg(long)]
        degrees: Option<u16>,
    },

    /// Strike the latest standing goal from the scoreboard
    CancelGoal {
        #[arg(long)]
        side: SideArg,

        /// Reason written across the log entry
        #[arg(long, default_value = "var-decision")]
        reason: ReasonArg,

        /// Free-text reason, required with `--reason other`
        #[arg(long)]
        note: Option<String>,
    },

    /// Swap a starter with a bench player
    Swap {
        #[arg(long)]
        side: SideArg,

        /// Starter coming off
        #[arg(long)]
        starter: String,

        /// Bench player coming on
        #[arg(long)]
        bench: String,
    },

    /// Trade pitch positions between two starters
    SwapSlots {
        #[arg(long)]
        side: SideArg,

        #[arg(long)]
        first: String,

        #[arg(long)]
        second: String,
    },

    /// Move a player into the starting lineup
    Promote {
        #[arg(long)]
        side: SideArg,

        /// Player id to promote
        #[arg(long)]
        player: String,

        /// Starter to drop to the bench when the lineup is full
        #[arg(long)]
        demote: Option<String>,

        /// Send the player to the bench instead
        #[arg(long, default_value = "false")]
        as_sub: bool,
    },

    /// Toggle the captain's armband
    Captain {
        #[arg(long)]
        side: SideArg,

        #[arg(long)]
        player: String,
    },

    /// Toggle a card on a player
    Card {
        #[arg(long)]
        side: SideArg,

        #[arg(long)]
        player: String,

        #[arg(long)]
        color: CardArg,
    },

    /// Soft-delete a player from a squad
    DeletePlayer {
        #[arg(long)]
        side: SideArg,

        #[arg(long)]
        player: String,
    },

    /// Soft-delete a whole team
    DeleteTeam {
        /// Team id
        #[arg(long)]
        team: String,
    },

    /// Change a side's formation
    Formation {
        #[arg(long)]
        side: SideArg,

        /// Formation code, e.g. 4-2-3-1
        #[arg(long)]
        code: String,
    },

    /// Merge candidate players from a report file into a squad
    Merge {
        #[arg(long)]
        side: SideArg,

        /// JSON file holding the squad report
        #[arg(long)]
        file: PathBuf,
    },

    /// Revert the last action
    Undo,

    /// Show or set the color theme
    Theme {
        /// New theme; prints the current one when omitted
        mode: Option<ThemeArg>,
    },

    /// Replay a tap timeline through the score debouncer
    Tap {
        #[arg(long)]
        side: SideArg,

        /// Tap timestamps in millis, earliest first
        #[arg(long, required = true)]
        at: Vec<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Home,
    Away,
}

impl From<SideArg> for TeamSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Home => TeamSide::Home,
            SideArg::Away => TeamSide::Away,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CardArg {
    Yellow,
    Red,
}

impl From<CardArg> for CardKind {
    fn from(card: CardArg) -> Self {
        match card {
            CardArg::Yellow => CardKind::Yellow,
            CardArg::Red => CardKind::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AngleArg {
    Upper,
    Mid,
    Lower,
}

impl From<AngleArg> for GoalAngle {
    fn from(angle: AngleArg) -> Self {
        match angle {
            AngleArg::Upper => GoalAngle::Upper,
            AngleArg::Mid => GoalAngle::Mid,
            AngleArg::Lower => GoalAngle::Lower,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReasonArg {
    Offside,
    PriorInfraction,
    Handball,
    VarDecision,
    Other,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::System => ThemeMode::System,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => init(&cli.data_dir, force),

        Commands::Status => {
            print_status(&open(&cli.data_dir, cli.clock.as_deref()));
            Ok(())
        }

        Commands::Goal { side, scorer, own_goal, angle, degrees } => run_action(
            &mut open(&cli.data_dir, cli.clock.as_deref()),
            Action::RecordGoal(GoalDetails {
                side: side.into(),
                scorer_id: scorer,
                is_own_goal: own_goal,
                angle: angle.map(Into::into),
                numeric_angle: degrees,
            }),
        ),

        Commands::CancelGoal { side, reason, note } => {
            let reason = cancel_reason(reason, note)?;
            run_action(
                &mut open(&cli.data_dir, cli.clock.as_deref()),
                Action::CancelGoal { side: side.into(), reason },
            )
        }

        Commands::Swap { side, starter, bench } => run_action(
            &mut open(&cli.data_dir, cli.clock.as_deref()),
            Action::SwapStarterBench { side: side.into(), starter_id: starter, bench_id: bench },
        ),

        Commands::SwapSlots { side, first, second } => run_action(
            &mut open(&cli.data_dir, cli.clock.as_deref()),
            Action::SwapSlots { side: side.into(), first_id: first, second_id: second },
        ),

        Commands::Promote { side, player, demote, as_sub } => {
            let mut controller = open(&cli.data_dir, cli.clock.as_deref());
            let action = promote_action(&controller, side.into(), &player, demote, as_sub)?;
            run_action(&mut controller, action)
        }

        Commands::Captain { side, player } => run_action(
            &mut open(&cli.data_dir, cli.clock.as_deref()),
            Action::ToggleCaptain { side: side.into(), player_id: player },
        ),

        Commands::Card { side, player, color } => run_action(
            &mut open(&cli.data_dir, cli.clock.as_deref()),
            Action::ToggleCard { side: side.into(), player_id: player, kind: color.into() },
        ),

        Commands::DeletePlayer { side, player } => run_action(
            &mut open(&cli.data_dir, cli.clock.as_deref()),
            Action::DeletePlayer { side: side.into(), player_id: player },
        ),

        Commands::DeleteTeam { team } => run_action(
            &mut open(&cli.data_dir, cli.clock.as_deref()),
            Action::DeleteTeam { team_id: team },
        ),

        Commands::Formation { side, code } => {
            if FormationKind::from_str(&code).is_err() {
                log::warn!("Unknown formation {}, the pitch will render 4-3-3", code);
            }
            run_action(
                &mut open(&cli.data_dir, cli.clock.as_deref()),
                Action::SetFormation { side: side.into(), code },
            )
        }

        Commands::Merge { side, file } => {
            let mut controller = open(&cli.data_dir, cli.clock.as_deref());
            let action = merge_action(&controller, side.into(), &file)?;
            run_action(&mut controller, action)
        }

        Commands::Undo => {
            let mut controller = open(&cli.data_dir, cli.clock.as_deref());
            match controller.undo() {
                Some(notice) => println!("✅ {}", notice.message),
                None => println!("Nothing to undo"),
            }
            Ok(())
        }

        Commands::Theme { mode } => {
            let controller = open(&cli.data_dir, cli.clock.as_deref());
            match mode {
                Some(arg) => {
                    let mode: ThemeMode = arg.into();
                    controller.set_theme(mode);
                    println!("✅ Theme set to {}", theme_label(mode));
                }
                None => println!("Theme: {}", theme_label(controller.theme())),
            }
            Ok(())
        }

        Commands::Tap { side, at } => tap_demo(side.into(), &at),
    }
}

/// Load the controller over the documents in `data_dir`, seeding the demo
/// derby when there are none yet.
fn open(data_dir: &Path, clock: Option<&str>) -> ActionController {
    let service = PersistenceService::new(Box::new(FsStore::new(data_dir)));
    let mut controller = ActionController::load_or_seed(service);
    if let Some(clock) = clock {
        controller.set_clock(clock);
    }
    controller
}

fn run_action(controller: &mut ActionController, action: Action) -> Result<()> {
    match controller.apply(action)? {
        Some(notice) => println!("✅ {}", notice.message),
        None => println!("Nothing to do: the target no longer exists"),
    }
    Ok(())
}

fn init(data_dir: &Path, force: bool) -> Result<()> {
    let service = PersistenceService::new(Box::new(FsStore::new(data_dir)));
    if service.is_initialized() && !force {
        anyhow::bail!(
            "{} already holds match documents (use --force to reseed)",
            data_dir.display()
        );
    }
    let state = seed::demo_state();
    service.save_all(&state);
    println!("✅ Seeded {} with the demo derby", data_dir.display());
    Ok(())
}

fn cancel_reason(reason: ReasonArg, note: Option<String>) -> Result<CancelReason> {
    Ok(match reason {
        ReasonArg::Offside => CancelReason::Offside,
        ReasonArg::PriorInfraction => CancelReason::PriorInfraction,
        ReasonArg::Handball => CancelReason::Handball,
        ReasonArg::VarDecision => CancelReason::VarDecision,
        ReasonArg::Other => {
            let note =
                note.ok_or_else(|| anyhow::anyhow!("--note is required with --reason other"))?;
            CancelReason::Other(note)
        }
    })
}

fn promote_action(
    controller: &ActionController,
    side: TeamSide,
    player_id: &str,
    demote: Option<String>,
    as_sub: bool,
) -> Result<Action> {
    let team = controller
        .state()
        .team_for_side(side)
        .ok_or_else(|| anyhow::anyhow!("No team on the {} side", side))?;
    let mut player = team
        .player(player_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("No player {} on the {} side", player_id, side))?;
    player.status = if as_sub { PlayerStatus::Substitute } else { PlayerStatus::Starter };

    Ok(match demote {
        Some(demote_id) => Action::UpsertPlayerSwapping { side, player, demote_id },
        None => Action::UpsertPlayer { side, player },
    })
}

fn merge_action(controller: &ActionController, side: TeamSide, file: &Path) -> Result<Action> {
    let team_name = controller
        .state()
        .team_for_side(side)
        .map(|t| t.name.clone())
        .ok_or_else(|| anyhow::anyhow!("No team on the {} side", side))?;

    let report = FileRosterSource::new(file).fetch_squad(&team_name)?;
    for citation in &report.sources {
        println!("   source: {} ({})", citation.title, citation.uri);
    }
    Ok(Action::MergeSquad { side, candidates: report.candidates })
}

fn print_status(controller: &ActionController) {
    let state = controller.state();
    let home = state.team_for_side(TeamSide::Home);
    let away = state.team_for_side(TeamSide::Away);
    let name: for<'a> fn(Option<&'a Team>) -> &'a str =
        |team| team.map_or("(no team)", |t| t.name.as_str());

    println!(
        "⚽ {} {} - {} {}   clock {}",
        name(home),
        state.score.home,
        state.score.away,
        name(away),
        state.match_info.clock
    );
    if !state.match_info.competition.is_empty() {
        println!("   {}", state.match_info.competition);
    }
    if !state.match_info.venue.is_empty() {
        println!("   {}", state.match_info.venue);
    }

    for side in [TeamSide::Home, TeamSide::Away] {
        if let Some(team) = state.team_for_side(side) {
            println!("\n{} ({})", team.name, state.formation_for_side(side));
            for placed in controller.placements(side) {
                if let Some(player) = team.player(&placed.player_id) {
                    let armband = if player.is_captain { " (C)" } else { "" };
                    println!(
                        "   {:<4} #{:<3} {}{}",
                        placed.sub_role.code(),
                        player.number,
                        player.name,
                        armband
                    );
                }
            }
            let bench: Vec<&str> = team.bench().map(|p| p.name.as_str()).collect();
            if !bench.is_empty() {
                println!("   Bench: {}", bench.join(", "));
            }
        }
    }

    if !state.events.is_empty() {
        println!("\nRecent events:");
        for event in state.events.iter().take(5) {
            println!("   {}", describe_event(event));
        }
    }
}

fn describe_event(event: &MatchEvent) -> String {
    let mark = match event.event_type {
        EventType::Goal if event.is_canceled => "❌ goal",
        EventType::Goal => "⚽ goal",
        EventType::Yellow => "🟨 yellow",
        EventType::Red => "🟥 red",
        EventType::Sub => "🔁 sub",
    };
    let mut line = format!("{}'  {}  {} ({})", event.minute, mark, event.player, event.team);
    if event.is_own_goal {
        line.push_str(" [own goal]");
    }
    if let Some(out) = &event.player_out {
        line.push_str(&format!(" for {}", out));
    }
    if let Some(reason) = &event.cancel_reason {
        line.push_str(&format!(" [{}]", reason));
    }
    line
}

fn theme_label(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Dark => "dark",
        ThemeMode::Light => "light",
        ThemeMode::System => "system",
    }
}

/// Replay a tap timeline and print each resolved intent. The machine that
/// decides single against double lives in [`score_clicks`]; this just feeds
/// it and polls the window.
fn tap_demo(side: TeamSide, taps: &[u64]) -> Result<()> {
    let mut timeline = taps.to_vec();
    timeline.sort_unstable();

    println!("Tap timeline for the {} score:", side);
    let mut tracker = TapTracker::new();
    for &at in &timeline {
        if let Some(intent) = tracker.poll(at) {
            report_intent(at, intent, "window expired");
        }
        if let Some(intent) = tracker.tap(at) {
            report_intent(at, intent, "tap");
        }
    }
    let horizon = timeline.last().copied().unwrap_or(0) + DOUBLE_TAP_WINDOW_MS + 1;
    if let Some(intent) = tracker.poll(horizon) {
        report_intent(horizon, intent, "window expired");
    }
    Ok(())
}

fn report_intent(at: u64, intent: TapIntent, cause: &str) {
    let flow = match intent {
        TapIntent::RecordGoal => "goal entry",
        TapIntent::CancelGoal => "cancel-goal flow",
    };
    println!("   {:>6} ms  {} ({})", at, flow, cause);
}
