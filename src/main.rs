use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use champ_tiers::config::Config;
use champ_tiers::output;
use champ_tiers::scoring::{self, ScoringConfig};
use champ_tiers::snapshot::{self, SnapshotState};
use champ_tiers::votes::{self, ResetMode, VoteCount};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_STORAGE: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Vote file (JSON array of vote rows)
    file: Option<PathBuf>,

    /// Only rank champions voted in this role
    #[arg(short, long)]
    role: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank champions into tiers (default if no subcommand)
    Rank(RankArgs),
    /// Compare the tier distribution of each role with the configured bands
    Verify {
        file: PathBuf,

        /// Role to check (defaults to every role in the file)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Convert a pasted tier-list table into a vote file
    Import {
        /// Table dump: header line, then `Champion  Tier  Score  up/total`
        file: PathBuf,

        #[arg(short, long)]
        role: String,

        /// Write the vote file here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Shrink or clear every vote count (a snapshot is taken first)
    Reset {
        file: PathBuf,

        /// Remove this percentage of every count, in (0, 100]
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        percentage: Option<f64>,

        /// Drop every vote
        #[arg(long)]
        clear: bool,
    },
    /// Manage vote snapshots
    Snapshot {
        #[command(subcommand)]
        action: SnapshotCommand,
    },
    /// Edit the roles stored on vote rows
    Roles {
        #[command(subcommand)]
        action: RolesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RolesCommand {
    /// Replace the roles of one champion
    Set {
        file: PathBuf,

        /// Champion id as written in the vote file
        id: String,

        /// New roles (at least one)
        roles: Vec<String>,
    },
    /// Update roles from a champion-name to positions mapping file
    Apply {
        file: PathBuf,

        /// JSON object, e.g. {"Sona": ["UTILITY", "MIDDLE"]}
        mapping: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum SnapshotCommand {
    /// Store the rows of a vote file as a named snapshot
    Create {
        file: PathBuf,

        /// Snapshot name (defaults to a timestamped name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List snapshots, newest first
    List,
    /// Write a snapshot's rows back to a vote file
    Restore {
        name: String,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete a snapshot
    Delete { name: String },
}

#[derive(Parser, Debug)]
#[command(name = "champ-tiers")]
#[command(about = "Vote-based champion tier lists", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/champ-tiers/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to snapshot file (defaults to ~/.config/champ-tiers/snapshots.json)
    #[arg(long, global = true)]
    snapshots: Option<String>,

    #[command(flatten)]
    rank: RankArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Print an error and exit with `code`.
fn fail(code: i32, what: &str, err: impl Display) -> ! {
    eprintln!("{}: {}", what, err);
    std::process::exit(code);
}

fn or_exit<T, E: Display>(result: Result<T, E>, code: i32, what: &str) -> T {
    result.unwrap_or_else(|e| fail(code, what, e))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("champ_tiers={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct App {
    verbose: bool,
    config: Config,
    scoring: ScoringConfig,
    snapshot_path: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match champ_tiers::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => fail(EXIT_CONFIG, "Config error", format!("{:#}", e)),
    };

    // Validate scoring config at startup
    let scoring = config.scoring();
    if let Err(errors) = scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!(
            "Scoring: k={} threshold={} fallback_avg_votes={} ({} bands)",
            scoring.k(),
            scoring.threshold(),
            scoring.fallback_avg_votes(),
            scoring.bands().len()
        );
    }

    let app = App {
        verbose: cli.verbose,
        config,
        scoring,
        snapshot_path: cli
            .snapshots
            .map(PathBuf::from)
            .unwrap_or_else(snapshot::get_snapshot_path),
    };

    match cli.command.unwrap_or(Commands::Rank(cli.rank)) {
        Commands::Rank(args) => app.rank(args),
        Commands::Verify { file, role } => app.verify(&file, role.as_deref()),
        Commands::Import { file, role, output } => app.import(&file, &role, output.as_deref()),
        Commands::Reset {
            file,
            percentage,
            clear,
        } => {
            let mode = match percentage {
                Some(p) if !clear => ResetMode::Percentage(p),
                _ => ResetMode::Clear,
            };
            app.reset(&file, mode)
        }
        Commands::Snapshot { action } => match action {
            SnapshotCommand::Create { file, name } => app.snapshot_create(&file, name),
            SnapshotCommand::List => app.snapshot_list(),
            SnapshotCommand::Restore { name, output } => app.snapshot_restore(&name, &output),
            SnapshotCommand::Delete { name } => app.snapshot_delete(&name),
        },
        Commands::Roles { action } => match action {
            RolesCommand::Set { file, id, roles } => app.roles_set(&file, &id, &roles),
            RolesCommand::Apply { file, mapping } => app.roles_apply(&file, &mapping),
        },
    }

    if app.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

impl App {
    fn resolve_role(&self, role: &str) -> String {
        or_exit(
            votes::resolve_role(role, &self.config.roles()),
            EXIT_INPUT,
            "Input error",
        )
    }

    fn load_rows(&self, file: &Path) -> Vec<VoteCount> {
        let rows = match votes::load_votes(file) {
            Ok(rows) => rows,
            Err(e) => fail(EXIT_INPUT, "Input error", format!("{:#}", e)),
        };
        if self.verbose {
            eprintln!("Loaded {} vote rows from {}", rows.len(), file.display());
        }
        rows
    }

    fn save_rows(&self, file: &Path, rows: &[VoteCount]) {
        if let Err(e) = votes::save_votes(file, rows) {
            fail(EXIT_STORAGE, "Storage error", format!("{:#}", e));
        }
    }

    fn load_snapshots(&self) -> SnapshotState {
        match snapshot::load_snapshot_state(&self.snapshot_path) {
            Ok(state) => state,
            Err(e) => fail(EXIT_STORAGE, "Storage error", format!("{:#}", e)),
        }
    }

    fn save_snapshots(&self, state: &SnapshotState) {
        if let Err(e) = snapshot::save_snapshot_state(&self.snapshot_path, state) {
            fail(EXIT_STORAGE, "Storage error", format!("{:#}", e));
        }
    }

    /// Take a timestamped snapshot of `rows` before overwriting them.
    fn backup(&self, prefix: &str, rows: Vec<VoteCount>) -> String {
        let mut state = self.load_snapshots();
        let name = state.backup(prefix, rows, Utc::now());
        self.save_snapshots(&state);
        name
    }

    fn rank_rows(&self, rows: &[VoteCount]) -> Vec<scoring::TieredEntity> {
        or_exit(scoring::rank(rows, &self.scoring), EXIT_INPUT, "Input error")
    }

    fn rank(&self, args: RankArgs) {
        let Some(file) = args.file else {
            fail(EXIT_INPUT, "Input error", "no vote file given (see --help)");
        };

        let mut rows = self.load_rows(&file);
        if let Some(role) = &args.role {
            let role = self.resolve_role(role);
            rows = votes::filter_by_role(rows, &role);
            if self.verbose {
                eprintln!("{} champions voted in {}", rows.len(), role);
            }
        }

        let tiered = self.rank_rows(&rows);

        let rendered = match args.format {
            OutputFormat::Table => {
                output::format_tier_table(&tiered, output::should_use_colors())
            }
            OutputFormat::Tsv => output::format_tsv(&tiered),
            OutputFormat::Json => match output::format_json(&tiered) {
                Ok(json) => json,
                Err(e) => fail(EXIT_INPUT, "Output error", format!("{:#}", e)),
            },
        };
        println!("{}", rendered);
    }

    fn verify(&self, file: &Path, role: Option<&str>) {
        let rows = self.load_rows(file);
        let roles = match role {
            Some(role) => vec![self.resolve_role(role)],
            None => votes::roles_present(&rows, &self.config.roles()),
        };

        if roles.is_empty() {
            eprintln!("No roles found in {}", file.display());
            std::process::exit(EXIT_INPUT);
        }

        let use_colors = output::should_use_colors();
        let bands = self.scoring.bands();

        for (i, role) in roles.iter().enumerate() {
            let tiered = self.rank_rows(&votes::filter_by_role(rows.clone(), role));
            let report = output::DistributionReport::build(
                role,
                &tiered,
                &bands,
                self.scoring.fallback_avg_votes(),
            );

            if i > 0 {
                println!();
            }
            println!("{}", output::format_distribution(&report, use_colors));
            println!();
            println!("{}", output::format_tier_table(&tiered, use_colors));
        }
    }

    fn import(&self, file: &Path, role: &str, output_path: Option<&Path>) {
        let role = self.resolve_role(role);
        let raw = match std::fs::read_to_string(file) {
            Ok(raw) => raw,
            Err(e) => fail(
                EXIT_INPUT,
                "Input error",
                format!("Failed to read {}: {}", file.display(), e),
            ),
        };

        let rows = or_exit(votes::parse_tabular(&raw, &role), EXIT_INPUT, "Input error");
        if self.verbose {
            eprintln!("Parsed {} {} rows from {}", rows.len(), role, file.display());
        }

        match output_path {
            Some(path) => {
                if path.exists() {
                    let current = self.load_rows(path);
                    let backup = self.backup("pre-import", current);
                    if self.verbose {
                        eprintln!("Saved current {} as snapshot '{}'", path.display(), backup);
                    }
                }
                self.save_rows(path, &rows);
                println!("Imported {} champions into {}", rows.len(), path.display());
            }
            None => {
                let json = or_exit(
                    serde_json::to_string_pretty(&rows),
                    EXIT_INPUT,
                    "Output error",
                );
                println!("{}", json);
            }
        }
    }

    fn reset(&self, file: &Path, mode: ResetMode) {
        or_exit(mode.validate(), EXIT_INPUT, "Input error");

        let rows = self.load_rows(file);
        let backup = self.backup("pre-reset", rows.clone());
        let reset = or_exit(votes::soft_reset(&rows, mode), EXIT_INPUT, "Input error");
        self.save_rows(file, &reset);

        let before = votes::sum_votes(&rows);
        let after = votes::sum_votes(&reset);
        println!(
            "Reset {} rows: {} -> {} votes (snapshot: {})",
            rows.len(),
            before,
            after,
            backup
        );
    }

    fn snapshot_create(&self, file: &Path, name: Option<String>) {
        let rows = self.load_rows(file);
        let now = Utc::now();
        let name = name.unwrap_or_else(|| snapshot::auto_name("snapshot", now));

        let mut state = self.load_snapshots();
        let replaced = state.find(&name).is_some();
        let count = rows.len();
        state.add(name.clone(), rows, now);
        self.save_snapshots(&state);

        if replaced {
            println!("Replaced snapshot '{}' ({} rows)", name, count);
        } else {
            println!("Created snapshot '{}' ({} rows)", name, count);
        }
    }

    fn snapshot_list(&self) {
        let state = self.load_snapshots();
        if state.snapshots.is_empty() {
            println!("No snapshots.");
            return;
        }

        let now = Utc::now();
        let width = state
            .snapshots
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0);
        for snap in state.newest_first() {
            println!(
                "{:<width$}  {:>5} rows  {:>7} votes  {}",
                snap.name,
                snap.votes.len(),
                snap.total_votes(),
                snap.format_age(now),
                width = width
            );
        }
    }

    fn snapshot_restore(&self, name: &str, output_path: &Path) {
        let state = self.load_snapshots();
        let rows = or_exit(state.restore(name), EXIT_INPUT, "Input error");

        if output_path.exists() {
            let current = self.load_rows(output_path);
            let backup = self.backup("pre-restore", current);
            if self.verbose {
                eprintln!("Saved current {} as snapshot '{}'", output_path.display(), backup);
            }
        }

        self.save_rows(output_path, &rows);
        println!(
            "Restored snapshot '{}' ({} rows) to {}",
            name,
            rows.len(),
            output_path.display()
        );
    }

    fn snapshot_delete(&self, name: &str) {
        let mut state = self.load_snapshots();
        if !state.remove(name) {
            fail(
                EXIT_INPUT,
                "Input error",
                champ_tiers::TierError::SnapshotNotFound(name.to_string()),
            );
        }
        self.save_snapshots(&state);
        println!("Deleted snapshot '{}'", name);
    }

    fn roles_set(&self, file: &Path, id: &str, roles: &[String]) {
        let mut rows = self.load_rows(file);
        let before = rows.clone();
        let joined = or_exit(
            votes::set_roles(&mut rows, id, roles, &self.config.roles()),
            EXIT_INPUT,
            "Input error",
        );
        self.backup("pre-roles", before);
        self.save_rows(file, &rows);
        println!("Set roles of '{}' to {}", id, joined);
    }

    fn roles_apply(&self, file: &Path, mapping_path: &Path) {
        let mapping = match votes::load_role_mapping(mapping_path) {
            Ok(mapping) => mapping,
            Err(e) => fail(EXIT_INPUT, "Input error", format!("{:#}", e)),
        };

        let mut rows = self.load_rows(file);
        let before = rows.clone();
        let stats = votes::apply_role_mapping(&mut rows, &mapping);
        if stats.updated > 0 {
            let backup = self.backup("pre-roles", before);
            if self.verbose {
                eprintln!("Saved current {} as snapshot '{}'", file.display(), backup);
            }
            self.save_rows(file, &rows);
        }

        println!(
            "Updated {} champions, {} unchanged, {} not in {}",
            stats.updated,
            stats.unchanged,
            stats.unmatched.len(),
            file.display()
        );
        if self.verbose {
            for name in &stats.unmatched {
                eprintln!("  not found: {}", name);
            }
        }
    }
}
