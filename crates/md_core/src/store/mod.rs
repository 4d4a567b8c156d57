// Document persistence for the dashboard
// Virtual-path JSON documents with envelope metadata, on disk or in memory

pub mod error;
pub mod persistence;
pub mod vfs;

pub use error::StoreError;
pub use persistence::{PersistenceService, ThemeMode};
pub use vfs::{DocumentStore, Envelope, FsStore, MemStore};

/// Envelope format version stamped on every document.
pub const DOC_VERSION: &str = "1.0";

pub const TEAMS_DOC: &str = "/data/core/teams.json";
pub const PLAYERS_DOC: &str = "/data/core/players.json";
pub const FORMATIONS_DOC: &str = "/data/match/formations.json";
pub const BENCH_DOC: &str = "/data/match/bench.json";
pub const SCORE_DOC: &str = "/data/match/score.json";
pub const EVENTS_DOC: &str = "/data/match/events.json";
pub const HISTORY_DOC: &str = "/data/history/snapshot_prev.json";
pub const THEME_DOC: &str = "/data/settings/theme.json";
