pub mod city;
pub mod leaderboard;
pub mod models;
pub mod normalize;
pub mod query;
pub mod render;
pub mod schedule;

pub use leaderboard::{Leaderboard, LeaderboardError, LeaderboardRow, SortDirection, SortState};
pub use models::{Document, Metrics, SearchMode, SearchResult, SearchStep, Timings};
pub use normalize::RawPayload;
pub use query::{QueryForm, SearchBody, SearchRequest, ValidationError};
pub use render::{CardList, DocumentView, FieldValue, ResultView};
