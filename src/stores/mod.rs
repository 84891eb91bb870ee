//! State holders for the browse, search, detail, and dismissal concerns

mod detail;
mod dismissal;
mod pagination;
mod search;

pub use detail::{DetailLoader, DetailState};
pub use dismissal::{DismissalWatcher, PointerDown, PointerEvents, RegionId};
pub use pagination::PaginationStore;
pub use search::{RequestSeq, SearchState};
