//! Sales AI Common Library
//!
//! 売上データの型、時間帯判定、ランキング集計、AIプロンプト生成

pub mod error;
pub mod prompts;
pub mod ranking;
pub mod time_slot;
pub mod types;

pub use error::{Error, Result};
pub use prompts::{
    build_menu_request, build_summary_request, ExclusionList, MenuProposalRequest,
    ProposalContext, StoreCategory, StoreProfile, DEFAULT_EXCLUSIONS,
};
pub use ranking::{aggregate, records_in_slot, Ranking, RankingSet};
pub use time_slot::{classify, classify_hour, TimeSlot, Timestamp};
pub use types::{ChatMessage, CompletionRequest, RankingEntry, ResponseFormat, Role, TransactionRecord};
