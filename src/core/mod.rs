//! Backend aggregation and orchestration.
//!
//! - `search`: concurrent fan-out search with ranking
//! - `dispatch`: blind, targeted and sweep routing of mutations
//! - `selection`: the interactive search-then-install session

pub mod dispatch;
pub mod search;
pub mod selection;
