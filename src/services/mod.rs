pub mod completion;
pub mod ticker_search;

pub use completion::{CompletionRequest, CompletionService, OpenAiClient};
pub use ticker_search::{FmpClient, TickerSearchService};
