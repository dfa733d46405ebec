pub mod daily;
pub mod log;
pub mod stock;
pub mod timer;

pub use daily::DailyList;
pub use log::{load_completions, CompletionLog};
pub use stock::StockList;
pub use timer::WorkTimer;
