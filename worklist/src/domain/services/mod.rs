mod task_board;

pub use task_board::{BoardOptions, PendingFetch, TaskBoard};
