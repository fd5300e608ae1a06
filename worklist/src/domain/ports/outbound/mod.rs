mod task_backend;

pub use task_backend::*;
