mod activity;
mod filters;
mod lenient;
mod profile;
mod task;
mod task_update;

pub use activity::*;
pub use filters::*;
pub use profile::*;
pub use task::*;
pub use task_update::*;
