mod activity;
mod filters;
mod ids;
mod task;

pub use activity::*;
pub use filters::*;
pub use ids::*;
pub use task::*;

pub use atomwalk::{
    CompanyInfo, ProfileInfo, RawActivity, RawCustomer, RawTask, RawUser, RecordId,
    TaskUpdateData, YesNo,
};
