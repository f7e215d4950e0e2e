pub mod commissions;
pub mod profiles;

pub use commissions::{CommissionError, CommissionService};
