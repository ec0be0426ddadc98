pub mod claim;
pub mod item;
pub mod photo;
pub mod user;

pub use claim::{Claim, ClaimInput};
pub use item::{Item, ItemStatus, ReportInput};
pub use photo::Photo;
pub use user::{Role, Session, User};
