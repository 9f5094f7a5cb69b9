pub mod access_key;
pub mod error;
pub mod memo;

pub use error::PastelError;
pub use memo::{CreateMemo, Memo};
