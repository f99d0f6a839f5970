pub mod driver;

pub use driver::{Batch, Db};
