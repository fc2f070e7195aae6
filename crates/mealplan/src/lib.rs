mod catalog;
mod command;
mod generator;
mod slot;

pub use catalog::*;
pub use command::*;
pub use generator::*;
pub use slot::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod query;
        mod sqlite;

        pub use query::*;
    }
}
