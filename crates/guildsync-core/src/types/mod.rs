mod common;
mod guild;
mod lookup;
mod member;
mod server;
mod update;

pub use common::*;
pub use guild::*;
pub use lookup::*;
pub use member::*;
pub use server::*;
pub use update::*;
