//! Roster records shared by the grid and the backend client.

mod admin;
mod shift;
mod staff;
mod template;

pub use admin::*;
pub use shift::*;
pub use staff::*;
pub use template::*;
