pub mod prelude;

pub mod categories;
pub mod logs;
pub mod products;
pub mod reviews;
pub mod users;
