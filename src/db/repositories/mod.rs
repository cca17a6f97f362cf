pub mod category;
pub mod logs;
pub mod product;
pub mod review;
pub mod user;
