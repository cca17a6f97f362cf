pub use super::categories::Entity as Categories;
pub use super::logs::Entity as Logs;
pub use super::products::Entity as Products;
pub use super::reviews::Entity as Reviews;
pub use super::users::Entity as Users;
