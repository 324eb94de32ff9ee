pub use super::school::Entity as School;
pub use super::teacher::Entity as Teacher;
