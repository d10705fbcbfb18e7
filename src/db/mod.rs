pub mod contactdb;
#[allow(clippy::module_inception)]
pub mod db;
pub mod leaddb;
pub mod propertydb;
pub mod userdb;
