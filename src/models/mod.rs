pub mod leadmodel;
pub mod propertymodel;
pub mod usermodel;
