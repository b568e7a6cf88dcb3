pub mod contact;
pub mod generator;
pub mod outbreak;
pub mod settings;
