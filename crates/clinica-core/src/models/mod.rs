pub mod appointment;
pub mod intake;
pub mod patient;
pub mod plan;
pub mod product;
pub mod profile;
pub mod tenant;
