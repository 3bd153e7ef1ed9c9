pub mod panels;
pub mod plot;
pub mod projection;
pub mod tables;
