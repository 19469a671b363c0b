pub mod dashboard;
pub mod leaders;
pub mod players;
