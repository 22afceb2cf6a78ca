pub mod day;
pub mod home;
