pub mod catalog;
pub mod cli;
pub mod conversation;
pub mod planner;
pub mod similarity;
