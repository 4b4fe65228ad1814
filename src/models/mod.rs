pub mod calculator;
pub mod cart;
pub mod catalog;
pub mod lead;
pub mod modal;
