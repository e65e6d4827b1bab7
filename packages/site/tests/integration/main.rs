mod common;

mod cart;
mod catalog;
mod forms;
