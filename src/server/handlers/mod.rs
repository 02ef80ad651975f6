pub mod chatbot;
pub mod compare;
pub mod health;
pub mod products;
