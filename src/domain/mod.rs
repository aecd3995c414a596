//! Domain types: courses, users, payment inputs and the rules that check them.

pub mod course;
pub mod payment;
pub mod ports;
pub mod purchase;
pub mod user;
pub mod validation;
