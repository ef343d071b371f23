pub mod call;
pub mod describe;
pub mod tools;
