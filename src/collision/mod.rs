pub mod contact;
pub mod support;
