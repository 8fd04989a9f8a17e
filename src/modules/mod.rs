pub mod inspect;
pub mod layout;
pub mod sample;
