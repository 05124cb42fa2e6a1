//! Sea-ORM entity definitions

pub mod entry;
