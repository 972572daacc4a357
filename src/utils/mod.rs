pub mod colors;
pub mod date;
pub mod path;
pub mod slug;
pub mod table;
