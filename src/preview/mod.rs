pub mod compositor;
pub mod layout;
pub mod text;
