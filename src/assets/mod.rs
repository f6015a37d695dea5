pub mod decode;
pub mod handles;
pub mod media;
