pub mod audio;
pub mod document;
pub mod history;
pub mod session;
pub mod speech;
