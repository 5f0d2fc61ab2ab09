pub mod read;

pub use read::FileWindow;
