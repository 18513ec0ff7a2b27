pub mod keywords;
pub mod process;
pub mod status;
pub mod toc;
