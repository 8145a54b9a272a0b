pub mod fs_pages;
pub mod http_completion;
