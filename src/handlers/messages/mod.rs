pub mod send;

pub use send::send_post;
