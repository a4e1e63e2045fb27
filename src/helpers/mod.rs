pub mod click_outside;
pub mod dom;
pub mod handler_404;
