pub mod auth_service;
pub mod cart_service;
pub mod item_service;
pub mod order_service;
pub mod session_service;
